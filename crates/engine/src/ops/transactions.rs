use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, NewTransaction, RatedTransaction, ResultEngine, Transaction, TransactionSummary,
    UserId, summarize, transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Loads every transaction of `user_id`, ordered by `created_at` then
    /// `id`, each paired with the stored rate of its exact currency code.
    ///
    /// Currencies without a stored rate get `None`.
    pub async fn rated_transactions(&self, user_id: UserId) -> ResultEngine<Vec<RatedTransaction>> {
        with_tx!(self, |db_tx| {
            let models = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id.get()))
                .order_by_asc(transactions::Column::CreatedAt)
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;
            let rates = self.rate_table(&db_tx).await?;

            models
                .into_iter()
                .map(|model| {
                    let rate = rates.get(model.currency_code.as_str()).copied();
                    Ok(RatedTransaction::new(Transaction::try_from(model)?, rate))
                })
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Return a single transaction by id.
    pub async fn transaction(&self, id: i64) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("transaction {id}")))?;
        Transaction::try_from(model)
    }

    /// Store a new transaction and return it with its assigned id.
    pub async fn new_transaction(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        let model = transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        tracing::debug!(id = model.id, user_id = model.user_id, "transaction stored");
        Transaction::try_from(model)
    }

    /// Computes the ledger summary of `user_id`.
    ///
    /// `primary_currency` falls back to the engine default when missing or
    /// blank.
    pub async fn transaction_summary(
        &self,
        user_id: UserId,
        primary_currency: Option<&str>,
    ) -> ResultEngine<TransactionSummary> {
        let primary = self.resolve_primary_currency(primary_currency);
        let txs = self.rated_transactions(user_id).await?;
        Ok(summarize(user_id, &primary, &txs))
    }
}
