//! Ledger summary endpoint

use api_types::summary::{CurrencyBalance, SummaryQuery, TransactionSummary, TransactionView};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::UserId;

use crate::{ServerError, server::ServerState};

fn map_transaction(tx: engine::AnnotatedTransaction) -> TransactionView {
    let engine::AnnotatedTransaction {
        rated,
        signed_amount,
        amount_in_primary,
        balance_after_currency,
        balance_after_primary,
        is_fund_source_valid,
    } = tx;
    let engine::RatedTransaction {
        transaction,
        rate_to_primary,
    } = rated;

    TransactionView {
        id: transaction.id,
        user_id: transaction.user_id.get(),
        kind: transaction.kind,
        amount: transaction.amount,
        currency_code: transaction.currency_code.to_string(),
        source_transaction_id: transaction.source_transaction_id,
        metadata: transaction.metadata,
        created_at: transaction.created_at,
        rate_to_primary,
        signed_amount,
        amount_in_primary,
        balance_after_currency,
        balance_after_primary,
        is_fund_source_valid,
    }
}

fn map_summary(summary: engine::TransactionSummary) -> TransactionSummary {
    TransactionSummary {
        user_id: summary.user_id.get(),
        primary_currency: summary.primary_currency.to_string(),
        final_balance_primary: summary.final_balance_primary,
        balances_by_currency: summary
            .balances_by_currency
            .into_iter()
            .map(|balance| CurrencyBalance {
                currency: balance.currency.to_string(),
                balance: balance.balance,
                balance_in_primary: balance.balance_in_primary,
            })
            .collect(),
        transactions: summary.transactions.into_iter().map(map_transaction).collect(),
    }
}

/// Transaction history of a user with running balances and FX conversions.
pub async fn get(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<TransactionSummary>, ServerError> {
    let user_id = UserId::parse(&user_id)?;

    let summary = state
        .engine
        .transaction_summary(user_id, query.primary_currency.as_deref())
        .await?;
    tracing::debug!(
        user_id = user_id.get(),
        transactions = summary.transactions.len(),
        "summary served"
    );

    Ok(Json(map_summary(summary)))
}
