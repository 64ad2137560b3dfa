use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ConnectionTrait, QueryOrder, prelude::*, sea_query::OnConflict};

use crate::{CurrencyCode, EngineError, ResultEngine, currency_rates, transactions::parse_decimal};

use super::Engine;

impl Engine {
    /// Inserts or replaces the rate of `currency` to the primary currency.
    pub async fn set_rate(&self, currency: &CurrencyCode, rate: Decimal) -> ResultEngine<()> {
        if rate.is_sign_negative() {
            return Err(EngineError::InvalidInput(format!(
                "rate for {currency} must not be negative"
            )));
        }

        let model = currency_rates::ActiveModel {
            currency_code: ActiveValue::Set(currency.as_str().to_string()),
            rate: ActiveValue::Set(rate.to_string()),
        };
        currency_rates::Entity::insert(model)
            .on_conflict(
                OnConflict::column(currency_rates::Column::CurrencyCode)
                    .update_column(currency_rates::Column::Rate)
                    .to_owned(),
            )
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// All stored rates, ordered by currency code.
    pub async fn rates(&self) -> ResultEngine<Vec<(CurrencyCode, Decimal)>> {
        let models = currency_rates::Entity::find()
            .order_by_asc(currency_rates::Column::CurrencyCode)
            .all(&self.database)
            .await?;
        models
            .into_iter()
            .map(|model| {
                let rate = parse_decimal(&model.rate, "rate")?;
                Ok((CurrencyCode::from(model.currency_code), rate))
            })
            .collect()
    }

    pub(super) async fn rate_table<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> ResultEngine<HashMap<String, Decimal>> {
        let models = currency_rates::Entity::find().all(db).await?;
        models
            .into_iter()
            .map(|model| {
                let rate = parse_decimal(&model.rate, "rate")?;
                Ok((model.currency_code, rate))
            })
            .collect()
    }
}
