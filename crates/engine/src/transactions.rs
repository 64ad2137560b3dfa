//! Transaction primitives.
//!
//! A `Transaction` is a raw ledger row as stored by the transaction source.
//! The engine never validates it: amounts, codes and types flow through as
//! stored and are only interpreted by the summary computation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, EngineError, ResultEngine};

/// Identifier of the user owning a transaction history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parses an identifier coming from a path segment or a CLI flag.
    pub fn parse(value: &str) -> ResultEngine<Self> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| EngineError::InvalidUserId(format!("{value:?} is not a number")))
    }
}

impl TryFrom<f64> for UserId {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(EngineError::InvalidUserId(format!(
                "{value} is not a finite integer"
            )));
        }
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(EngineError::InvalidUserId(format!("{value} is out of range")));
        }
        Ok(Self(value as i64))
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Effect of a transaction on the balance sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    /// Classifies a transaction type, case-insensitively.
    ///
    /// - credit: `DEPOSIT`, `TRANSFER_IN`, `REFUND`
    /// - debit: `WITHDRAWAL`, `TRANSFER_OUT`, `PAYMENT`, `FEE`
    ///
    /// Anything else, including the empty string, is a credit.
    #[must_use]
    pub fn classify(kind: &str) -> Self {
        const CREDIT: [&str; 3] = ["DEPOSIT", "TRANSFER_IN", "REFUND"];
        const DEBIT: [&str; 4] = ["WITHDRAWAL", "TRANSFER_OUT", "PAYMENT", "FEE"];

        let is = |set: &[&str]| set.iter().any(|known| kind.eq_ignore_ascii_case(known));
        if is(&CREDIT) {
            Self::Credit
        } else if is(&DEBIT) {
            Self::Debit
        } else {
            Self::Credit
        }
    }

    /// Applies the direction to an amount, ignoring any sign already present.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Credit => amount.abs(),
            Self::Debit => -amount.abs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique per system, not necessarily per user list.
    pub id: i64,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    /// Absolute amount in `currency_code`.
    pub amount: Decimal,
    pub currency_code: CurrencyCode,
    /// Transaction this one claims to draw funds from.
    pub source_transaction_id: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction paired with its conversion multiplier to the primary
/// currency. `None` means no rate is known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub rate_to_primary: Option<Decimal>,
}

impl RatedTransaction {
    #[must_use]
    pub fn new(transaction: Transaction, rate_to_primary: Option<Decimal>) -> Self {
        Self {
            transaction,
            rate_to_primary,
        }
    }
}

/// Insert payload for the transaction source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub kind: String,
    pub amount: Decimal,
    pub currency_code: CurrencyCode,
    pub source_transaction_id: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub transaction_type: String,
    /// Decimal rendered as text.
    pub amount: String,
    pub currency_code: String,
    pub source_transaction_id: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewTransaction> for ActiveModel {
    fn from(tx: &NewTransaction) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(tx.user_id.get()),
            transaction_type: ActiveValue::Set(tx.kind.clone()),
            amount: ActiveValue::Set(tx.amount.to_string()),
            currency_code: ActiveValue::Set(tx.currency_code.as_str().to_string()),
            source_transaction_id: ActiveValue::Set(tx.source_transaction_id),
            metadata: ActiveValue::Set(tx.metadata.clone()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            kind: model.transaction_type,
            amount: parse_decimal(&model.amount, "transaction amount")?,
            currency_code: CurrencyCode::from(model.currency_code),
            source_transaction_id: model.source_transaction_id,
            metadata: model.metadata,
            created_at: model.created_at,
        })
    }
}

/// Parse a decimal stored as text and return a labeled error on failure.
pub(crate) fn parse_decimal(value: &str, label: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| EngineError::InvalidAmount(format!("invalid {label}: {value}")))
}
