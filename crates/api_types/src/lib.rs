//! Wire types of the HTTP API.
//!
//! Field names are camelCase and decimals are JSON numbers.

use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod summary {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    /// Query string of `GET /api/transactions/{userId}`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryQuery {
        /// Falls back to the server default when missing or empty.
        pub primary_currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: i64,
        pub user_id: i64,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: Decimal,
        pub currency_code: String,
        pub source_transaction_id: Option<i64>,
        pub metadata: Option<String>,
        pub created_at: DateTime<Utc>,
        pub rate_to_primary: Option<Decimal>,
        pub signed_amount: Decimal,
        pub amount_in_primary: Decimal,
        pub balance_after_currency: Decimal,
        pub balance_after_primary: Decimal,
        /// Only present when `source_transaction_id` is set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub is_fund_source_valid: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrencyBalance {
        pub currency: String,
        pub balance: Decimal,
        pub balance_in_primary: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionSummary {
        pub user_id: i64,
        pub primary_currency: String,
        pub final_balance_primary: Decimal,
        pub balances_by_currency: Vec<CurrencyBalance>,
        pub transactions: Vec<TransactionView>,
    }
}

pub mod audit {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuditEntryNew {
        pub user_id: String,
        pub action: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuditEntry {
        /// Serialized as a string in JSON.
        pub id: Uuid,
        pub action: String,
        pub user_id: String,
        pub timestamp: DateTime<Utc>,
    }
}
