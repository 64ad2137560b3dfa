//! Ledger summary engine.
//!
//! The crate is split in two layers:
//!
//! - a pure core ([`summarize`] and the types it works on) that turns an
//!   ordered list of [`RatedTransaction`]s into a [`TransactionSummary`] with
//!   running balances, per-currency totals, a primary-currency total and a
//!   fund-source check;
//! - the [`Engine`] facade, which loads that input from the database and also
//!   owns the FX rate table and the audit log.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use engine::{CurrencyCode, RatedTransaction, Transaction, UserId, summarize};
//! use rust_decimal::Decimal;
//!
//! let deposit = Transaction {
//!     id: 1,
//!     user_id: UserId::new(7),
//!     kind: "DEPOSIT".to_string(),
//!     amount: Decimal::new(100, 0),
//!     currency_code: CurrencyCode::new("USD"),
//!     source_transaction_id: None,
//!     metadata: None,
//!     created_at: Utc::now(),
//! };
//!
//! let summary = summarize(
//!     UserId::new(7),
//!     &CurrencyCode::new("USD"),
//!     &[RatedTransaction::new(deposit, None)],
//! );
//! assert_eq!(summary.final_balance_primary, Decimal::new(100, 0));
//! ```

pub use audit::AuditEntry;
pub use currency::CurrencyCode;
pub use error::EngineError;
pub use ledger::{CurrencyLedger, LedgerEntry};
pub use ops::{DEFAULT_PRIMARY_CURRENCY, Engine, EngineBuilder};
pub use summary::{AnnotatedTransaction, CurrencyBalance, TransactionSummary, summarize};
pub use transactions::{Direction, NewTransaction, RatedTransaction, Transaction, UserId};

mod audit;
mod currency;
mod currency_rates;
mod error;
mod ledger;
mod ops;
mod summary;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
