//! Ledger summary computation.
//!
//! [`summarize`] turns an ordered list of rated transactions for one user into
//! a [`TransactionSummary`]:
//!
//! 1. every transaction is classified ([`Direction::classify`]) and signed;
//! 2. the signed amount is converted to the primary currency (rate `1` for the
//!    primary currency itself, the supplied rate otherwise, `0` when no rate
//!    is known);
//! 3. running balances are accumulated per currency and in the primary
//!    currency, strictly in input order;
//! 4. one [`CurrencyBalance`] is produced per currency, valued with the rate of
//!    the first transaction seen in that currency;
//! 5. transactions declaring a funding source are checked against the same
//!    list.
//!
//! The computation is pure: the input is never reordered nor mutated.
//! Arithmetic saturates at the `Decimal` bounds instead of overflowing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, CurrencyLedger, Direction, RatedTransaction, Transaction, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTransaction {
    #[serde(flatten)]
    pub rated: RatedTransaction,
    pub signed_amount: Decimal,
    pub amount_in_primary: Decimal,
    /// Running balance in the transaction currency, after this transaction.
    pub balance_after_currency: Decimal,
    /// Running balance in the primary currency across all currencies, after
    /// this transaction.
    pub balance_after_primary: Decimal,
    /// `None` when no funding source is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fund_source_valid: Option<bool>,
}

impl AnnotatedTransaction {
    #[must_use]
    pub fn transaction(&self) -> &Transaction {
        &self.rated.transaction
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBalance {
    pub currency: CurrencyCode,
    pub balance: Decimal,
    pub balance_in_primary: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub user_id: UserId,
    pub primary_currency: CurrencyCode,
    pub final_balance_primary: Decimal,
    pub balances_by_currency: Vec<CurrencyBalance>,
    pub transactions: Vec<AnnotatedTransaction>,
}

/// Multiplier from `currency` to `primary`.
fn rate_to_primary(
    primary: &CurrencyCode,
    currency: &CurrencyCode,
    rate: Option<Decimal>,
) -> Decimal {
    if currency.matches(primary) {
        Decimal::ONE
    } else {
        rate.unwrap_or(Decimal::ZERO)
    }
}

/// Builds the summary of `transactions`, which must already be ordered by
/// `created_at` then `id`.
#[must_use]
pub fn summarize(
    user_id: UserId,
    primary_currency: &CurrencyCode,
    transactions: &[RatedTransaction],
) -> TransactionSummary {
    let mut ledger = CurrencyLedger::new();
    let mut running_primary = Decimal::ZERO;

    let mut annotated: Vec<AnnotatedTransaction> = transactions
        .iter()
        .map(|rated| {
            let tx = &rated.transaction;
            let signed_amount = Direction::classify(&tx.kind).signed(tx.amount);
            let rate = rate_to_primary(primary_currency, &tx.currency_code, rated.rate_to_primary);
            let amount_in_primary = signed_amount.saturating_mul(rate);

            let balance_after_currency =
                ledger.apply(&tx.currency_code, signed_amount, rated.rate_to_primary);
            running_primary = running_primary.saturating_add(amount_in_primary);

            AnnotatedTransaction {
                rated: rated.clone(),
                signed_amount,
                amount_in_primary,
                balance_after_currency,
                balance_after_primary: running_primary,
                is_fund_source_valid: None,
            }
        })
        .collect();

    validate_fund_sources(&mut annotated);

    let balances_by_currency = ledger
        .iter()
        .map(|entry| CurrencyBalance {
            currency: entry.currency.clone(),
            balance: entry.balance,
            balance_in_primary: entry.balance.saturating_mul(rate_to_primary(
                primary_currency,
                &entry.currency,
                entry.first_rate,
            )),
        })
        .collect();

    tracing::debug!(
        user_id = user_id.get(),
        transactions = annotated.len(),
        currencies = ledger.len(),
        "ledger summary computed"
    );

    TransactionSummary {
        user_id,
        primary_currency: primary_currency.clone(),
        final_balance_primary: running_primary,
        balances_by_currency,
        transactions: annotated,
    }
}

/// Marks every transaction declaring a funding source as valid iff that
/// source is in the same list and belongs to the same user. Duplicate ids
/// resolve to the last occurrence.
fn validate_fund_sources(annotated: &mut [AnnotatedTransaction]) {
    let owners: HashMap<i64, UserId> = annotated
        .iter()
        .map(|tx| (tx.transaction().id, tx.transaction().user_id))
        .collect();

    for tx in annotated.iter_mut() {
        if let Some(source_id) = tx.transaction().source_transaction_id {
            let user_id = tx.transaction().user_id;
            tx.is_fund_source_valid =
                Some(owners.get(&source_id).is_some_and(|owner| *owner == user_id));
        }
    }
}
