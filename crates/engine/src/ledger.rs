//! Per-currency running totals.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::CurrencyCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub currency: CurrencyCode,
    pub balance: Decimal,
    /// Rate carried by the first transaction seen in this currency.
    pub first_rate: Option<Decimal>,
}

/// Running balance per currency code, iterated in the order each code was
/// first applied.
#[derive(Clone, Debug, Default)]
pub struct CurrencyLedger {
    entries: Vec<LedgerEntry>,
    index: HashMap<CurrencyCode, usize>,
}

impl CurrencyLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `signed_amount` to the running total of `currency` and returns the
    /// new total. `rate` is remembered only on the first application.
    pub fn apply(
        &mut self,
        currency: &CurrencyCode,
        signed_amount: Decimal,
        rate: Option<Decimal>,
    ) -> Decimal {
        let position = match self.index.get(currency) {
            Some(position) => *position,
            None => {
                self.entries.push(LedgerEntry {
                    currency: currency.clone(),
                    balance: Decimal::ZERO,
                    first_rate: rate,
                });
                let position = self.entries.len() - 1;
                self.index.insert(currency.clone(), position);
                position
            }
        };

        let entry = &mut self.entries[position];
        entry.balance = entry.balance.saturating_add(signed_amount);
        entry.balance
    }

    /// Current total for `currency`, zero if never applied.
    #[cfg(test)]
    fn balance(&self, currency: &CurrencyCode) -> Decimal {
        self.index
            .get(currency)
            .map_or(Decimal::ZERO, |position| self.entries[*position].balance)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }
}
