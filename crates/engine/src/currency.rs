use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// ISO-like currency code attached to a transaction or used as primary
/// currency of a summary.
///
/// The code is kept exactly as supplied by storage. Two codes are the same
/// *ledger key* only if they are byte-equal (`"usd"` and `"USD"` accumulate
/// separately), while [`CurrencyCode::matches`] compares ASCII
/// case-insensitively and is used to decide whether a code is the primary
/// currency.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wraps a code without any normalization.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parses a code typed by a person (CLI, query string).
    ///
    /// Trims whitespace and upper-cases; rejects empty values.
    pub fn parse(value: &str) -> ResultEngine<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput(
                "currency code must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The code as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, used against the primary currency.
    #[must_use]
    pub fn matches(&self, other: &CurrencyCode) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}
