use sea_orm::DatabaseConnection;

use crate::{CurrencyCode, ResultEngine};

mod audit;
mod rates;
mod transactions;

/// Primary currency used when neither the caller nor the configuration
/// provides one.
pub const DEFAULT_PRIMARY_CURRENCY: &str = "USD";

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Facade over the transaction source, the FX rate table and the audit log.
///
/// The summary itself is computed by [`summarize`](crate::summarize); the
/// engine only loads its input and supplies the default primary currency.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    primary_currency: CurrencyCode,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Primary currency used when a request does not name one.
    pub fn default_primary_currency(&self) -> &CurrencyCode {
        &self.primary_currency
    }

    /// Resolves a requested primary currency; missing or blank values fall
    /// back to the configured default.
    fn resolve_primary_currency(&self, requested: Option<&str>) -> CurrencyCode {
        requested
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map_or_else(|| self.primary_currency.clone(), CurrencyCode::new)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    primary_currency: Option<CurrencyCode>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Process-wide default primary currency.
    pub fn primary_currency(mut self, code: CurrencyCode) -> EngineBuilder {
        self.primary_currency = Some(code);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            primary_currency: self
                .primary_currency
                .unwrap_or_else(|| CurrencyCode::new(DEFAULT_PRIMARY_CURRENCY)),
        })
    }
}
