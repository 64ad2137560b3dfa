//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `LEDGER__*` environment
//! variables (e.g. `LEDGER__SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    /// Default primary currency of summaries.
    pub primary_currency: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(File::with_name("settings").required(false))
    }

    fn load<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.primary_currency", engine::DEFAULT_PRIMARY_CURRENCY)?
            .add_source(file)
            .add_source(Environment::with_prefix("LEDGER").prefix_separator("__").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
