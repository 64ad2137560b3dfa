//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidUserId`] thrown when a user identifier is not a finite integer.
//!   This is the only failure of the summary computation itself.
//! - [`KeyNotFound`] thrown when an item is not found in storage.
//! - [`CorruptRecord`] thrown when a stored row cannot be decoded.
//!
//!  [`InvalidUserId`]: EngineError::InvalidUserId
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`CorruptRecord`]: EngineError::CorruptRecord
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid userId: {0}")]
    InvalidUserId(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidUserId(a), Self::InvalidUserId(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::CorruptRecord(a), Self::CorruptRecord(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
