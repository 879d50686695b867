//! The module contains the error the engine can throw.
//!
//! The errors a caller usually branches on are:
//!
//! - [`AccountExists`] thrown when an account name is already taken.
//! - [`KeyNotFound`] thrown when a record does not exist.
//!
//!  [`AccountExists`]: EngineError::AccountExists
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("account \"{0}\" already exists")]
    AccountExists(String),
    #[error("\"{0}\" not found")]
    KeyNotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::AccountExists(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountExists(a), Self::AccountExists(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
