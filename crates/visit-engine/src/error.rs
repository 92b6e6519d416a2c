//! Error types for visit-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisitError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid business hours: {0}")]
    InvalidHours(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VisitError>;
