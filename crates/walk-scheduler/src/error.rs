//! Error types for walk-scheduler operations.
//!
//! "Nothing available" is never an error: generators return an empty
//! collection for that case. Errors are reserved for malformed input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid time format: {0}")]
    Format(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Availability source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
