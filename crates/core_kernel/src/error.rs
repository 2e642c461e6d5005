//! Errors shared by the kernel types

use crate::calendar::CalendarError;
use crate::money::MoneyError;
use thiserror::Error;

/// Umbrella error for kernel-level failures
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
