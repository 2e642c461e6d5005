//! Client domain errors

use thiserror::Error;

/// Errors that can occur in the client domain
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client with the given ID was not found
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Client has no billing details configured
    #[error("Client has no billing details: {0}")]
    MissingBillingDetails(String),

    /// Billing day must fall between 1 and 31
    #[error("Invalid billing day of month: {0}")]
    InvalidBillingDay(u32),

    /// Billing frequency code was not recognized
    #[error("Unknown billing frequency code: {0}")]
    UnknownFrequencyCode(i16),

    /// Bank charges must be denominated in the service rate currency
    #[error("Bank charges currency {0} does not match service rate currency {1}")]
    BankChargesCurrencyMismatch(String, String),
}

impl ClientError {
    /// Creates a ClientNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ClientError::ClientNotFound(id.to_string())
    }

    /// Creates a MissingBillingDetails error from any ID type
    pub fn missing_billing_details(id: impl std::fmt::Display) -> Self {
        ClientError::MissingBillingDetails(id.to_string())
    }
}
