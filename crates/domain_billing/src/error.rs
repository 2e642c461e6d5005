//! Billing domain errors

use thiserror::Error;

use core_kernel::{CalendarError, InvoiceId, MoneyError};
use domain_client::ClientError;
use domain_project::ProjectError;

use crate::invoice::InvoiceStatus;
use crate::ports::PortError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Port(#[from] PortError),

    /// Invoice lifecycle moves Draft -> Sent -> Paid only
    #[error("Invoice {id} cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        id: InvoiceId,
        from: InvoiceStatus,
        to: InvoiceStatus,
    },
}

impl BillingError {
    /// Whether the underlying cause is a missing record
    pub fn is_not_found(&self) -> bool {
        match self {
            BillingError::Port(err) => err.is_not_found(),
            BillingError::Client(ClientError::ClientNotFound(_)) => true,
            BillingError::Project(ProjectError::ProjectNotFound(_)) => true,
            _ => false,
        }
    }
}
