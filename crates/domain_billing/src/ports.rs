//! Billing domain ports
//!
//! Port traits decouple the invoicing service from storage. The PostgreSQL
//! adapters live in `infra_db`; the in-memory fakes used by tests live in
//! `test_utils`. Every invocation reads fresh data through these traits, so
//! nothing here caches.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{ClientId, ProjectId};
use domain_client::Client;
use domain_project::Project;

use crate::invoice::Invoice;
use crate::rates::{BillingLevel, ProjectBillingDetail};

/// Errors surfaced by port implementations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stored value could not be mapped into a domain type
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        PortError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an InvalidData error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        PortError::InvalidData(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl std::fmt::Display) -> Self {
        PortError::Storage(message.to_string())
    }

    /// Returns true for NotFound errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// A project loaded with everything billing needs
///
/// One load carries the project and roster, the owning client, the optional
/// billing override row and the invoicing level.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingContext {
    pub project: Project,
    pub client: Client,
    pub billing_detail: Option<ProjectBillingDetail>,
    pub billing_level: BillingLevel,
}

/// A row in the ready-to-invoice listing
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyToInvoice {
    pub project_id: ProjectId,
    pub project_name: String,
    pub client_id: ClientId,
    pub client_name: String,
    pub billing_day: u32,
    pub last_sent_on: Option<NaiveDate>,
}

/// Read access to projects and their billing configuration
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Loads a project with its client, override row and roster
    async fn billing_context(&self, id: ProjectId) -> Result<BillingContext, PortError>;

    /// Projects due for invoicing as of the given date
    ///
    /// Due means active, nothing sent this calendar month, and the client's
    /// billing day already reached.
    async fn ready_to_invoice(&self, today: NaiveDate) -> Result<Vec<ReadyToInvoice>, PortError>;
}

/// Invoice persistence
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// The most recently sent invoice for a project, by sent date
    async fn last_sent(&self, project_id: ProjectId) -> Result<Option<Invoice>, PortError>;

    /// All invoices recorded for a project, newest first
    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Invoice>, PortError>;

    /// Persists a recorded invoice
    async fn record(&self, invoice: &Invoice) -> Result<(), PortError>;
}

/// Invoice number allocation
///
/// The format is owned by the adapter; the domain treats numbers as opaque
/// strings.
#[async_trait]
pub trait InvoiceNumbering: Send + Sync {
    /// The number the next invoice for this project would carry
    async fn next_number(
        &self,
        client_id: ClientId,
        project_id: ProjectId,
        reference_date: NaiveDate,
        level: BillingLevel,
    ) -> Result<String, PortError>;
}
