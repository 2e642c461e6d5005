//! Domain Adapters
//!
//! This module provides adapter implementations for the billing ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements a port trait from `domain_billing`
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PgProjectDirectory;
//! use domain_billing::ProjectDirectory;
//!
//! let directory = PgProjectDirectory::new(pool);
//! let context = directory.billing_context(project_id).await?;
//! ```

pub mod billing;

pub use billing::{FinancialYearNumbering, PgInvoiceStore, PgProjectDirectory};
