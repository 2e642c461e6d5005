//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each aggregate. Repositories encapsulate SQL queries
//! and the row structs they decode into; mapping rows onto domain types is
//! the adapters' job.

pub mod invoices;
pub mod projects;

pub use invoices::InvoiceRepository;
pub use projects::ProjectRepository;
