//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence behind the billing ports.
//! Repositories own the SQL and the row structs it decodes into; adapters
//! implement the `domain_billing` port traits on top of them.
//!
//! # Architecture
//!
//! - `pool` - connection pool configuration and creation
//! - `error` - typed database errors with PostgreSQL code mapping
//! - `repositories` - SQL queries per aggregate
//! - `adapters` - port implementations wired into the domain
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::adapters::{FinancialYearNumbering, PgInvoiceStore, PgProjectDirectory};
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! let directory = PgProjectDirectory::new(pool.clone());
//! let invoices = PgInvoiceStore::new(pool.clone());
//! let numbering = FinancialYearNumbering::new(pool, "SP");
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{FinancialYearNumbering, PgInvoiceStore, PgProjectDirectory};
pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::{InvoiceRepository, ProjectRepository};
