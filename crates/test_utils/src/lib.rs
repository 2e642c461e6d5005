//! Shared test support for the billing workspace
//!
//! Everything the crate-level test suites lean on lives here: canned
//! fixtures, builders for assembling billing scenarios, in-memory port
//! implementations that stand in for PostgreSQL, money-aware assertions,
//! and proptest generators.
//!
//! # Modules
//!
//! - `fixtures`: canned clients, projects, and billing contexts
//! - `builders`: fluent construction of test entities
//! - `memory`: in-memory implementations of the billing ports
//! - `assertions`: assertion helpers for money and period types
//! - `generators`: proptest strategies for domain values

pub mod fixtures;
pub mod builders;
pub mod memory;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use memory::*;
pub use assertions::*;
pub use generators::*;
