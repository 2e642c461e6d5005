//! Core Kernel - Foundational types and utilities for the billing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar arithmetic for billing periods and working days
//! - Common identifiers and injected settings

pub mod calendar;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod settings;

pub use calendar::{CalendarError, DateRange, Timezone};
pub use error::CoreError;
pub use identifiers::{ClientId, InvoiceId, LedgerEntryId, ProjectId, TeamMemberId, UserId};
pub use money::{round_half_up, Currency, Money, MoneyError, Rate};
pub use settings::BillingSettings;
