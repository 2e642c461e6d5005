//! Client Domain
//!
//! This crate manages client accounts and the billing configuration attached
//! to them: billing frequency, the billing day-of-month that anchors invoice
//! periods, service rates with their rate term, and bank charges.
//!
//! The billing computations themselves live in `domain_billing`; this crate
//! owns the client-side inputs they consume.

pub mod billing_details;
pub mod client;
pub mod error;

pub use billing_details::{BillingFrequency, ClientBillingDetails, ServiceRateTerm};
pub use client::{Client, CountryCode};
pub use error::ClientError;
