//! Billing Domain - Period Amounts and Invoice Dates
//!
//! This crate implements the billing computation chain for client projects:
//! which rate and term apply, what a billing period is worth, and which
//! dates the period runs between.
//!
//! # Computation Chain
//!
//! The calculators compose in a fixed order:
//! - Rate resolution picks the project override or the client default
//! - Tax applies IGST to domestic clients' billable amounts
//! - The period amount scales the base by the billing cycle and adds tax
//!   and bank charges once
//! - The period dates anchor on the client's billing day-of-month
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{billing_period, period_amount, resolve};
//!
//! let resolved = resolve(client.billing_details()?, override_row.as_ref());
//! let period = billing_period(anchor, client.last_marked_active_on,
//!     details.frequency, details.billing_day);
//! let charge = period_amount(term, resolved.source, details.frequency,
//!     &period, &resolved.rate, billed_hours, &tax, &bank_charges)?;
//! ```
//!
//! The `InvoicingService` runs the whole chain over the persistence ports
//! and is what the HTTP layer talks to.

pub mod amount;
pub mod error;
pub mod invoice;
pub mod ledger;
pub mod period;
pub mod ports;
pub mod rates;
pub mod service;
pub mod tax;

pub use amount::{
    amc_billable_hours_display, billable_amount, billing_cycle, cycle_from_elapsed_months,
    cycle_multiplier, period_amount, resource_billable_amount, total_payable, PeriodCharge,
};
pub use error::BillingError;
pub use invoice::{Invoice, InvoiceStatus};
pub use ledger::{
    fiscal_quarter, fiscal_year, net_amount, net_amount_for_quarter, EntryKind, LedgerEntry,
};
pub use period::{billing_period, invoice_due, next_billing_date, period_end, period_start};
pub use ports::{
    BillingContext, InvoiceNumbering, InvoiceStore, PortError, ProjectDirectory, ReadyToInvoice,
};
pub use rates::{resolve, BillingLevel, ProjectBillingDetail, RateSource, ResolvedRate};
pub use service::{InvoicePreview, InvoicingService, RecordInvoiceRequest};
pub use tax::tax_for;
