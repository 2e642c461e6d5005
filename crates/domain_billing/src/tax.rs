//! Invoice tax computation
//!
//! Domestic clients are charged IGST on the billable amount; overseas
//! invoices carry no tax. The rate comes from the injected billing settings.
//
// TODO: split domestic tax into CGST/SGST for intra-state invoices instead
// of charging flat IGST.

use core_kernel::{BillingSettings, Money};
use domain_client::Client;

/// Tax on a billable amount for the given client
pub fn tax_for(billable_amount: &Money, client: &Client, settings: &BillingSettings) -> Money {
    if client.is_domestic() {
        settings.igst().apply(billable_amount).rounded()
    } else {
        Money::zero(billable_amount.currency())
    }
}
