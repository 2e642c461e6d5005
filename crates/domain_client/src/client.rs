//! Client aggregate
//!
//! A client is the account a project is billed to. Tax treatment keys on the
//! client's country, and invoice periods anchor on dates carried here: the
//! billing-detail configuration and the date the client was last marked
//! active.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;

use crate::billing_details::ClientBillingDetails;
use crate::error::ClientError;

/// ISO 3166-1 alpha-2 country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domestic clients are the ones IGST applies to
    pub fn is_india(&self) -> bool {
        self.0 == "IN"
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Country the client is invoiced in
    pub country: CountryCode,
    /// When the client was last marked active, if ever
    ///
    /// Reactivating a dormant client moves the next invoice period's start
    /// forward to this date.
    pub last_marked_active_on: Option<NaiveDate>,
    /// Billing configuration, absent until the account is set up for invoicing
    pub billing_details: Option<ClientBillingDetails>,
}

impl Client {
    /// Creates a new client
    pub fn new(name: impl Into<String>, country: CountryCode) -> Self {
        Self {
            id: ClientId::new_v7(),
            name: name.into(),
            country,
            last_marked_active_on: None,
            billing_details: None,
        }
    }

    /// Sets the billing configuration
    pub fn with_billing_details(mut self, details: ClientBillingDetails) -> Self {
        self.billing_details = Some(details);
        self
    }

    /// Records the date the client was last marked active
    pub fn with_last_marked_active(mut self, date: NaiveDate) -> Self {
        self.last_marked_active_on = Some(date);
        self
    }

    /// Whether the domestic tax rate applies to this client
    pub fn is_domestic(&self) -> bool {
        self.country.is_india()
    }

    /// The billing configuration, required for any invoicing computation
    pub fn billing_details(&self) -> Result<&ClientBillingDetails, ClientError> {
        self.billing_details
            .as_ref()
            .ok_or_else(|| ClientError::missing_billing_details(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing_details::BillingFrequency;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    #[test]
    fn test_country_code_normalizes_case() {
        assert_eq!(CountryCode::new("in").as_str(), "IN");
        assert!(CountryCode::new("in").is_india());
        assert!(!CountryCode::new("US").is_india());
    }

    #[test]
    fn test_billing_details_are_a_precondition() {
        let client = Client::new("Acme Corp", CountryCode::new("US"));
        assert!(matches!(
            client.billing_details(),
            Err(ClientError::MissingBillingDetails(_))
        ));

        let details = ClientBillingDetails::new(
            BillingFrequency::Monthly,
            1,
            Money::new(dec!(40), Currency::USD),
        )
        .unwrap();
        let client = client.with_billing_details(details);
        assert!(client.billing_details().is_ok());
    }

    #[test]
    fn test_domestic_check_follows_country() {
        let domestic = Client::new("Chai Point", CountryCode::new("IN"));
        assert!(domestic.is_domestic());

        let overseas = Client::new("Acme Corp", CountryCode::new("GB"));
        assert!(!overseas.is_domestic());
    }
}
