//! Client billing configuration
//!
//! This module defines the billing frequency and rate configuration a client
//! is invoiced under, and the billing-day-anchored month windows that effort
//! aggregation and expected-hours calculations run over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::calendar::{
    add_months_no_overflow, first_of_month, sub_months_no_overflow, with_day_clamped,
};
use core_kernel::{DateRange, Money};

use crate::error::ClientError;

/// How often a client is invoiced
///
/// Stored as numeric codes: monthly is 1, quarterly is 3, yearly is 4.
/// Historical client rows also carry code 2 for monthly accounts; both codes
/// decode to the same frequency so either generation of data bills alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingFrequency {
    /// Decodes a stored frequency code, `None` when unrecognized
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 | 2 => Some(BillingFrequency::Monthly),
            3 => Some(BillingFrequency::Quarterly),
            4 => Some(BillingFrequency::Yearly),
            _ => None,
        }
    }

    /// Decodes a stored frequency code, treating unrecognized codes as monthly
    pub fn from_code_lossy(code: i16) -> Self {
        Self::from_code(code).unwrap_or(BillingFrequency::Monthly)
    }

    /// The canonical stored code for this frequency
    pub fn code(&self) -> i16 {
        match self {
            BillingFrequency::Monthly => 1,
            BillingFrequency::Quarterly => 3,
            BillingFrequency::Yearly => 4,
        }
    }

    /// Number of calendar months in one billing cycle
    pub fn months(&self) -> u32 {
        match self {
            BillingFrequency::Monthly => 1,
            BillingFrequency::Quarterly => 3,
            BillingFrequency::Yearly => 12,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BillingFrequency::Monthly => "Monthly",
            BillingFrequency::Quarterly => "Quarterly",
            BillingFrequency::Yearly => "Yearly",
        }
    }
}

/// The unit a service rate is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRateTerm {
    PerHour,
    PerMonth,
    PerQuarter,
    PerYear,
}

impl ServiceRateTerm {
    /// Parses the stored term string, `None` when unrecognized or empty
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "per_hour" => Some(ServiceRateTerm::PerHour),
            "per_month" => Some(ServiceRateTerm::PerMonth),
            "per_quarter" => Some(ServiceRateTerm::PerQuarter),
            "per_year" => Some(ServiceRateTerm::PerYear),
            _ => None,
        }
    }

    /// The stored string for this term
    pub fn as_db_value(&self) -> &'static str {
        match self {
            ServiceRateTerm::PerHour => "per_hour",
            ServiceRateTerm::PerMonth => "per_month",
            ServiceRateTerm::PerQuarter => "per_quarter",
            ServiceRateTerm::PerYear => "per_year",
        }
    }

    /// Calendar months one unit of the rate covers
    ///
    /// An hourly rate accumulates over a month of booked hours, so it counts
    /// as a one-month term for cycle scaling.
    pub fn months(&self) -> u32 {
        match self {
            ServiceRateTerm::PerHour | ServiceRateTerm::PerMonth => 1,
            ServiceRateTerm::PerQuarter => 3,
            ServiceRateTerm::PerYear => 12,
        }
    }
}

/// Billing configuration for a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientBillingDetails {
    /// Invoicing cadence
    pub frequency: BillingFrequency,
    /// Day of month that anchors invoice periods (1-31)
    pub billing_day: u32,
    /// The client-level service rate
    pub service_rate: Money,
    /// Unit the service rate is quoted in, when configured
    pub service_rate_term: Option<ServiceRateTerm>,
    /// Flat bank charges added to each invoice, when configured
    pub bank_charges: Option<Money>,
}

impl ClientBillingDetails {
    /// Creates billing details, validating the billing day and currencies
    pub fn new(
        frequency: BillingFrequency,
        billing_day: u32,
        service_rate: Money,
    ) -> Result<Self, ClientError> {
        if !(1..=31).contains(&billing_day) {
            return Err(ClientError::InvalidBillingDay(billing_day));
        }
        Ok(Self {
            frequency,
            billing_day,
            service_rate,
            service_rate_term: None,
            bank_charges: None,
        })
    }

    /// Sets the service rate term
    pub fn with_rate_term(mut self, term: ServiceRateTerm) -> Self {
        self.service_rate_term = Some(term);
        self
    }

    /// Sets the bank charges
    pub fn with_bank_charges(mut self, charges: Money) -> Result<Self, ClientError> {
        if charges.currency() != self.service_rate.currency() {
            return Err(ClientError::BankChargesCurrencyMismatch(
                charges.currency().to_string(),
                self.service_rate.currency().to_string(),
            ));
        }
        self.bank_charges = Some(charges);
        Ok(self)
    }

    /// Bank charges, or zero when none are configured
    pub fn bank_charges_or_zero(&self) -> Money {
        self.bank_charges
            .unwrap_or_else(|| Money::zero(self.service_rate.currency()))
    }

    /// The billing month window `months_to_subtract` windows before today
    ///
    /// Windows run from the billing day to the day before the next billing
    /// day. Zero means the window containing today; one means the last
    /// completed window, which is what invoicing bills.
    pub fn month_window(&self, today: NaiveDate, months_to_subtract: u32) -> DateRange {
        let mut anchor_month = first_of_month(today);
        if with_day_clamped(today, self.billing_day) > today {
            anchor_month = sub_months_no_overflow(anchor_month, 1);
        }
        let start_month = sub_months_no_overflow(anchor_month, months_to_subtract);
        let start = with_day_clamped(start_month, self.billing_day);
        let end = with_day_clamped(add_months_no_overflow(start_month, 1), self.billing_day)
            .pred_opt()
            .expect("date out of range");

        DateRange { start, end }
    }

    /// The window invoicing bills by default, the last completed one
    pub fn completed_month_window(&self, today: NaiveDate) -> DateRange {
        self.month_window(today, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn details(billing_day: u32) -> ClientBillingDetails {
        ClientBillingDetails::new(
            BillingFrequency::Monthly,
            billing_day,
            Money::new(dec!(25), Currency::USD),
        )
        .unwrap()
    }

    #[test]
    fn test_frequency_codes_decode() {
        assert_eq!(BillingFrequency::from_code(1), Some(BillingFrequency::Monthly));
        assert_eq!(BillingFrequency::from_code(2), Some(BillingFrequency::Monthly));
        assert_eq!(BillingFrequency::from_code(3), Some(BillingFrequency::Quarterly));
        assert_eq!(BillingFrequency::from_code(4), Some(BillingFrequency::Yearly));
        assert_eq!(BillingFrequency::from_code(9), None);
        assert_eq!(BillingFrequency::from_code_lossy(9), BillingFrequency::Monthly);
    }

    #[test]
    fn test_rate_term_db_round_trip() {
        for term in [
            ServiceRateTerm::PerHour,
            ServiceRateTerm::PerMonth,
            ServiceRateTerm::PerQuarter,
            ServiceRateTerm::PerYear,
        ] {
            assert_eq!(ServiceRateTerm::from_db_value(term.as_db_value()), Some(term));
        }
        assert_eq!(ServiceRateTerm::from_db_value(""), None);
        assert_eq!(ServiceRateTerm::from_db_value("per_fortnight"), None);
    }

    #[test]
    fn test_billing_day_is_validated() {
        let rate = Money::new(dec!(25), Currency::USD);
        assert!(matches!(
            ClientBillingDetails::new(BillingFrequency::Monthly, 0, rate),
            Err(ClientError::InvalidBillingDay(0))
        ));
        assert!(matches!(
            ClientBillingDetails::new(BillingFrequency::Monthly, 32, rate),
            Err(ClientError::InvalidBillingDay(32))
        ));
    }

    #[test]
    fn test_current_window_contains_today() {
        let d = details(15);

        // After the billing day: window starts this month
        let window = d.month_window(date(2024, 5, 20), 0);
        assert_eq!(window.start, date(2024, 5, 15));
        assert_eq!(window.end, date(2024, 6, 14));

        // Before the billing day: window started last month
        let window = d.month_window(date(2024, 5, 10), 0);
        assert_eq!(window.start, date(2024, 4, 15));
        assert_eq!(window.end, date(2024, 5, 14));

        // On the billing day itself
        let window = d.month_window(date(2024, 5, 15), 0);
        assert_eq!(window.start, date(2024, 5, 15));
    }

    #[test]
    fn test_completed_window_precedes_current_one() {
        let d = details(1);
        let window = d.completed_month_window(date(2024, 5, 20));
        assert_eq!(window.start, date(2024, 4, 1));
        assert_eq!(window.end, date(2024, 4, 30));
    }

    #[test]
    fn test_window_anchors_clamp_in_short_months() {
        let d = details(31);
        let window = d.month_window(date(2024, 3, 5), 0);
        // February's anchor clamps to the 29th; the window still ends the
        // day before March's true anchor.
        assert_eq!(window.start, date(2024, 2, 29));
        assert_eq!(window.end, date(2024, 3, 30));
    }

    #[test]
    fn test_bank_charges_currency_must_match() {
        let result = details(10).with_bank_charges(Money::new(dec!(5), Currency::INR));
        assert!(matches!(
            result,
            Err(ClientError::BankChargesCurrencyMismatch(_, _))
        ));

        let configured = details(10)
            .with_bank_charges(Money::new(dec!(5), Currency::USD))
            .unwrap();
        assert_eq!(configured.bank_charges_or_zero().amount(), dec!(5));
    }
}
