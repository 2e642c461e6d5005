//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the billing
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClientId, Currency, Money, ProjectId, UserId};
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::Fake;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standing domestic hourly rate
    pub fn inr_hourly_rate() -> Money {
        Money::new(dec!(1500), Currency::INR)
    }

    /// Flat bank charges on domestic invoices
    pub fn inr_bank_charges() -> Money {
        Money::new(dec!(500), Currency::INR)
    }

    /// A monthly retainer for overseas clients
    pub fn usd_monthly_rate() -> Money {
        Money::new(dec!(25000), Currency::USD)
    }

    /// A zero INR amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A small USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard project creation instant (Jan 10, 2024 in the billing day)
    pub fn project_created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap()
    }

    /// An instant whose completed billing month (day 1) is April 2024
    pub fn late_may() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 6, 0, 0).unwrap()
    }

    /// First day of the April 2024 billing month
    pub fn billing_month_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    /// Last day of the April 2024 billing month
    pub fn billing_month_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    }

    /// A working Monday inside the April billing month
    pub fn april_monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic client ID for testing
    pub fn client_id() -> ClientId {
        ClientId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic project ID for testing
    pub fn project_id() -> ProjectId {
        ProjectId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic user ID for testing
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}

/// Fixture for generated display strings
pub struct StringFixtures;

impl StringFixtures {
    /// A random plausible client name
    pub fn client_name() -> String {
        CompanyName().fake()
    }

    /// A random plausible project name
    pub fn project_name() -> String {
        CatchPhrase().fake()
    }
}
