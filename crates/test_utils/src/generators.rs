//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::calendar::days_in_month;
use core_kernel::{ClientId, Currency, DateRange, Money, ProjectId};
use domain_client::{BillingFrequency, ServiceRateTerm};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::SGD),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating Money values with positive amounts
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating positive INR Money values
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::INR))
}

/// Strategy for generating tax rates as fractions (0.0 to 1.0)
pub fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// Strategy for generating billing days that exist in every month
pub fn billing_day_strategy() -> impl Strategy<Value = u32> {
    1u32..29u32
}

/// Strategy for generating billing frequencies
pub fn frequency_strategy() -> impl Strategy<Value = BillingFrequency> {
    prop_oneof![
        Just(BillingFrequency::Monthly),
        Just(BillingFrequency::Quarterly),
        Just(BillingFrequency::Yearly),
    ]
}

/// Strategy for generating optional service rate terms
pub fn rate_term_strategy() -> impl Strategy<Value = Option<ServiceRateTerm>> {
    prop_oneof![
        Just(None),
        Just(Some(ServiceRateTerm::PerHour)),
        Just(Some(ServiceRateTerm::PerMonth)),
        Just(Some(ServiceRateTerm::PerQuarter)),
        Just(Some(ServiceRateTerm::PerYear)),
    ]
}

/// Strategy for generating dates that exist in every month of 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12u32, 1u32..29u32).prop_map(|(month, day)| {
        NaiveDate::from_ymd_opt(2024, month, day).expect("Generated invalid date")
    })
}

/// Strategy for generating whole-month billing periods
pub fn month_period_strategy() -> impl Strategy<Value = DateRange> {
    (2020i32..2030i32, 1u32..=12u32).prop_map(|(year, month)| {
        let start = NaiveDate::from_ymd_opt(year, month, 1).expect("Generated invalid date");
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(start))
            .expect("Generated invalid date");
        DateRange::new(start, end).expect("Generated invalid period")
    })
}

/// Strategy for generating daily effort hours (0.25 to 12.00)
pub fn effort_hours_strategy() -> impl Strategy<Value = Decimal> {
    (25u32..1201u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for generating billing engagement percentages (0% to 100%)
pub fn engagement_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10001u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for generating ClientId
pub fn client_id_strategy() -> impl Strategy<Value = ClientId> {
    any::<[u8; 16]>().prop_map(|bytes| ClientId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating ProjectId
pub fn project_id_strategy() -> impl Strategy<Value = ProjectId> {
    any::<[u8; 16]>().prop_map(|bytes| ProjectId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}".prop_map(|s| s)
}
