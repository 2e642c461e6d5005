//! Period amount computation
//!
//! One parameterized calculation covers every rate term and rate source.
//! The billing cycle says how long the invoiced period is; the rate term
//! says how long one unit of the rate covers; their ratio scales the base
//! amount. Tax and bank charges are added to the scaled base exactly once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::calendar::elapsed_whole_months;
use core_kernel::{round_half_up, DateRange, Money, MoneyError};
use domain_client::{BillingFrequency, ServiceRateTerm};
use domain_project::EngagementGroup;

use crate::rates::RateSource;

/// Billing cycle inferred from the elapsed whole months of a period
///
/// Periods produced by the date calculator land exactly on 0, 2 or 11
/// elapsed months for monthly, quarterly and yearly cycles; anything else
/// reads as monthly.
pub fn cycle_from_elapsed_months(months: u32) -> BillingFrequency {
    match months {
        0 => BillingFrequency::Monthly,
        2 => BillingFrequency::Quarterly,
        11 => BillingFrequency::Yearly,
        _ => BillingFrequency::Monthly,
    }
}

/// The billing cycle for a resolved rate
///
/// A project-sourced rate reads its cycle off the period length; a
/// client-sourced rate bills on the client's configured frequency.
pub fn billing_cycle(
    source: RateSource,
    client_frequency: BillingFrequency,
    period: &DateRange,
) -> BillingFrequency {
    match source {
        RateSource::Project => {
            cycle_from_elapsed_months(elapsed_whole_months(period.start, period.end))
        }
        RateSource::Client => client_frequency,
    }
}

/// How many rate units the billing cycle spans
///
/// The ratio applies only when it is a whole number of units; a cycle
/// shorter than the term bills one full unit. A per-year term therefore
/// never scales: no shorter cycle divides it and a yearly cycle is exactly
/// one unit.
pub fn cycle_multiplier(cycle: BillingFrequency, term: ServiceRateTerm) -> Decimal {
    let cycle_months = cycle.months();
    let term_months = term.months();
    if cycle_months >= term_months && cycle_months % term_months == 0 {
        Decimal::from(cycle_months / term_months)
    } else {
        Decimal::ONE
    }
}

/// The month's billable amount under an hourly rate
pub fn billable_amount(rate: &Money, billed_hours: Decimal) -> Money {
    rate.multiply(billed_hours).rounded()
}

/// Billable amount plus tax plus bank charges
pub fn total_payable(billable: &Money, tax: &Money, bank_charges: &Money) -> Result<Money, MoneyError> {
    Ok(billable.checked_add(tax)?.checked_add(bank_charges)?.rounded())
}

/// The computed charge for one billing period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodCharge {
    /// Scaled base amount, before tax and charges
    pub amount: Money,
    /// Amount plus tax plus bank charges
    pub total: Money,
}

/// The amount owed for one billing period
///
/// The base is the month's billable amount for an hourly term and the rate
/// itself for the fixed terms, scaled by the cycle multiplier. Tax and bank
/// charges are added once, never scaled.
pub fn period_amount(
    term: ServiceRateTerm,
    source: RateSource,
    client_frequency: BillingFrequency,
    period: &DateRange,
    rate: &Money,
    billed_hours: Decimal,
    tax: &Money,
    bank_charges: &Money,
) -> Result<PeriodCharge, MoneyError> {
    let cycle = billing_cycle(source, client_frequency, period);
    let multiplier = cycle_multiplier(cycle, term);

    let base = match term {
        ServiceRateTerm::PerHour => billable_amount(rate, billed_hours),
        ServiceRateTerm::PerMonth | ServiceRateTerm::PerQuarter | ServiceRateTerm::PerYear => *rate,
    };

    let amount = base.multiply(multiplier).rounded();
    let total = total_payable(&amount, tax, bank_charges)?;
    Ok(PeriodCharge { amount, total })
}

/// Billable amount for a resource-contracted roster
///
/// Each engagement group bills `engagement% x headcount x rate`, scaled to
/// three months on a quarterly frequency and left unscaled otherwise.
pub fn resource_billable_amount(
    groups: &[EngagementGroup],
    rate: &Money,
    frequency: BillingFrequency,
) -> Money {
    let months = match frequency {
        BillingFrequency::Quarterly => dec!(3),
        _ => dec!(1),
    };

    let total: Decimal = groups
        .iter()
        .map(|group| {
            (group.billing_engagement / dec!(100))
                * Decimal::from(group.resource_count)
                * rate.amount()
                * months
        })
        .sum();

    Money::new(round_half_up(total, 2), rate.currency())
}

/// Billed hours scaled to the billing cycle, shown on AMC invoices
///
/// Only meaningful when the resolved term is hourly; fixed-term contracts
/// show no hours figure.
pub fn amc_billable_hours_display(
    term: Option<ServiceRateTerm>,
    billed_hours: Decimal,
    cycle: BillingFrequency,
) -> Option<Decimal> {
    match term {
        Some(ServiceRateTerm::PerHour) => Some(round_half_up(
            billed_hours * Decimal::from(cycle.months()),
            2,
        )),
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_frequency() -> impl Strategy<Value = BillingFrequency> {
        prop_oneof![
            Just(BillingFrequency::Monthly),
            Just(BillingFrequency::Quarterly),
            Just(BillingFrequency::Yearly),
        ]
    }

    fn any_term() -> impl Strategy<Value = ServiceRateTerm> {
        prop_oneof![
            Just(ServiceRateTerm::PerHour),
            Just(ServiceRateTerm::PerMonth),
            Just(ServiceRateTerm::PerQuarter),
            Just(ServiceRateTerm::PerYear),
        ]
    }

    proptest! {
        #[test]
        fn multiplier_is_a_positive_whole_number(
            cycle in any_frequency(),
            term in any_term(),
        ) {
            let multiplier = cycle_multiplier(cycle, term);
            prop_assert!(multiplier >= Decimal::ONE);
            prop_assert_eq!(multiplier.fract(), Decimal::ZERO);
        }

        #[test]
        fn elapsed_months_outside_the_table_read_as_monthly(months in 0u32..48) {
            let cycle = cycle_from_elapsed_months(months);
            match months {
                2 => prop_assert_eq!(cycle, BillingFrequency::Quarterly),
                11 => prop_assert_eq!(cycle, BillingFrequency::Yearly),
                _ => prop_assert_eq!(cycle, BillingFrequency::Monthly),
            }
        }
    }
}
