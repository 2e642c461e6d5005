//! Billing period date computation
//!
//! Invoice periods are anchored to the client's billing day-of-month. The
//! start comes from the last sent invoice (or the project's creation when
//! none exists), pushed forward if the client was re-marked active later;
//! the end is the day before the billing day, one frequency later.

use chrono::{Datelike, Duration, NaiveDate};

use core_kernel::calendar::{add_months_no_overflow, first_of_month, with_day_clamped};
use core_kernel::DateRange;
use domain_client::BillingFrequency;

/// The start date of the next invoice period
///
/// Both the anchor and the client's last-marked-active date are reset to the
/// billing day of their month (clamped to month length); the later of the
/// two wins. A client never marked active contributes nothing.
pub fn period_start(
    anchor: NaiveDate,
    last_marked_active: Option<NaiveDate>,
    billing_day: u32,
) -> NaiveDate {
    let from_anchor = with_day_clamped(anchor, billing_day);
    match last_marked_active {
        Some(active) => from_anchor.max(with_day_clamped(active, billing_day)),
        None => from_anchor,
    }
}

/// The end date of an invoice period
///
/// The start moves forward by the frequency's months (overflow-safe), snaps
/// to the first of that month, and lands on the day before the billing day.
/// A billing day of 1 ends the period on the last day of the prior month.
pub fn period_end(start: NaiveDate, frequency: BillingFrequency, billing_day: u32) -> NaiveDate {
    let advanced = add_months_no_overflow(start, frequency.months());
    let month_start = first_of_month(advanced);
    if billing_day <= 1 {
        month_start.pred_opt().expect("date out of range")
    } else {
        with_day_clamped(month_start, billing_day - 1)
    }
}

/// The full invoice period for an anchor date
pub fn billing_period(
    anchor: NaiveDate,
    last_marked_active: Option<NaiveDate>,
    frequency: BillingFrequency,
    billing_day: u32,
) -> DateRange {
    let start = period_start(anchor, last_marked_active, billing_day);
    let end = period_end(start, frequency, billing_day);
    DateRange { start, end }
}

/// When the next invoice should go out, for reminders and display
///
/// Two days ahead of the anchor-plus-frequency date, so the invoice is
/// prepared before the period turns over.
pub fn next_billing_date(anchor: NaiveDate, frequency: BillingFrequency) -> NaiveDate {
    add_months_no_overflow(anchor, frequency.months()) - Duration::days(2)
}

/// Whether a project is due for invoicing today
///
/// Due once per calendar month: nothing sent this month yet and the billing
/// day has been reached.
pub fn invoice_due(last_sent_on: Option<NaiveDate>, billing_day: u32, today: NaiveDate) -> bool {
    let sent_this_month = last_sent_on
        .map(|sent| sent.year() == today.year() && sent.month() == today.month())
        .unwrap_or(false);

    !sent_this_month && billing_day <= today.day()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::calendar::elapsed_whole_months;
    use proptest::prelude::*;

    fn any_frequency() -> impl Strategy<Value = BillingFrequency> {
        prop_oneof![
            Just(BillingFrequency::Monthly),
            Just(BillingFrequency::Quarterly),
            Just(BillingFrequency::Yearly),
        ]
    }

    proptest! {
        // Billing days past 28 can clamp the start inside February, which
        // shifts the elapsed-month reading; those cases are pinned by unit
        // tests instead.
        #[test]
        fn period_elapsed_months_identify_the_frequency(
            year in 2015i32..2035,
            month in 1u32..=12,
            billing_day in 1u32..=28,
            frequency in any_frequency(),
        ) {
            let anchor = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let start = with_day_clamped(anchor, billing_day);
            let end = period_end(start, frequency, billing_day);

            prop_assert!(end > start);
            prop_assert_eq!(
                elapsed_whole_months(start, end),
                frequency.months() - 1
            );
        }

        #[test]
        fn period_start_is_never_before_either_input_month(
            year in 2015i32..2035,
            month in 1u32..=12,
            day in 1u32..=28,
            billing_day in 1u32..=31,
        ) {
            let anchor = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let start = period_start(anchor, None, billing_day);

            prop_assert_eq!(start.year(), anchor.year());
            prop_assert_eq!(start.month(), anchor.month());
        }
    }
}
