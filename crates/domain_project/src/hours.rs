//! Hours calculators
//!
//! Expected hours project how much a fully-logged month would amount to:
//! every active member's expected daily effort times the working days in the
//! window. Billed hours sum what was actually logged. Velocity is their
//! ratio and drives the monthly delivery review alongside invoicing.

use chrono::Duration;
use rust_decimal::Decimal;

use core_kernel::{round_half_up, DateRange};

use crate::team::TeamMember;

/// Expected hours for a number of working days
///
/// Sums `daily_expected_effort * working_days` over the active roster,
/// rounded half-up to two decimals.
pub fn expected_hours(members: &[TeamMember], working_days: u32) -> Decimal {
    let days = Decimal::from(working_days);
    let total: Decimal = members
        .iter()
        .filter(|m| m.is_active())
        .map(|m| m.daily_expected_effort * days)
        .sum();

    round_half_up(total, 2)
}

/// Expected hours over a date range, weekends excluded
pub fn expected_hours_for(members: &[TeamMember], range: &DateRange) -> Decimal {
    expected_hours(members, range.working_day_count())
}

/// Hours actually logged inside the range, over the full roster
///
/// Former members count too; their effort belongs to the window it was
/// logged in. A member without an effort log contributes zero.
pub fn hours_booked(members: &[TeamMember], range: &DateRange) -> Decimal {
    members
        .iter()
        .map(|member| match &member.effort_log {
            Some(log) => log.total_between(range),
            None => Decimal::ZERO,
        })
        .sum()
}

/// Hours logged by the active roster for the running month window
///
/// The live reading starts one day before the window so effort logged
/// against the evening the window opened is not dropped.
pub fn live_hours_booked(members: &[TeamMember], window: &DateRange) -> Decimal {
    let widened = DateRange {
        start: window.start - Duration::days(1),
        end: window.end,
    };
    members
        .iter()
        .filter(|m| m.is_active())
        .map(|member| match &member.effort_log {
            Some(log) => log.total_between(&widened),
            None => Decimal::ZERO,
        })
        .sum()
}

/// Billed hours relative to expected hours, rounded to two decimals
///
/// Zero expected hours reads as zero velocity, never a division error.
pub fn velocity(billed_hours: Decimal, expected_hours: Decimal) -> Decimal {
    if expected_hours.is_zero() {
        return Decimal::ZERO;
    }
    round_half_up(billed_hours / expected_hours, 2)
}
