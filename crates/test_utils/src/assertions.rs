//! Assertion helpers for the billing domain
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than the standard macros.

use chrono::NaiveDate;
use core_kernel::{DateRange, Money};
use rust_decimal::Decimal;

/// Checks two amounts agree within `tolerance` and share a currency
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Fails unless the amount is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Fails unless the amount is exactly zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Fails unless the parts add up to `total`
///
/// # Panics
///
/// Panics if the parts carry mixed currencies or don't add up to `total`.
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = parts.iter().fold(Money::zero(total.currency()), |acc, m| {
        acc.checked_add(m).expect("Currency mismatch in sum")
    });

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({})",
        sum.amount(),
        total.amount()
    );
}

/// Asserts that a billing period contains a specific date
pub fn assert_period_contains(period: &DateRange, date: NaiveDate) {
    assert!(
        period.contains(date),
        "Period {} to {} does not contain {}",
        period.start,
        period.end,
        date
    );
}

/// Asserts that a billing period does not contain a specific date
pub fn assert_period_excludes(period: &DateRange, date: NaiveDate) {
    assert!(
        !period.contains(date),
        "Period {} to {} unexpectedly contains {}",
        period.start,
        period.end,
        date
    );
}

/// Asserts that a billing period runs between the given bounds
pub fn assert_period_spans(period: &DateRange, start: NaiveDate, end: NaiveDate) {
    assert_eq!(
        (period.start, period.end),
        (start, end),
        "Period {} to {} does not span {} to {}",
        period.start,
        period.end,
        start,
        end
    );
}

/// Fails unless `value` lies in `[min, max]`
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Decimal {} is not in range [{}, {}]",
        value,
        min,
        max
    );
}

/// Fails when two decimals differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Unwraps an Ok, failing with the error's Debug form
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Unwraps an Err, failing with the value's Debug form
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Fails unless the result is an Err matching the pattern
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
