//! Actual effort records
//!
//! Team members log the hours they actually worked, dated by the day the
//! effort was added. Billed hours sum these records over a billing month
//! window. A member may have no effort tracking at all, which billing treats
//! as zero booked hours rather than an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::DateRange;

/// One logged effort record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEntry {
    /// Day the effort was recorded against
    pub added_on: NaiveDate,
    /// Hours actually worked
    pub actual_effort: Decimal,
}

impl EffortEntry {
    pub fn new(added_on: NaiveDate, actual_effort: Decimal) -> Self {
        Self {
            added_on,
            actual_effort,
        }
    }
}

/// The effort records of one team member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffortLog {
    entries: Vec<EffortEntry>,
}

impl EffortLog {
    pub fn new(entries: Vec<EffortEntry>) -> Self {
        Self { entries }
    }

    pub fn add(&mut self, entry: EffortEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EffortEntry] {
        &self.entries
    }

    /// Sum of actual effort recorded inside the range, both ends inclusive
    pub fn total_between(&self, range: &DateRange) -> Decimal {
        self.entries
            .iter()
            .filter(|entry| range.contains(entry.added_on))
            .map(|entry| entry.actual_effort)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_between_sums_inclusive_bounds() {
        let log = EffortLog::new(vec![
            EffortEntry::new(date(2024, 4, 1), dec!(8)),
            EffortEntry::new(date(2024, 4, 15), dec!(6.5)),
            EffortEntry::new(date(2024, 4, 30), dec!(7)),
            EffortEntry::new(date(2024, 5, 1), dec!(8)),
        ]);
        let april = DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();

        assert_eq!(log.total_between(&april), dec!(21.5));
    }

    #[test]
    fn test_empty_log_sums_to_zero() {
        let log = EffortLog::default();
        let range = DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();
        assert_eq!(log.total_between(&range), Decimal::ZERO);
    }
}
