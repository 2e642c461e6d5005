//! Billing settings injected into the calculators
//!
//! The computation chain never reads global configuration; every calculator
//! that needs a constant receives it through this struct. Values are loaded
//! from the environment at the interface layer and default to the
//! organization's standing configuration.

use crate::calendar::{effective_working_date, Timezone};
use crate::money::Rate;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Constants the billing chain depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSettings {
    /// Timezone of the billing calendar
    pub timezone: Timezone,
    /// Local time before which the current day is not counted as started
    pub day_cutoff: NaiveTime,
    /// IGST rate applied to domestic clients, as a decimal fraction
    pub igst_rate: Decimal,
}

impl BillingSettings {
    /// The IGST rate as an applicable percentage rate
    pub fn igst(&self) -> Rate {
        Rate::new(self.igst_rate)
    }

    /// The local calendar date for a UTC instant
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.timezone.local_date(now)
    }

    /// The date effort accounting treats as today, honoring the day cutoff
    pub fn effective_today(&self, now: DateTime<Utc>) -> NaiveDate {
        effective_working_date(self.timezone.to_local(now), self.day_cutoff)
    }
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            timezone: Timezone::new(chrono_tz::Asia::Kolkata),
            day_cutoff: NaiveTime::from_hms_opt(10, 0, 0).expect("valid cutoff time"),
            igst_rate: dec!(0.18),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let settings = BillingSettings::default();
        assert_eq!(settings.timezone.0.name(), "Asia/Kolkata");
        assert_eq!(settings.igst().as_percentage(), dec!(18));
    }

    #[test]
    fn test_effective_today_steps_back_before_cutoff() {
        let settings = BillingSettings::default();
        // 03:00 UTC is 08:30 in Kolkata, before the 10:00 cutoff
        let before = Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap();
        assert_eq!(
            settings.effective_today(before),
            NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
        );

        // 06:00 UTC is 11:30 in Kolkata
        let after = Utc.with_ymd_and_hms(2024, 5, 10, 6, 0, 0).unwrap();
        assert_eq!(
            settings.effective_today(after),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = BillingSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: BillingSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
