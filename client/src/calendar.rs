//! Reference calendar
//!
//! "Today" is always the date in Asia/Tokyo, whatever the local clock says,
//! so seasonal calibration tracks the region the pollen seasons describe.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub const REFERENCE_TZ: Tz = chrono_tz::Asia::Tokyo;

/// Calendar date of `instant` in the reference zone
pub fn reference_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&REFERENCE_TZ).date_naive()
}

pub fn today_in_reference_zone() -> NaiveDate {
    SystemClock.today()
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        reference_date(self.now())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reference_date_crosses_midnight_early() {
        // 15:30 UTC is 00:30 the next day in Tokyo
        let instant = Utc.with_ymd_and_hms(2025, 3, 31, 15, 30, 0).unwrap();
        assert_eq!(
            reference_date(instant),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
    }

    #[test]
    fn test_reference_date_same_day() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 31, 14, 59, 59).unwrap();
        assert_eq!(
            FixedClock(instant).today(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
    }
}
