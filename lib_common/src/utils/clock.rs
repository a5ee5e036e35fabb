//! # Clock Abstraction
//!
//! The daily provider quota is bucketed by calendar date, so the current
//! time is injected through a trait rather than read ambiently. Tests pin
//! the date; production uses `SystemClock`.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Today's date as a `YYYY-MM-DD` string, used for counter keys.
    fn today(&self) -> String {
        self.now_utc().format("%Y-%m-%d").to_string()
    }
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Frozen(DateTime<Utc>);

    impl Clock for Frozen {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn today_formats_as_calendar_date() {
        let clock = Frozen(Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap());
        assert_eq!(clock.today(), "2025-03-09");
    }
}
