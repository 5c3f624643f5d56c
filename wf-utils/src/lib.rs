//! Shared utility functions for waterflow crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Datelike, NaiveDate, Utc};

    /// Number of slots in a leap-normalized calendar year.
    pub const DAYS_PER_YEAR: usize = 365;

    /// Gregorian leap year rule.
    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Convert milliseconds since the epoch into a UTC instant.
    /// Returns `None` when the value falls outside chrono's calendar range.
    pub fn utc_from_millis(millis: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(millis)
    }

    /// Get the 0-based day of year for a date, clamped to the last slot of
    /// the 365 day axis. Unlike [`day_slot`] this does not skip Feb 29, so
    /// only Dec 31 of a leap year is affected by the clamp.
    pub fn start_index(date: &NaiveDate) -> usize {
        (date.ordinal0() as usize).min(DAYS_PER_YEAR - 1)
    }

    /// Get the slot (0-364) of a date on the 365 day axis.
    ///
    /// Feb 29 has no slot and yields `None`. In a leap year every day from
    /// March 1 on moves back one slot so that March 1 always lands on 59.
    pub fn day_slot(date: &NaiveDate) -> Option<usize> {
        let month = date.month();
        let day = date.day();
        if (month, day) == (2, 29) {
            return None;
        }
        let offset = if is_leap_year(date.year()) && month > 2 {
            2
        } else {
            1
        };
        (date.ordinal() as usize)
            .checked_sub(offset)
            .filter(|slot| *slot < DAYS_PER_YEAR)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_is_leap_year() {
            assert!(is_leap_year(2000));
            assert!(is_leap_year(2024));
            assert!(!is_leap_year(1900));
            assert!(!is_leap_year(2023));
        }

        #[test]
        fn test_day_slot() {
            let jan1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            assert_eq!(day_slot(&jan1), Some(0));

            let feb28 = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
            assert_eq!(day_slot(&feb28), Some(58));

            let feb29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
            assert_eq!(day_slot(&feb29), None);

            // March 1 shares a slot in leap and common years
            let mar1_leap = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            let mar1_common = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
            assert_eq!(day_slot(&mar1_leap), Some(59));
            assert_eq!(day_slot(&mar1_common), Some(59));

            let dec31_leap = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
            let dec31_common = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
            assert_eq!(day_slot(&dec31_leap), Some(364));
            assert_eq!(day_slot(&dec31_common), Some(364));
        }

        #[test]
        fn test_start_index() {
            let jan1 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
            assert_eq!(start_index(&jan1), 0);

            // no leap shift: March 1 of a leap year is day 60
            let mar1_leap = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            assert_eq!(start_index(&mar1_leap), 60);

            let dec31_leap = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
            assert_eq!(start_index(&dec31_leap), 364);
        }

        #[test]
        fn test_utc_from_millis() {
            let instant = utc_from_millis(1_609_459_200_000).unwrap();
            assert_eq!(
                instant.date_naive(),
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
            );
            assert!(utc_from_millis(i64::MAX).is_none());
        }
    }
}
