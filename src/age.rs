//! age.rs
//!
//! Calendar-style elapsed time between a birth date and "now", broken down as
//!     "X years, Y months, Z days, H hours, M minutes"
//!
//! Chrono does not provide a calendar diff (unlike Python's relativedelta),
//! so the borrowing rules are implemented manually:
//!   • minute underflow borrows an hour
//!   • hour underflow borrows a day
//!   • day underflow borrows the length of the month preceding *now*
//!     (not the birth month), walking further back if still short
//!   • month underflow borrows a year

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

/// Elapsed time from `birth` to `now`. Seconds are ignored.
pub fn elapsed_since(birth: NaiveDateTime, now: NaiveDateTime) -> Result<ElapsedTime> {
    if birth > now {
        bail!("birth date {birth} is later than the current time {now}");
    }

    let mut years = now.year() - birth.year();
    let mut months = now.month() as i32 - birth.month() as i32;
    let mut days = now.day() as i32 - birth.day() as i32;
    let mut hours = now.hour() as i32 - birth.hour() as i32;
    let mut minutes = now.minute() as i32 - birth.minute() as i32;

    if minutes < 0 {
        minutes += 60;
        hours -= 1;
    }

    if hours < 0 {
        hours += 24;
        days -= 1;
    }

    // Born on the 31st and "now" just after February: one borrow is not enough.
    let (mut year, mut month) = (now.year(), now.month());
    while days < 0 {
        (year, month) = previous_month(year, month);
        days += days_in_month(year, month) as i32;
        months -= 1;
    }

    while months < 0 {
        months += 12;
        years -= 1;
    }

    // birth <= now, so every component is non-negative here.
    Ok(ElapsedTime {
        years: years as u32,
        months: months as u32,
        days: days as u32,
        hours: hours as u32,
        minutes: minutes as u32,
    })
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Returns number of days in a given year/month (handles leap years)
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Gregorian rule: every 4th year, except centuries not divisible by 400.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn ymd(e: ElapsedTime) -> (u32, u32, u32) {
        (e.years, e.months, e.days)
    }

    #[test]
    fn same_instant_is_zero() {
        let now = at(2024, 7, 15, 13, 45);
        assert_eq!(elapsed_since(now, now).unwrap(), ElapsedTime::default());
    }

    #[test]
    fn plain_component_differences() {
        let e = elapsed_since(at(1992, 6, 14, 8, 10), at(2025, 9, 20, 11, 40)).unwrap();
        assert_eq!(
            e,
            ElapsedTime {
                years: 33,
                months: 3,
                days: 6,
                hours: 3,
                minutes: 30,
            }
        );
    }

    #[test]
    fn day_borrow_uses_28_day_february() {
        let e = elapsed_since(at(2000, 1, 30, 0, 0), at(2023, 3, 5, 0, 0)).unwrap();
        assert_eq!(ymd(e), (23, 1, 3));
    }

    #[test]
    fn day_borrow_uses_29_day_leap_february() {
        let e = elapsed_since(at(2000, 1, 30, 0, 0), at(2024, 3, 5, 0, 0)).unwrap();
        assert_eq!(ymd(e), (24, 1, 4));
    }

    #[test]
    fn day_borrow_uses_30_day_april() {
        let e = elapsed_since(at(2000, 1, 20, 0, 0), at(2023, 5, 10, 0, 0)).unwrap();
        assert_eq!(ymd(e), (23, 3, 20));
    }

    #[test]
    fn day_borrow_in_january_uses_december_of_previous_year() {
        let e = elapsed_since(at(2000, 6, 20, 0, 0), at(2023, 1, 10, 0, 0)).unwrap();
        assert_eq!(ymd(e), (22, 6, 21));
    }

    #[test]
    fn day_borrow_ignores_birth_month_length() {
        // Birth month (February) has 28 days, but the borrow comes from
        // the month preceding "now" (June, 30 days).
        let e = elapsed_since(at(2021, 2, 25, 0, 0), at(2023, 7, 5, 0, 0)).unwrap();
        assert_eq!(ymd(e), (2, 4, 10));
    }

    #[test]
    fn minute_and_hour_borrow_cascade() {
        let e = elapsed_since(at(2000, 1, 1, 10, 30), at(2000, 1, 2, 9, 15)).unwrap();
        assert_eq!(
            e,
            ElapsedTime {
                years: 0,
                months: 0,
                days: 0,
                hours: 22,
                minutes: 45,
            }
        );
    }

    #[test]
    fn short_preceding_month_keeps_borrowing() {
        let e = elapsed_since(at(2020, 1, 31, 12, 0), at(2020, 3, 1, 0, 0)).unwrap();
        assert_eq!(
            e,
            ElapsedTime {
                years: 0,
                months: 0,
                days: 29,
                hours: 12,
                minutes: 0,
            }
        );
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let err = elapsed_since(at(2030, 1, 1, 0, 0), at(2025, 1, 1, 0, 0)).unwrap_err();
        assert!(err.to_string().contains("later than"));
    }

    #[test]
    fn components_stay_in_range_for_many_birth_dates() {
        let now = at(2025, 3, 1, 0, 5);
        let mut birth = at(2019, 12, 1, 23, 59);
        while birth <= now {
            let e = elapsed_since(birth, now).unwrap();
            assert!(e.months < 12, "{birth}: {e:?}");
            assert!(e.days < 31, "{birth}: {e:?}");
            assert!(e.hours < 24, "{birth}: {e:?}");
            assert!(e.minutes < 60, "{birth}: {e:?}");
            birth += Duration::minutes(1_439);
        }
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }
}
