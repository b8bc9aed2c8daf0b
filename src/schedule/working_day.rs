//! Duty days fall on Monday, Wednesday and Friday. Given a reference instant the
//! next duty day is the first of those strictly after the local calendar day of
//! the instant.
//!
//! All arithmetic is done on [`NaiveDate`], so a 23 or 25 hour day around a DST
//! change can never shift the result onto the wrong date.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::ServiceError;

pub fn parse_timezone(name: &str) -> Result<Tz, ServiceError> {
    name.parse::<Tz>()
        .map_err(|_| ServiceError::InvalidTimezone(name.to_string()))
}

pub fn is_duty_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Mon | Weekday::Wed | Weekday::Fri)
}

fn days_to_duty_day(weekday: Weekday) -> u64 {
    match weekday {
        Weekday::Mon | Weekday::Wed | Weekday::Fri => 0,
        Weekday::Tue | Weekday::Thu | Weekday::Sun => 1,
        Weekday::Sat => 2,
    }
}

/// Next duty date after the calendar day `reference` falls on in `tz`.
pub fn next_working_day(reference: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let today = reference.with_timezone(&tz).date_naive();
    let tomorrow = today + Days::new(1);

    tomorrow + Days::new(days_to_duty_day(tomorrow.weekday()))
}

pub fn next_working_day_in(reference: DateTime<Utc>, tz: &str) -> Result<NaiveDate, ServiceError> {
    Ok(next_working_day(reference, parse_timezone(tz)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn local_noon(tz: Tz, day: NaiveDate) -> DateTime<Utc> {
        tz.from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_week_starting_monday() {
        let tz = chrono_tz::Europe::Madrid;
        // 2024-06-03 is a Monday.
        let cases = [
            (date(2024, 6, 3), date(2024, 6, 5)),
            (date(2024, 6, 4), date(2024, 6, 5)),
            (date(2024, 6, 5), date(2024, 6, 7)),
            (date(2024, 6, 6), date(2024, 6, 7)),
            (date(2024, 6, 7), date(2024, 6, 10)),
            (date(2024, 6, 8), date(2024, 6, 10)),
            (date(2024, 6, 9), date(2024, 6, 10)),
        ];

        for (today, expected) in cases {
            assert_eq!(
                next_working_day(local_noon(tz, today), tz),
                expected,
                "today = {} ({})",
                today,
                today.weekday()
            );
        }
    }

    #[test]
    fn test_every_day_of_a_leap_year_lands_on_a_later_duty_day() {
        let tz = chrono_tz::America::New_York;
        let mut today = date(2024, 1, 1);

        while today.year() == 2024 {
            let next = next_working_day(local_noon(tz, today), tz);
            assert!(is_duty_day(next.weekday()), "{} -> {}", today, next);
            assert!(next > today, "{} -> {}", today, next);
            assert!((next - today).num_days() <= 3, "{} -> {}", today, next);
            today = today + Days::new(1);
        }
    }

    #[test]
    fn test_crosses_month_and_year_boundaries() {
        let tz = chrono_tz::UTC;
        // Wednesday 28th of February in a leap year.
        assert_eq!(
            next_working_day(local_noon(tz, date(2024, 2, 28)), tz),
            date(2024, 3, 1)
        );
        // Tuesday 31st of December.
        assert_eq!(
            next_working_day(local_noon(tz, date(2024, 12, 31)), tz),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn test_long_day_at_end_of_dst_does_not_repeat_sunday() {
        // Berlin falls back on Sunday 2024-10-27, which lasts 25 hours.
        let tz = chrono_tz::Europe::Berlin;
        assert_eq!(
            next_working_day(local_noon(tz, date(2024, 10, 25)), tz),
            date(2024, 10, 28)
        );
        assert_eq!(
            next_working_day(local_noon(tz, date(2024, 10, 26)), tz),
            date(2024, 10, 28)
        );
    }

    #[test]
    fn test_short_day_at_start_of_dst() {
        // Berlin springs forward on Sunday 2024-03-31.
        let tz = chrono_tz::Europe::Berlin;
        let late_saturday = tz
            .with_ymd_and_hms(2024, 3, 30, 23, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(next_working_day(late_saturday, tz), date(2024, 4, 1));
    }

    #[test]
    fn test_local_calendar_day_decides() {
        // Tuesday 23:30 UTC is already Wednesday morning in Auckland.
        let reference = Utc.with_ymd_and_hms(2024, 6, 4, 23, 30, 0).unwrap();

        assert_eq!(next_working_day(reference, chrono_tz::UTC), date(2024, 6, 5));
        assert_eq!(
            next_working_day(reference, chrono_tz::Pacific::Auckland),
            date(2024, 6, 7)
        );
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let reference = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();

        let result = next_working_day_in(reference, "Mars/Olympus_Mons");
        assert!(matches!(result, Err(ServiceError::InvalidTimezone(name)) if name == "Mars/Olympus_Mons"));

        assert_eq!(
            next_working_day_in(reference, "America/Argentina/Buenos_Aires").unwrap(),
            date(2024, 6, 5)
        );
    }
}
