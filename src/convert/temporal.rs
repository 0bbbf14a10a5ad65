//! Date, time and duration conversions
//!
//! Accepted input is ISO-8601 first, then the invariant US-style
//! `MM/DD/YYYY` forms spreadsheet tools commonly emit. Output is always
//! ISO-8601 so that written workbooks read back unchanged.

use super::{Conversion, FromCell, SkipReason, ToCell};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use iso8601_duration::Duration as IsoDuration;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

fn parse_naive_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn parse_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_naive_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

fn parse_fixed_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %:z").ok())
}

fn skip_unless<T>(value: Option<T>) -> Conversion<T> {
    match value {
        Some(value) => Conversion::Value(value),
        None => Conversion::Skip(SkipReason::Malformed),
    }
}

impl FromCell for NaiveDate {
    fn from_cell(text: &str) -> Conversion<Self> {
        let text = text.trim();
        skip_unless(
            parse_naive_date(text).or_else(|| parse_naive_datetime(text).map(|dt| dt.date())),
        )
    }
}

impl ToCell for NaiveDate {
    fn to_cell(&self) -> Option<String> {
        Some(self.format("%Y-%m-%d").to_string())
    }
}

impl FromCell for NaiveTime {
    fn from_cell(text: &str) -> Conversion<Self> {
        let text = text.trim();
        skip_unless(
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok()),
        )
    }
}

impl ToCell for NaiveTime {
    fn to_cell(&self) -> Option<String> {
        Some(self.format("%H:%M:%S%.f").to_string())
    }
}

impl FromCell for NaiveDateTime {
    fn from_cell(text: &str) -> Conversion<Self> {
        let text = text.trim();
        skip_unless(
            parse_naive_datetime(text)
                .or_else(|| parse_fixed_offset(text).map(|dt| dt.naive_local())),
        )
    }
}

impl ToCell for NaiveDateTime {
    fn to_cell(&self) -> Option<String> {
        Some(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl FromCell for DateTime<FixedOffset> {
    fn from_cell(text: &str) -> Conversion<Self> {
        let text = text.trim();
        // Without an explicit offset the value is taken as UTC
        skip_unless(parse_fixed_offset(text).or_else(|| {
            parse_naive_datetime(text).map(|naive| naive.and_utc().fixed_offset())
        }))
    }
}

impl ToCell for DateTime<FixedOffset> {
    fn to_cell(&self) -> Option<String> {
        Some(self.to_rfc3339())
    }
}

impl FromCell for DateTime<Utc> {
    fn from_cell(text: &str) -> Conversion<Self> {
        DateTime::<FixedOffset>::from_cell(text).map(|dt| dt.with_timezone(&Utc))
    }
}

impl ToCell for DateTime<Utc> {
    fn to_cell(&self) -> Option<String> {
        Some(self.to_rfc3339())
    }
}

/// Parse a duration written as `[-][d.]hh:mm[:ss[.fffffffff]]` or as an
/// ISO-8601 duration (`P1DT2H`, `-PT30S`).
///
/// ISO durations with year or month components are rejected since their
/// length in seconds is not fixed.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let duration = if body.starts_with('P') {
        parse_iso_duration(body)?
    } else {
        parse_clock_duration(body)?
    };

    Some(if negative { -duration } else { duration })
}

fn parse_iso_duration(text: &str) -> Option<Duration> {
    let iso: IsoDuration = text.parse().ok()?;
    if iso.year != 0.0 || iso.month != 0.0 {
        return None;
    }
    let seconds = f64::from(iso.day) * 86_400.0
        + f64::from(iso.hour) * 3_600.0
        + f64::from(iso.minute) * 60.0
        + f64::from(iso.second);
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(Duration::milliseconds((seconds * 1_000.0).round() as i64))
}

fn parse_clock_duration(text: &str) -> Option<Duration> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    // Bare number of days
    if all_digits(text) {
        return Duration::try_days(text.parse().ok()?);
    }

    let (days, clock) = match text.split_once('.') {
        Some((days, clock)) if all_digits(days) && clock.contains(':') => {
            (days.parse::<i64>().ok()?, clock)
        }
        _ => (0, text),
    };

    let mut parts = clock.splitn(3, ':');
    let hours = parts.next().filter(|p| all_digits(p))?.parse::<i64>().ok()?;
    let minutes = parts.next().filter(|p| all_digits(p))?.parse::<i64>().ok()?;
    let (seconds, fraction) = match parts.next() {
        Some(seconds) => match seconds.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (seconds, ""),
        },
        None => ("0", ""),
    };
    if !all_digits(seconds) || !(fraction.is_empty() || all_digits(fraction)) {
        return None;
    }
    if fraction.len() > 9 {
        return None;
    }
    let seconds = seconds.parse::<i64>().ok()?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{:0<9}", fraction).parse::<i64>().ok()?
    };

    Duration::try_days(days)?
        .checked_add(&Duration::hours(hours))?
        .checked_add(&Duration::minutes(minutes))?
        .checked_add(&Duration::seconds(seconds))?
        .checked_add(&Duration::nanoseconds(nanos))
}

/// Render a duration as `[-][d.]hh:mm:ss[.fffffffff]`
pub fn format_duration(duration: &Duration) -> String {
    let sign = if *duration < Duration::zero() { "-" } else { "" };
    let abs = duration.abs();
    let total_seconds = abs.num_seconds();
    let nanos = abs.subsec_nanos();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::from(sign);
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

impl FromCell for Duration {
    fn from_cell(text: &str) -> Conversion<Self> {
        skip_unless(parse_duration(text))
    }
}

impl ToCell for Duration {
    fn to_cell(&self) -> Option<String> {
        Some(format_duration(self))
    }
}

impl FromCell for std::time::Duration {
    fn from_cell(text: &str) -> Conversion<Self> {
        skip_unless(parse_duration(text).and_then(|d| d.to_std().ok()))
    }
}

impl ToCell for std::time::Duration {
    fn to_cell(&self) -> Option<String> {
        Duration::from_std(*self).ok().map(|d| format_duration(&d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_naive_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(NaiveDate::from_cell("2024-03-15"), Conversion::Value(expected));
        assert_eq!(NaiveDate::from_cell("03/15/2024"), Conversion::Value(expected));
        assert_eq!(
            NaiveDate::from_cell("2024-03-15T00:00:00"),
            Conversion::Value(expected)
        );
        assert!(NaiveDate::from_cell("15.03.2024").is_skip());
        assert!(NaiveDate::from_cell("2024-02-30").is_skip());
    }

    #[test]
    fn test_naive_datetime_formats() {
        let dt = NaiveDateTime::from_cell("2024-03-15T08:30:05.250").value().unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.nanosecond(), 250_000_000);

        let spaced = NaiveDateTime::from_cell("2024-03-15 08:30").value().unwrap();
        assert_eq!(spaced.minute(), 30);

        let date_only = NaiveDateTime::from_cell("2024-03-15").value().unwrap();
        assert_eq!(date_only.hour(), 0);

        let us = NaiveDateTime::from_cell("03/15/2024 08:30:05").value().unwrap();
        assert_eq!(us.second(), 5);
    }

    #[test]
    fn test_naive_datetime_renders_iso() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(8, 30, 5)
            .unwrap();
        assert_eq!(dt.to_cell(), Some("2024-03-15T08:30:05".to_string()));
        assert_eq!(NaiveDateTime::from_cell(&dt.to_cell().unwrap()).value(), Some(dt));
    }

    #[test]
    fn test_time_of_day() {
        let t = NaiveTime::from_cell("13:45:10").value().unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (13, 45, 10));
        assert_eq!(NaiveTime::from_cell("07:05").value().unwrap().minute(), 5);
        assert!(NaiveTime::from_cell("25:00").is_skip());
    }

    #[test]
    fn test_datetime_with_offset() {
        let dt = DateTime::<FixedOffset>::from_cell("2024-03-15T08:30:00+02:00")
            .value()
            .unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7_200);

        let utc = DateTime::<Utc>::from_cell("2024-03-15T08:30:00+02:00")
            .value()
            .unwrap();
        assert_eq!(utc.hour(), 6);

        let naive_as_utc = DateTime::<Utc>::from_cell("2024-03-15 08:30:00")
            .value()
            .unwrap();
        assert_eq!(naive_as_utc.hour(), 8);
    }

    #[test]
    fn test_parse_clock_durations() {
        assert_eq!(parse_duration("01:30:00"), Some(Duration::minutes(90)));
        assert_eq!(parse_duration("00:00:01.5"), Some(Duration::milliseconds(1_500)));
        assert_eq!(
            parse_duration("2.03:00:00"),
            Some(Duration::days(2) + Duration::hours(3))
        );
        assert_eq!(parse_duration("-00:10:00"), Some(Duration::minutes(-10)));
        assert_eq!(parse_duration("12:15"), Some(Duration::minutes(735)));
        assert_eq!(parse_duration("3"), Some(Duration::days(3)));
        assert_eq!(parse_duration("00:60:00"), None);
        assert_eq!(parse_duration("1:2:x"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_iso_durations() {
        assert_eq!(parse_duration("PT30S"), Some(Duration::seconds(30)));
        assert_eq!(
            parse_duration("P1DT2H"),
            Some(Duration::days(1) + Duration::hours(2))
        );
        assert_eq!(parse_duration("-PT1M"), Some(Duration::minutes(-1)));
        assert_eq!(parse_duration("P1M"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::minutes(90)), "01:30:00");
        assert_eq!(
            format_duration(&(Duration::days(2) + Duration::seconds(5))),
            "2.00:00:05"
        );
        assert_eq!(format_duration(&Duration::milliseconds(-1_500)), "-00:00:01.5");
        assert_eq!(format_duration(&Duration::zero()), "00:00:00");
    }

    #[test]
    fn test_std_duration_rejects_negative() {
        assert_eq!(
            std::time::Duration::from_cell("00:00:02"),
            Conversion::Value(std::time::Duration::from_secs(2))
        );
        assert!(std::time::Duration::from_cell("-00:00:02").is_skip());
        assert_eq!(
            std::time::Duration::from_secs(61).to_cell(),
            Some("00:01:01".to_string())
        );
    }
}
