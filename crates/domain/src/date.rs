use chrono::prelude::*;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("Date: `{0}` is malformed, expected YYYY-MM-DD or DD/MM")]
    Date(String),
    #[error("Time: `{0}` is malformed, expected HH:MM")]
    Time(String),
}

/// Parses a calendar date given either as `YYYY-MM-DD` or as `DD/MM`.
/// The short form is resolved against the year of `today`.
pub fn parse_date(datestr: &str, today: NaiveDate) -> Result<NaiveDate, InvalidDateError> {
    let datestr = datestr.trim();
    if datestr.contains('/') {
        return parse_day_month(datestr, today.year());
    }

    let parts = datestr.split('-').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(InvalidDateError::Date(datestr.into()));
    }
    let year = parts[0].parse::<i32>();
    let month = parts[1].parse::<u32>();
    let day = parts[2].parse::<u32>();
    match (year, month, day) {
        (Ok(year), Ok(month), Ok(day)) if (1970..=2100).contains(&year) => {
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| InvalidDateError::Date(datestr.into()))
        }
        _ => Err(InvalidDateError::Date(datestr.into())),
    }
}

fn parse_day_month(datestr: &str, year: i32) -> Result<NaiveDate, InvalidDateError> {
    let parts = datestr.split('/').collect::<Vec<_>>();
    if parts.len() != 2 {
        return Err(InvalidDateError::Date(datestr.into()));
    }
    match (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
        (Ok(day), Ok(month)) => NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| InvalidDateError::Date(datestr.into())),
        _ => Err(InvalidDateError::Date(datestr.into())),
    }
}

/// Parses `HH:MM`, also accepting a trailing seconds component
pub fn parse_time(timestr: &str) -> Result<NaiveTime, InvalidDateError> {
    let timestr = timestr.trim();
    NaiveTime::parse_from_str(timestr, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(timestr, "%H:%M:%S"))
        .map_err(|_| InvalidDateError::Time(timestr.into()))
}

/// Empty strings are treated as an absent time, which is what html time
/// inputs submit when left blank
pub fn parse_optional_time(timestr: Option<&str>) -> Result<Option<NaiveTime>, InvalidDateError> {
    match timestr {
        Some(t) if !t.trim().is_empty() => parse_time(t).map(Some),
        _ => Ok(None),
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Formats a millis timestamp the way javascript `Date.toISOString` does
pub fn format_timestamp(timestamp_millis: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// The calendar date in `tz` at the given millis timestamp
pub fn local_date(timestamp_millis: i64, tz: &Tz) -> NaiveDate {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.with_timezone(tz).date_naive())
        .unwrap_or_default()
}

/// Minutes since midnight
pub fn minutes_of_day(time: &NaiveTime) -> i64 {
    (time.hour() * 60 + time.minute()) as i64
}

#[cfg(test)]
mod test {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            ("2018-1-1", (2018, 1, 1)),
            ("2025-12-31", (2025, 12, 31)),
            ("2020-2-29", (2020, 2, 29)),
            ("2020-02-02", (2020, 2, 2)),
            ("05/11", (2026, 11, 5)),
        ];

        for (datestr, (y, m, d)) in valid_dates {
            assert_eq!(
                parse_date(datestr, today()),
                Ok(NaiveDate::from_ymd_opt(y, m, d).unwrap())
            );
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2020-2-30",
            "2020-0-1",
            "2020-1-0",
            "1969-1-1",
            "32/01",
            // 2026 is not a leap year
            "29/02",
            "1/2/3",
            "",
        ];

        for date in &invalid_dates {
            assert!(parse_date(date, today()).is_err());
        }
    }

    #[test]
    fn parses_times() {
        assert_eq!(
            parse_time("09:30"),
            Ok(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
        assert_eq!(
            parse_time("21:05:00"),
            Ok(NaiveTime::from_hms_opt(21, 5, 0).unwrap())
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("9h").is_err());
        assert_eq!(parse_optional_time(Some("")), Ok(None));
        assert_eq!(parse_optional_time(None), Ok(None));
        assert_eq!(format_time(&NaiveTime::from_hms_opt(7, 5, 0).unwrap()), "07:05");
        assert_eq!(minutes_of_day(&NaiveTime::from_hms_opt(10, 15, 0).unwrap()), 615);
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn resolves_local_date() {
        // 2026-10-20 01:00 UTC is still the 19th in Sao Paulo
        let ts = Utc
            .with_ymd_and_hms(2026, 10, 20, 1, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            local_date(ts, &chrono_tz::America::Sao_Paulo),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert_eq!(
            local_date(ts, &Tz::UTC),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
        );
    }
}
