//! Observation timestamp parsing and localization.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Full observation timestamp layout, e.g. `2023-01-24 09:06:42.605777 UTC`.
const DATETIME_UTC_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f UTC";

/// Bare time-of-day layout, e.g. `09:06:42`.
const TIME_ONLY_FORMAT: &str = "%H:%M:%S";

/// Raw observation timestamp that matches neither accepted layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized observation timestamp {0:?}")]
pub struct TimestampParseError(pub String);

/// Date used to anchor bare time-of-day values, mirroring strptime's
/// default. Such observations sort before any dated observation and only
/// ever reach the unconditional week bucket.
fn strptime_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a raw observation timestamp into a UTC instant.
///
/// Exactly two layouts are accepted: the full datetime-with-fraction form
/// (selected when the value contains a space) and the bare time-of-day
/// form. Any other value is an error, which fails the whole report run;
/// there is no per-row recovery.
pub fn parse_observation_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampParseError> {
    let naive = if raw.contains(' ') {
        NaiveDateTime::parse_from_str(raw, DATETIME_UTC_FORMAT)
            .map_err(|_| TimestampParseError(raw.to_string()))?
    } else {
        let time = NaiveTime::parse_from_str(raw, TIME_ONLY_FORMAT)
            .map_err(|_| TimestampParseError(raw.to_string()))?;
        strptime_epoch().and_time(time)
    };
    Ok(Utc.from_utc_datetime(&naive))
}

/// Localize a UTC instant into a store's zone.
pub fn localize(utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    tz.from_utc_datetime(&utc.naive_utc())
}

/// Day of week with Monday=0..Sunday=6, as the business-hours table
/// encodes it.
pub fn weekday_monday0(local: &DateTime<Tz>) -> u8 {
    local.weekday().num_days_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_full_datetime_with_fraction() {
        let parsed = parse_observation_timestamp("2023-01-24 09:06:42.605777 UTC").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2023, 1, 24).unwrap());
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 6);
        assert_eq!(parsed.second(), 42);
    }

    #[test]
    fn test_parse_full_datetime_without_fraction() {
        let parsed = parse_observation_timestamp("2023-01-24 09:06:42 UTC").unwrap();
        assert_eq!(parsed.second(), 42);
        assert_eq!(parsed.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_parse_bare_time_of_day_anchors_to_1900() {
        let parsed = parse_observation_timestamp("18:13:22").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        assert_eq!(parsed.hour(), 18);
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert!(parse_observation_timestamp("2023-01-24T09:06:42Z").is_err());
        assert!(parse_observation_timestamp("yesterday").is_err());
        assert!(parse_observation_timestamp("").is_err());
    }

    #[test]
    fn test_localize_winter_chicago() {
        // Chicago is UTC-6 in January.
        let utc = parse_observation_timestamp("2023-01-25 14:00:00.000000 UTC").unwrap();
        let local = localize(utc, chrono_tz::America::Chicago);
        assert_eq!(local.hour(), 8);
    }

    #[test]
    fn test_weekday_monday0() {
        // 2023-01-25 was a Wednesday.
        let utc = parse_observation_timestamp("2023-01-25 14:00:00.000000 UTC").unwrap();
        let local = localize(utc, chrono_tz::America::Chicago);
        assert_eq!(weekday_monday0(&local), 2);
    }
}
