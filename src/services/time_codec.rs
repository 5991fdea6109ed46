use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::PipelineError;

/// Display format shared by every timestamp the dashboard emits.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;
const SECONDS_PREFIX_LEN: usize = 19;

// Accepted after truncation, most specific first.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    DISPLAY_FORMAT,
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalizes an ISO-8601 timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// Only the first 19 characters are considered, so fractional seconds and any
/// offset suffix are dropped without conversion. The feed reports UTC, and the
/// wall-clock part is taken as-is. Both `T` and space separators are accepted,
/// and a bare date resolves to midnight.
pub fn to_utc_normalized(iso_timestamp: &str) -> Result<String, PipelineError> {
    let naive = parse_iso_prefix(iso_timestamp)?;
    Ok(naive.format(DISPLAY_FORMAT).to_string())
}

/// Converts a normalized UTC timestamp to the wall-clock time of `zone_name`.
///
/// # Arguments
///
/// * 'utc_timestamp' - timestamp in `YYYY-MM-DD HH:MM:SS`, read as UTC
/// * 'zone_name' - IANA zone identifier, e.g. `Australia/Adelaide`
pub fn to_local(utc_timestamp: &str, zone_name: &str) -> Result<String, PipelineError> {
    let zone = parse_zone(zone_name)?;
    let naive = NaiveDateTime::parse_from_str(utc_timestamp, DISPLAY_FORMAT)
        .map_err(|_| PipelineError::MalformedTimestamp(utc_timestamp.to_string()))?;

    let local = Utc.from_utc_datetime(&naive).with_timezone(&zone);
    Ok(local.format(DISPLAY_FORMAT).to_string())
}

pub fn parse_zone(zone_name: &str) -> Result<Tz, PipelineError> {
    zone_name
        .parse::<Tz>()
        .map_err(|_| PipelineError::UnknownTimezone(zone_name.to_string()))
}

/// Parses any timestamp accepted by [`to_utc_normalized`] into a UTC instant.
pub fn parse_instant(timestamp: &str) -> Result<DateTime<Utc>, PipelineError> {
    Ok(Utc.from_utc_datetime(&parse_iso_prefix(timestamp)?))
}

pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

fn parse_iso_prefix(timestamp: &str) -> Result<NaiveDateTime, PipelineError> {
    let malformed = || PipelineError::MalformedTimestamp(timestamp.to_string());

    let prefix: String = timestamp.trim().chars().take(SECONDS_PREFIX_LEN).collect();

    if prefix.len() == DATE_LEN {
        return NaiveDate::parse_from_str(&prefix, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(malformed);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&prefix, format).ok())
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_iso_with_offset() {
        assert_eq!(
            to_utc_normalized("2020-02-01T00:00:00+00:00").unwrap(),
            "2020-02-01 00:00:00"
        );
    }

    #[test]
    fn test_normalization_drops_fraction_and_suffix() {
        assert_eq!(
            to_utc_normalized("2021-06-30T13:45:12.123456Z").unwrap(),
            "2021-06-30 13:45:12"
        );
        assert_eq!(
            to_utc_normalized("2021-06-30 13:45:12").unwrap(),
            "2021-06-30 13:45:12"
        );
    }

    #[test]
    fn test_minute_precision_is_accepted() {
        assert_eq!(to_utc_normalized("2020-03-04T05:06").unwrap(), "2020-03-04 05:06:00");
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(to_utc_normalized("2020-03-04").unwrap(), "2020-03-04 00:00:00");
    }

    #[test]
    fn test_rejects_garbage() {
        for input in ["", "yesterday", "2020-13-01T00:00:00", "2020-02-01T25:00:00", "2020-02"] {
            assert_eq!(
                to_utc_normalized(input),
                Err(PipelineError::MalformedTimestamp(input.to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_adelaide_summer_offset() {
        assert_eq!(
            to_local("2020-02-01 00:00:00", "Australia/Adelaide").unwrap(),
            "2020-02-01 10:30:00"
        );
    }

    #[test]
    fn test_adelaide_winter_offset() {
        // ACST, no daylight saving in July
        assert_eq!(
            to_local("2020-07-01 00:00:00", "Australia/Adelaide").unwrap(),
            "2020-07-01 09:30:00"
        );
    }

    #[test]
    fn test_round_trip_crosses_date_line() {
        let utc = to_utc_normalized("2020-12-31T20:00:00Z").unwrap();
        assert_eq!(to_local(&utc, "Australia/Brisbane").unwrap(), "2021-01-01 06:00:00");
        assert_eq!(to_local(&utc, "UTC").unwrap(), "2020-12-31 20:00:00");
    }

    #[test]
    fn test_unknown_zone() {
        assert_eq!(
            to_local("2020-02-01 00:00:00", "Australia/Atlantis"),
            Err(PipelineError::UnknownTimezone("Australia/Atlantis".to_string()))
        );
    }

    #[test]
    fn test_to_local_requires_display_format() {
        assert_eq!(
            to_local("2020-02-01T00:00:00", "Australia/Adelaide"),
            Err(PipelineError::MalformedTimestamp("2020-02-01T00:00:00".to_string()))
        );
    }

    #[test]
    fn test_parse_and_format_instant() {
        let instant = parse_instant("2020-01-20T06:30:00+00:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2020, 1, 20, 6, 30, 0).unwrap());
        assert_eq!(format_instant(&instant), "2020-01-20 06:30:00");
    }
}
