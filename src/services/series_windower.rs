use chrono::{DateTime, TimeDelta, Utc};

use crate::errors::PipelineError;
use crate::models::{TimedRecord, WindowSpec};

/// Returns the records strictly inside `(anchor - length_days, anchor)`.
///
/// Records exactly on either boundary are excluded. The input is expected in
/// non-decreasing timestamp order and the output keeps that order; an empty
/// result is not an error.
///
/// # Arguments
///
/// * 'series' - full series for one farm, left untouched
/// * 'anchor' - the instant treated as "now"
/// * 'length_days' - window length, must be positive
pub fn select(
    series: &[TimedRecord],
    anchor: DateTime<Utc>,
    length_days: i64,
) -> Result<Vec<TimedRecord>, PipelineError> {
    if length_days <= 0 {
        return Err(PipelineError::InvalidWindow(length_days));
    }

    let start = TimeDelta::try_days(length_days)
        .and_then(|span| anchor.checked_sub_signed(span))
        .ok_or(PipelineError::InvalidWindow(length_days))?;

    Ok(series
        .iter()
        .filter(|r| r.timestamp > start && r.timestamp < anchor)
        .cloned()
        .collect())
}

pub fn select_window(series: &[TimedRecord], window: &WindowSpec) -> Result<Vec<TimedRecord>, PipelineError> {
    select(series, window.anchor(), window.length_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_codec::parse_instant;

    fn rec(ts: &str, power: f64, pred: f64) -> TimedRecord {
        TimedRecord::new(parse_instant(ts).unwrap(), power, pred)
    }

    fn hourly(start: &str, hours: i64) -> Vec<TimedRecord> {
        let base = parse_instant(start).unwrap();
        (0..hours)
            .map(|h| TimedRecord::new(base + TimeDelta::hours(h), h as f64, h as f64 + 0.5))
            .collect()
    }

    #[test]
    fn test_thirty_day_window_example() {
        let series = vec![
            rec("2020-01-01 00:00:00", 10.0, 9.0),
            rec("2020-01-20 00:00:00", 12.0, 11.0),
            rec("2020-02-01 00:00:00", 15.0, 14.0),
        ];
        let anchor = parse_instant("2020-02-01 00:00:00").unwrap();

        let selected = select(&series, anchor, 30).unwrap();

        // window opens at 2020-01-02, so 2020-01-01 is outside; the anchor itself is excluded
        assert_eq!(selected, vec![series[1].clone()]);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let anchor = parse_instant("2020-02-01 00:00:00").unwrap();
        let series = vec![
            rec("2020-01-25 00:00:00", 1.0, 1.0),
            rec("2020-01-25 00:00:01", 2.0, 2.0),
            rec("2020-01-31 23:59:59", 3.0, 3.0),
            rec("2020-02-01 00:00:00", 4.0, 4.0),
        ];

        let selected = select(&series, anchor, 7).unwrap();

        let powers: Vec<f64> = selected.iter().map(|r| r.power).collect();
        assert_eq!(powers, vec![2.0, 3.0]);
    }

    #[test]
    fn test_result_is_ordered_subsequence_inside_window() {
        let series = hourly("2019-12-01 00:00:00", 24 * 90);
        let anchor = parse_instant("2020-02-01 12:00:00").unwrap();

        for days in [1, 7, 30, 180] {
            let selected = select(&series, anchor, days).unwrap();
            let start = anchor - TimeDelta::days(days);

            assert!(selected.iter().all(|r| r.timestamp > start && r.timestamp < anchor));
            assert!(selected.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

            // contiguous run of the input
            if let Some(first) = selected.first() {
                let offset = series.iter().position(|r| r == first).unwrap();
                assert_eq!(&series[offset..offset + selected.len()], selected.as_slice());
            }
        }
    }

    #[test]
    fn test_select_is_idempotent_and_leaves_input_alone() {
        let series = hourly("2020-01-01 00:00:00", 24 * 10);
        let before = series.clone();
        let anchor = parse_instant("2020-01-08 00:00:00").unwrap();

        let first = select(&series, anchor, 3).unwrap();
        let second = select(&series, anchor, 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(series, before);
        assert_eq!(first.len(), 3 * 24 - 1);
    }

    #[test]
    fn test_empty_results() {
        let anchor = parse_instant("2020-02-01 00:00:00").unwrap();
        assert!(select(&[], anchor, 30).unwrap().is_empty());

        let old = hourly("2010-01-01 00:00:00", 48);
        assert!(select(&old, anchor, 365).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_length_is_rejected() {
        let anchor = parse_instant("2020-02-01 00:00:00").unwrap();
        assert_eq!(select(&[], anchor, 0), Err(PipelineError::InvalidWindow(0)));
        assert_eq!(select(&[], anchor, -7), Err(PipelineError::InvalidWindow(-7)));
    }

    #[test]
    fn test_unrepresentable_start_is_rejected() {
        let anchor = parse_instant("2020-02-01 00:00:00").unwrap();
        assert_eq!(select(&[], anchor, i64::MAX), Err(PipelineError::InvalidWindow(i64::MAX)));
    }

    #[test]
    fn test_select_window_uses_window_bounds() {
        let series = hourly("2020-01-30 00:00:00", 72);
        let window = WindowSpec::new(parse_instant("2020-02-01 00:00:00").unwrap(), 1).unwrap();
        assert_eq!(select_window(&series, &window).unwrap().len(), 23);
    }
}
