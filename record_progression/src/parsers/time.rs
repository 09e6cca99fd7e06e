use crate::defaults::SUSPICIOUS_MINUTES;
use crate::error::RecordError;

/// Parse a record time of the form `ss`, `mm:ss` or `hh:mm:ss` into minutes.
///
/// Seconds may be fractional, minutes and hours are whole numbers. Missing
/// higher components count as zero.
pub fn parse_time(time: &str) -> Result<f64, RecordError> {
    let unparseable = || RecordError::UnparseableTime(time.to_string());

    let parts: Vec<&str> = time.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => (None, None, *s),
        [m, s] => (None, Some(*m), *s),
        [h, m, s] => (Some(*h), Some(*m), *s),
        _ => return Err(unparseable()),
    };

    let seconds: f64 = seconds.trim().parse().map_err(|_| unparseable())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(unparseable());
    }
    let minutes = parse_whole(minutes).ok_or_else(unparseable)?;
    let hours = parse_whole(hours).ok_or_else(unparseable)?;

    let total = hours as f64 * 60.0 + minutes as f64 + seconds / 60.0;

    if total > SUSPICIOUS_MINUTES {
        log::warn!(
            "Suspicious magnitude for time '{}': {} minutes (hours: {}, minutes: {}, seconds: {})",
            time,
            total,
            hours,
            minutes,
            seconds
        );
    }

    Ok(total)
}

/// An absent component is zero, a present one must be a whole number.
fn parse_whole(component: Option<&str>) -> Option<u64> {
    match component {
        None => Some(0),
        Some(c) => c.trim().parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_seconds_only() {
        assert_close(parse_time("9.58").unwrap(), 9.58 / 60.0);
        assert_close(parse_time("45").unwrap(), 0.75);
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_close(parse_time("3:43.13").unwrap(), 3.0 + 43.13 / 60.0);
        assert_close(parse_time("12:37.35").unwrap(), 12.0 + 37.35 / 60.0);
    }

    #[test]
    fn test_hours_minutes_seconds() {
        assert_close(parse_time("2:10:00").unwrap(), 130.0);
        assert_close(parse_time("2:03:59").unwrap(), 123.0 + 59.0 / 60.0);
        assert_close(parse_time("1:00:00.5").unwrap(), 60.0 + 0.5 / 60.0);
    }

    #[test]
    fn test_matches_formula_for_all_shapes() {
        for h in [0u64, 1, 2] {
            for m in [0u64, 7, 59] {
                for s in [0.0, 1.25, 59.9] {
                    let expected = h as f64 * 60.0 + m as f64 + s / 60.0;
                    assert_close(parse_time(&format!("{h}:{m}:{s}")).unwrap(), expected);
                    if h == 0 {
                        assert_close(parse_time(&format!("{m}:{s}")).unwrap(), expected);
                        if m == 0 {
                            assert_close(parse_time(&format!("{s}")).unwrap(), expected);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_close(parse_time(" 2:10:00 ").unwrap(), 130.0);
    }

    #[test]
    fn test_non_numeric_seconds() {
        assert!(matches!(
            parse_time("2:10:xx"),
            Err(RecordError::UnparseableTime(t)) if t == "2:10:xx"
        ));
        assert!(parse_time("").is_err());
        assert!(parse_time("2:10:").is_err());
    }

    #[test]
    fn test_fractional_minutes_rejected() {
        assert!(parse_time("2.5:00").is_err());
        assert!(parse_time("1.5:10:00").is_err());
    }

    #[test]
    fn test_too_many_components() {
        assert!(parse_time("1:2:3:4").is_err());
    }

    #[test]
    fn test_non_finite_seconds_rejected() {
        assert!(parse_time("inf").is_err());
        assert!(parse_time("1:NaN").is_err());
        assert!(parse_time("-3").is_err());
    }

    #[test]
    fn test_suspicious_magnitude_is_still_returned() {
        // 20 hours is far beyond any running record but only warned about.
        assert_close(parse_time("20:00:00").unwrap(), 1200.0);
    }
}
