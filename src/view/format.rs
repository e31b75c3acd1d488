//! Display formatting for view fields. Missing values render as [`PLACEHOLDER`].

use chrono::NaiveDate;
use thiserror::Error;

pub const PLACEHOLDER: &str = "-";

/// Row-local formatting failure. Callers degrade the field to [`PLACEHOLDER`].
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("could not parse date \"{input}\": {reason}")]
    InvalidDate { input: String, reason: String },
}

/// Formats a fraction as a percentage rounded to whole basis points.
///
/// Absent, zero and NaN ratios mean "no data" and render as `-`, never `0%`.
/// Trailing zero decimals are dropped, so `0.95` renders as `95%`.
pub fn format_percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r != 0.0 && !r.is_nan() => {
            let percent = (r * 10_000.0).round() / 100.0;
            format!("{}%", trim_decimals(&format!("{percent:.2}")))
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Full English weekday name of an ISO-8601 calendar date.
///
/// The date is parsed without any timezone, so the weekday never shifts with
/// the local offset of the machine.
pub fn format_weekday(date: &str) -> Result<String, FormatError> {
    let parsed =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| FormatError::InvalidDate {
            input: date.to_string(),
            reason: e.to_string(),
        })?;
    Ok(parsed.format("%A").to_string())
}

/// Delay in minutes, whole numbers without a decimal part.
pub fn format_delay(delay: Option<f64>) -> String {
    match delay {
        Some(d) if d.is_finite() && d.fract() == 0.0 => format!("{d:.0}"),
        Some(d) if d.is_finite() => trim_decimals(&format!("{d:.2}")).to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Substitutes [`PLACEHOLDER`] for absent or empty text.
pub fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn trim_decimals(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(0.9523)), "95.23%");
        assert_eq!(format_percent(Some(0.95)), "95%");
        assert_eq!(format_percent(Some(0.5)), "50%");
        assert_eq!(format_percent(Some(1.0)), "100%");
        assert_eq!(format_percent(Some(0.12346)), "12.35%");
        assert_eq!(format_percent(Some(0.8)), "80%");
    }

    #[test]
    fn test_format_percent_no_data() {
        assert_eq!(format_percent(Some(0.0)), "-");
        assert_eq!(format_percent(None), "-");
        assert_eq!(format_percent(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_format_percent_repeating_fraction() {
        assert_eq!(format_percent(Some(2.0 / 3.0)), "66.67%");
        assert_eq!(format_percent(Some(1.0 / 3.0)), "33.33%");
    }

    #[test]
    fn test_format_weekday() {
        assert_eq!(format_weekday("2021-03-15").unwrap(), "Monday");
        assert_eq!(format_weekday("2021-03-14").unwrap(), "Sunday");
        assert_eq!(format_weekday("2020-02-29").unwrap(), "Saturday");
    }

    #[test]
    fn test_format_weekday_invalid() {
        let err = format_weekday("yesterday").unwrap_err();
        assert!(matches!(err, FormatError::InvalidDate { ref input, .. } if input == "yesterday"));
        assert!(format_weekday("2021-02-30").is_err());
        assert!(format_weekday("").is_err());
    }

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(Some(0.0)), "0");
        assert_eq!(format_delay(Some(3.0)), "3");
        assert_eq!(format_delay(Some(2.5)), "2.5");
        assert_eq!(format_delay(Some(-1.0)), "-1");
        assert_eq!(format_delay(None), "-");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Some("0815")), "0815");
        assert_eq!(or_placeholder(Some("")), "-");
        assert_eq!(or_placeholder(None), "-");
    }
}
