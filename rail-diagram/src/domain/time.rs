//! Time-of-day handling for forbid windows.
//!
//! Windows are persisted as "hh:mm" strings and may wrap past midnight
//! (e.g. 23:30 to 01:00).

use chrono::{NaiveTime, Timelike};

/// Seconds in a day, used to wrap windows that cross midnight.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time of day from "hh:mm" format.
///
/// # Examples
///
/// ```
/// use rail_diagram::domain::parse_hhmm;
///
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
///
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("25:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    if s.len() != 5 {
        return Err(TimeError::new("expected hh:mm format"));
    }

    let bytes = s.as_bytes();
    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Format a time of day as "hh:mm".
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Seconds from `begin` to `end`, wrapping past midnight.
///
/// Equal times give zero.
pub fn wrapping_secs_between(begin: NaiveTime, end: NaiveTime) -> i64 {
    let secs = end.signed_duration_since(begin).num_seconds();
    if secs < 0 { secs + SECONDS_PER_DAY } else { secs }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(t("00:00"), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(t("09:05"), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(t("23:59"), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn reject_malformed() {
        assert!(parse_hhmm("").is_err());
        assert!(parse_hhmm("9:05").is_err());
        assert!(parse_hhmm("09-05").is_err());
        assert!(parse_hhmm("ab:cd").is_err());
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("12:60").is_err());
    }

    #[test]
    fn error_display() {
        let err = parse_hhmm("24:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");
    }

    #[test]
    fn wrapping_duration() {
        assert_eq!(wrapping_secs_between(t("01:00"), t("03:30")), 9000);
        assert_eq!(wrapping_secs_between(t("23:30"), t("00:30")), 3600);
        assert_eq!(wrapping_secs_between(t("05:00"), t("05:00")), 0);
    }
}
