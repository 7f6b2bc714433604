//! Normalises Jira timestamps to `YYYY-MM-DD`.

use crate::constants::EMPTY_FIELD;
use chrono::{DateTime, FixedOffset};

/// Offset-carrying layouts Jira has been seen to emit, tried in order.
/// `%.f` accepts the fractional seconds when present.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats a timestamp as a calendar date in its own offset.
///
/// Empty input yields `-`. Input no layout accepts is cut to its first ten
/// characters, or returned whole when shorter.
pub fn format_date(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return EMPTY_FIELD.to_string();
    }

    match parse_timestamp(iso) {
        Some(parsed) => parsed.format("%Y-%m-%d").to_string(),
        None => {
            log::debug!("Unrecognised timestamp '{}', truncating", iso);
            iso.get(..10).unwrap_or(iso).to_string()
        }
    }
}

fn parse_timestamp(iso: &str) -> Option<DateTime<FixedOffset>> {
    OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(iso, layout).ok())
        .or_else(|| DateTime::parse_from_rfc3339(iso).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jira_millisecond_offset() {
        assert_eq!(format_date("2024-01-15T10:30:00.000+0000"), "2024-01-15");
        assert_eq!(format_date("2024-03-01T23:59:59.123-0800"), "2024-03-01");
    }

    #[test]
    fn test_date_stays_in_its_own_offset() {
        assert_eq!(format_date("2024-01-15T23:30:00.000-0500"), "2024-01-15");
    }

    #[test]
    fn test_rfc3339_variants() {
        assert_eq!(format_date("2024-01-15T10:30:00Z"), "2024-01-15");
        assert_eq!(format_date("2024-01-15T10:30:00.000Z"), "2024-01-15");
        assert_eq!(format_date("2024-01-15T10:30:00+02:00"), "2024-01-15");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date("2024-01-15 sometime"), "2024-01-15");
        assert_eq!(format_date("2024-01"), "2024-01");
    }
}
