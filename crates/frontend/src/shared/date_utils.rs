use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_DATETIME: &str = "%Y-%m-%d %H:%M";

/// Backend timestamp for a table cell.
///
/// Accepts RFC 3339 (`2024-03-15T14:02:26.123Z`) and the plain SQL form
/// (`2024-03-15 14:02:26`). Anything else is shown as received.
pub fn format_datetime(value: &str) -> String {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format(DISPLAY_DATETIME).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY_DATETIME).to_string();
    }
    value.to_string()
}

/// `true` for an empty value or a `YYYY-MM-DD` date (what `<input type=date>` yields).
pub fn is_date_or_empty(value: &str) -> bool {
    value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "2024-12-31 23:59");
        assert_eq!(format_datetime("yesterday"), "yesterday");
        assert_eq!(format_datetime(""), "");
    }

    #[test]
    fn test_is_date_or_empty() {
        assert!(is_date_or_empty(""));
        assert!(is_date_or_empty("2024-02-29"));
        assert!(!is_date_or_empty("2023-02-29"));
        assert!(!is_date_or_empty("15.03.2024"));
    }
}
