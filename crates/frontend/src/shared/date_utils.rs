//! Форматирование дат для ячеек списков

use chrono::{DateTime, NaiveDate};

const DATE_FORMAT: &str = "%d %b %Y";

/// Дата ISO или метка RFC 3339 в виде `15 Mar 2024`.
/// Нераспознанная строка возвращается как есть.
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| value.to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc().date());
    }
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15 Mar 2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15 Mar 2024");
        assert_eq!(format_date("2024-12-31T23:59:59"), "31 Dec 2024");
    }

    #[test]
    fn test_invalid_input_is_returned_unchanged() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2024-13-45"), "2024-13-45");
        assert_eq!(format_date(""), "");
    }
}
