use bson::DateTime;
use chrono::{NaiveDate, Utc};

pub fn now() -> DateTime {
    DateTime::from_chrono(Utc::now())
}

/// Long-form English date, e.g. "January 5, 2024".
pub fn long_form(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn today_long_form() -> String {
    long_form(Utc::now().date_naive())
}

/// Parses ISO-8601 input ("2024-03-01" or a full RFC 3339 timestamp) into a
/// BSON date. Plain dates are taken as midnight UTC.
pub fn parse_iso_date(input: &str) -> Option<DateTime> {
    let input = input.trim();
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(input) {
        return Some(DateTime::from_chrono(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_chrono(dt.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(long_form(date), "January 5, 2024");
        let date = NaiveDate::from_ymd_opt(2023, 11, 23).unwrap();
        assert_eq!(long_form(date), "November 23, 2023");
    }

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_iso_date("2024-03-01").unwrap();
        assert_eq!(parsed.try_to_rfc3339_string().unwrap(), "2024-03-01T00:00:00Z");
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_iso_date("2024-03-01T18:30:00+05:30").unwrap();
        assert_eq!(parsed.try_to_rfc3339_string().unwrap(), "2024-03-01T13:00:00Z");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_iso_date("next tuesday").is_none());
    }
}
