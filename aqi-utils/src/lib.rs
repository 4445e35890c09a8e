//! Shared utility functions for AQI crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y%m%d")?)
    }

    /// Parse either "YYYY-MM-DD" or "YYYYMMDD".
    pub fn parse_any_date(s: &str) -> anyhow::Result<NaiveDate> {
        parse_date(s).or_else(|_| parse_date_compact(s))
    }

    /// Format a timestamp as "YYYY-MM-DDTHH:MM:SS"
    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Parse an ISO 8601 timestamp. RFC 3339 offsets are converted to UTC;
    /// a bare date means midnight.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
            return Ok(timestamp.naive_utc());
        }
        for format in TIMESTAMP_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(timestamp);
            }
        }
        let date = parse_any_date(s)?;
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid midnight for {}", date))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2024-08-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_any_date() {
            let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
            assert_eq!(parse_any_date("2024-08-15").unwrap(), date);
            assert_eq!(parse_any_date("20240815").unwrap(), date);
            assert_eq!(parse_any_date(" 2024-08-15 ").unwrap(), date);
            assert!(parse_any_date("08/15/2024").is_err());
        }

        #[test]
        fn test_parse_timestamp() {
            let expected = NaiveDate::from_ymd_opt(2024, 8, 15)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap();
            assert_eq!(parse_timestamp("2024-08-15T13:30:00").unwrap(), expected);
            assert_eq!(parse_timestamp("2024-08-15 13:30").unwrap(), expected);
            assert_eq!(parse_timestamp("2024-08-15T15:30:00+02:00").unwrap(), expected);
            assert_eq!(parse_timestamp("2024-08-15T13:30:00Z").unwrap(), expected);
            assert_eq!(
                format_timestamp(&parse_timestamp("2024-08-15").unwrap()),
                "2024-08-15T00:00:00"
            );
            assert!(parse_timestamp("yesterday").is_err());
        }
    }
}

/// Lenient parsing of AQI readings from text sources.
pub mod readings {
    use crate::error::ReadingError;

    /// Missing-value markers seen in exported air quality data.
    pub const MISSING_MARKERS: [&str; 5] = ["", "---", "n/a", "na", "null"];

    /// Parse a reading cell. Missing markers become `None`; anything else that
    /// isn't a number is reported so the caller can decide whether to skip it.
    pub fn parse_reading(cell: &str) -> Result<Option<f64>, ReadingError> {
        let trimmed = cell.trim();
        if MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
        {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ReadingError(trimmed.to_string())),
        }
    }

    /// Like [`parse_reading`] but never fails: unparseable cells are `None`.
    pub fn parse_reading_lossy(cell: &str) -> Option<f64> {
        parse_reading(cell).ok().flatten()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_reading() {
            assert_eq!(parse_reading("42.6").unwrap(), Some(42.6));
            assert_eq!(parse_reading(" 17 ").unwrap(), Some(17.0));
            assert_eq!(parse_reading("-5").unwrap(), Some(-5.0));
            assert_eq!(parse_reading("").unwrap(), None);
            assert_eq!(parse_reading("---").unwrap(), None);
            assert_eq!(parse_reading("N/A").unwrap(), None);
            assert_eq!(parse_reading("NaN").unwrap(), None);
        }

        #[test]
        fn test_parse_reading_rejects_text() {
            let err = parse_reading("smoky").unwrap_err();
            assert_eq!(err.to_string(), "Reading error: not a number: smoky");
            assert_eq!(parse_reading_lossy("smoky"), None);
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    /// A reading cell that is neither a number nor a known missing marker.
    #[derive(Debug, PartialEq)]
    pub struct ReadingError(pub String);

    impl fmt::Display for ReadingError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Reading error: not a number: {}", self.0)
        }
    }

    impl std::error::Error for ReadingError {}
}
