//! Shared utility functions for CVD crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// ISO calendar date, the format used by OWID exports.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Date-only formats accepted in the `date` column, tried in order.
    const DATE_FORMATS: [&str; 3] = [DATE_FORMAT, "%Y/%m/%d", "%Y%m%d"];

    /// Timestamp formats accepted in the `date` column; the time part is dropped.
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| DateError(s.to_string()))
    }

    /// Parse the `date` cell of a dataset row.
    ///
    /// Accepts plain dates (`2021-03-01`, `2021/03/01`, `20210301`) and
    /// timestamps (`2021-03-01 00:00:00`, `2021-03-01T00:00:00`). Blank
    /// cells are an error like any other unparseable value.
    pub fn parse_observation_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError(s.to_string()));
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(timestamp.date());
            }
        }
        Err(DateError(s.to_string()))
    }

}

/// Number formatting for tables, summaries and chart axes.
pub mod numbers {
    /// Format a count with thousands separators, e.g. `1234567.0` -> `"1,234,567"`.
    ///
    /// Fractional values keep two decimals.
    pub fn format_count(value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let negative = value < 0.0;
        let abs = value.abs();
        let (whole, fraction) = if abs.fract() == 0.0 {
            (format!("{abs:.0}"), None)
        } else {
            let fixed = format!("{abs:.2}");
            match fixed.split_once('.') {
                Some((w, f)) => (w.to_string(), Some(f.to_string())),
                None => (fixed, None),
            }
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        match fraction {
            Some(f) => format!("{sign}{grouped}.{f}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Short axis label, e.g. `2_500_000.0` -> `"2.5M"`.
    pub fn format_compact(value: f64) -> String {
        let abs = value.abs();
        let (scaled, suffix) = if abs >= 1e9 {
            (value / 1e9, "B")
        } else if abs >= 1e6 {
            (value / 1e6, "M")
        } else if abs >= 1e3 {
            (value / 1e3, "K")
        } else {
            (value, "")
        };
        let text = format!("{scaled:.1}");
        let text = text.strip_suffix(".0").unwrap_or(&text);
        format!("{text}{suffix}")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_count() {
            assert_eq!(format_count(0.0), "0");
            assert_eq!(format_count(999.0), "999");
            assert_eq!(format_count(1000.0), "1,000");
            assert_eq!(format_count(1234567.0), "1,234,567");
            assert_eq!(format_count(-45000.0), "-45,000");
            assert_eq!(format_count(1234.5), "1,234.50");
        }

        #[test]
        fn test_format_compact() {
            assert_eq!(format_compact(0.0), "0");
            assert_eq!(format_compact(950.0), "950");
            assert_eq!(format_compact(1500.0), "1.5K");
            assert_eq!(format_compact(2_000_000.0), "2M");
            assert_eq!(format_compact(103_436_829.0), "103.4M");
            assert_eq!(format_compact(7_000_000_000.0), "7B");
        }
    }
}

/// Error types
pub mod error {
    use thiserror::Error;

    /// A date cell that could not be parsed; carries the raw text.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("Date error: {0:?} is not a recognised date")]
    pub struct DateError(pub String);
}
