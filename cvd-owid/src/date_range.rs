use chrono::NaiveDate;
use cvd_utils::dates::format_date;
use std::fmt;

/// An inclusive date interval `[start, end]`.
///
/// A range whose start lies after its end is empty and contains no date.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    pub fn is_empty(&self) -> bool {
        self.0 > self.1
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0 <= *date && *date <= self.1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", format_date(&self.0), format_date(&self.1))
    }
}
