use crate::error::{DashError, Result};
use chrono::NaiveDate;
use fdd_utils::dates::{format_date, parse_date};
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range: a date is inside iff
/// `start <= date <= end`. A range whose start is after its end is
/// valid but contains no dates.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Serialize, Deserialize)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Parse a range from two "YYYY-MM-DD" strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start).map_err(|_| DashError::InvalidDate(start.to_string()))?;
        let end = parse_date(end).map_err(|_| DashError::InvalidDate(end.to_string()))?;
        Ok(DateRange(start, end))
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0 <= *date && *date <= self.1
    }

    /// True when no date can satisfy the range (start after end).
    pub fn is_empty(&self) -> bool {
        self.0 > self.1
    }

    /// Bounds formatted as "YYYY-MM-DD", the representation stored in the database.
    pub fn bounds_iso(&self) -> (String, String) {
        (format_date(&self.0), format_date(&self.1))
    }
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_inclusive_bounds() {
        let start = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2008, 1, 5).unwrap();
        let range = DateRange(start, end);
        assert!(range.contains(&start));
        assert!(range.contains(&end));
        assert!(range.contains(&NaiveDate::from_ymd_opt(2008, 1, 3).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2008, 1, 6).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2007, 12, 31).unwrap()));
    }

    #[test]
    fn test_date_range_single_day() {
        let day = NaiveDate::from_ymd_opt(2008, 3, 15).unwrap();
        let range = DateRange(day, day);
        assert!(range.contains(&day));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_date_range_empty() {
        let start = NaiveDate::from_ymd_opt(2008, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2008, 3, 14).unwrap();
        let range = DateRange(start, end);
        assert!(range.is_empty());
        assert!(!range.contains(&start));
        assert!(!range.contains(&end));
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2008-01-01", "2008-12-31").unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2008, 1, 1).unwrap());
        assert_eq!(
            range.bounds_iso(),
            ("2008-01-01".to_string(), "2008-12-31".to_string())
        );
        assert!(DateRange::parse("2008/01/01", "2008-12-31").is_err());
    }
}
