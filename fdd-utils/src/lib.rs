//! Shared utility functions for FDD crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Build a date from the separate Year / Month / DayofMonth columns of the
    /// flight dataset. Returns `None` when any part is missing or the
    /// combination is not a real calendar date.
    pub fn date_from_parts(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
        let year = year.trim().parse::<i32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        let day = day.trim().parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Calendar month (1-12) used as the monthly trend key.
    pub fn month_of(date: &NaiveDate) -> u32 {
        date.month()
    }

    /// Day of month (1-31) used as the daily trend key.
    pub fn day_of_month(date: &NaiveDate) -> u32 {
        date.day()
    }

}
