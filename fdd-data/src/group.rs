use chrono::NaiveDate;
use fdd_core::error::{DashError, Result};
use fdd_core::flight::FlightRecord;
use fdd_utils::dates::{day_of_month, format_date, month_of};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Field a subset is grouped by.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Carrier,
    Origin,
    Dest,
    /// Calendar date
    Date,
    /// Calendar month, 1-12
    Month,
    /// Day of month, 1-31
    Day,
}

impl GroupKey {
    pub const ALL: [GroupKey; 6] = [
        GroupKey::Carrier,
        GroupKey::Origin,
        GroupKey::Dest,
        GroupKey::Date,
        GroupKey::Month,
        GroupKey::Day,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupKey::Carrier => "carrier",
            GroupKey::Origin => "origin",
            GroupKey::Dest => "dest",
            GroupKey::Date => "date",
            GroupKey::Month => "month",
            GroupKey::Day => "day",
        }
    }

    /// Temporal keys are displayed chronologically; the others are ranked.
    pub fn is_temporal(&self) -> bool {
        matches!(self, GroupKey::Date | GroupKey::Month | GroupKey::Day)
    }

    pub fn value_of(&self, record: &FlightRecord) -> GroupValue {
        match self {
            GroupKey::Carrier => GroupValue::Text(record.carrier.clone()),
            GroupKey::Origin => GroupValue::Text(record.origin.clone()),
            GroupKey::Dest => GroupValue::Text(record.dest.clone()),
            GroupKey::Date => GroupValue::Date(record.date),
            GroupKey::Month => GroupValue::Number(month_of(&record.date)),
            GroupKey::Day => GroupValue::Number(day_of_month(&record.date)),
        }
    }
}

impl FromStr for GroupKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        GroupKey::ALL
            .iter()
            .find(|k| k.name() == wanted)
            .copied()
            .ok_or_else(|| {
                let expected: Vec<&str> = GroupKey::ALL.iter().map(|k| k.name()).collect();
                DashError::invalid("group key", s, &expected)
            })
    }
}

/// Time granularity of trend charts.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Date,
    Month,
    Day,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Date, TimeUnit::Month, TimeUnit::Day];

    pub fn group_key(&self) -> GroupKey {
        match self {
            TimeUnit::Date => GroupKey::Date,
            TimeUnit::Month => GroupKey::Month,
            TimeUnit::Day => GroupKey::Day,
        }
    }

    pub fn name(&self) -> &'static str {
        self.group_key().name()
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Date => "Date",
            TimeUnit::Month => "Month",
            TimeUnit::Day => "Day of Month",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        TimeUnit::ALL
            .iter()
            .find(|u| u.name() == wanted)
            .copied()
            .ok_or_else(|| DashError::invalid("time unit", s, &["date", "month", "day"]))
    }
}

/// The value of a group key for one record.
///
/// Ordering is by variant first, then by the inner value, so numbers sort
/// numerically and dates chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Text(String),
    Number(u32),
    Date(NaiveDate),
}

impl GroupValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GroupValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Text(s) => f.write_str(s),
            GroupValue::Number(n) => write!(f, "{}", n),
            GroupValue::Date(d) => f.write_str(&format_date(d)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::flight;

    #[test]
    fn group_values_for_record() {
        let record = flight((2008, 11, 23), "WN", None, None);
        assert_eq!(GroupKey::Carrier.value_of(&record), GroupValue::Text("WN".into()));
        assert_eq!(GroupKey::Month.value_of(&record), GroupValue::Number(11));
        assert_eq!(GroupKey::Day.value_of(&record), GroupValue::Number(23));
        assert_eq!(GroupKey::Date.value_of(&record).to_string(), "2008-11-23");
    }

    #[test]
    fn numbers_sort_numerically() {
        let mut values = vec![
            GroupValue::Number(10),
            GroupValue::Number(2),
            GroupValue::Number(1),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![GroupValue::Number(1), GroupValue::Number(2), GroupValue::Number(10)]
        );
    }

    #[test]
    fn temporal_keys() {
        assert!(GroupKey::Month.is_temporal());
        assert!(GroupKey::Date.is_temporal());
        assert!(!GroupKey::Carrier.is_temporal());
        assert!(!GroupKey::Dest.is_temporal());
    }

    #[test]
    fn parse_keys_and_units() {
        assert_eq!("carrier".parse::<GroupKey>().unwrap(), GroupKey::Carrier);
        assert_eq!("Month".parse::<TimeUnit>().unwrap(), TimeUnit::Month);
        assert!(matches!("week".parse::<TimeUnit>(), Err(DashError::InvalidArgument(_))));
        assert!(matches!("airline".parse::<GroupKey>(), Err(DashError::InvalidArgument(_))));
    }

    #[test]
    fn values_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![
            GroupValue::Text("WN".into()),
            GroupValue::Number(3),
            GroupValue::Date(NaiveDate::from_ymd_opt(2008, 1, 3).unwrap()),
        ])
        .unwrap();
        assert_eq!(json, r#"["WN",3,"2008-01-03"]"#);
    }
}
