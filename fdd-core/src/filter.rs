use crate::date_range::DateRange;
use crate::flight::FlightRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which carriers a filter admits.
///
/// `All` applies no carrier predicate. `Only` admits exactly the listed
/// codes, so an empty set admits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierSelection {
    All,
    Only(BTreeSet<String>),
}

impl CarrierSelection {
    pub fn only<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CarrierSelection::Only(codes.into_iter().map(Into::into).collect())
    }

    pub fn admits(&self, carrier: &str) -> bool {
        match self {
            CarrierSelection::All => true,
            CarrierSelection::Only(codes) => codes.contains(carrier),
        }
    }

    /// True when the selection can match no record at all.
    pub fn is_nothing(&self) -> bool {
        matches!(self, CarrierSelection::Only(codes) if codes.is_empty())
    }
}

/// Per-interaction filter: a date range plus a carrier selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub range: DateRange,
    pub carriers: CarrierSelection,
}

impl FilterSpec {
    pub fn new(range: DateRange, carriers: CarrierSelection) -> Self {
        FilterSpec { range, carriers }
    }

    /// True when the filter can be satisfied by no record.
    pub fn is_vacuous(&self) -> bool {
        self.range.is_empty() || self.carriers.is_nothing()
    }

    pub fn matches(&self, record: &FlightRecord) -> bool {
        self.range.contains(&record.date) && self.carriers.admits(&record.carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), carrier: &str) -> FlightRecord {
        FlightRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            carrier: carrier.to_string(),
            origin: "SFO".to_string(),
            dest: "LAX".to_string(),
            dep_delay: None,
            arr_delay: None,
            carrier_delay: None,
            weather_delay: None,
            nas_delay: None,
            security_delay: None,
            late_aircraft_delay: None,
        }
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn matches_date_and_carrier() {
        let filter = FilterSpec::new(
            range((2008, 1, 1), (2008, 1, 31)),
            CarrierSelection::only(["WN", "AA"]),
        );
        assert!(filter.matches(&record((2008, 1, 15), "WN")));
        assert!(filter.matches(&record((2008, 1, 31), "AA")));
        assert!(!filter.matches(&record((2008, 2, 1), "WN")));
        assert!(!filter.matches(&record((2008, 1, 15), "UA")));
    }

    #[test]
    fn all_admits_every_carrier() {
        let filter = FilterSpec::new(range((2008, 1, 1), (2008, 12, 31)), CarrierSelection::All);
        assert!(filter.matches(&record((2008, 6, 1), "ZZ")));
        assert!(!filter.is_vacuous());
    }

    #[test]
    fn empty_selection_admits_nothing() {
        let filter = FilterSpec::new(
            range((2008, 1, 1), (2008, 12, 31)),
            CarrierSelection::Only(BTreeSet::new()),
        );
        assert!(filter.is_vacuous());
        assert!(!filter.matches(&record((2008, 6, 1), "WN")));
    }

    #[test]
    fn reversed_range_is_vacuous() {
        let filter = FilterSpec::new(range((2008, 2, 1), (2008, 1, 1)), CarrierSelection::All);
        assert!(filter.is_vacuous());
    }

    #[test]
    fn selection_json_shape() {
        assert_eq!(serde_json::to_string(&CarrierSelection::All).unwrap(), "\"all\"");
        let only: CarrierSelection = serde_json::from_str(r#"{"only":["WN","AA"]}"#).unwrap();
        assert_eq!(only, CarrierSelection::only(["AA", "WN"]));
    }
}
