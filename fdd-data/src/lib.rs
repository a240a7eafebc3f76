//! Aggregation of flight delay records for charting.
//!
//! Every function here is a pure transformation of a filtered subset:
//! - `group`: grouping keys (carrier, airport, date, month, day) and their values
//! - `aggregate`: one reduced value per group, ranked or chronological
//! - `trend`: several delay columns reduced over the same time key and
//!   joined by key

pub mod aggregate;
pub mod group;
pub mod trend;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use fdd_core::flight::FlightRecord;

    /// A flight with only the fields the aggregation tests care about.
    pub fn flight(
        date: (i32, u32, u32),
        carrier: &str,
        arr_delay: Option<f64>,
        dep_delay: Option<f64>,
    ) -> FlightRecord {
        FlightRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            carrier: carrier.to_string(),
            origin: "ORD".to_string(),
            dest: "DFW".to_string(),
            dep_delay,
            arr_delay,
            carrier_delay: None,
            weather_delay: None,
            nas_delay: None,
            security_delay: None,
            late_aircraft_delay: None,
        }
    }
}
