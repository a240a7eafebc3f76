use crate::error::{DashError, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use fdd_utils::dates::date_from_parts;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One flight from the delay dataset.
///
/// `date` is always present; every delay value is in minutes and may be
/// missing in the source data.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    pub date: NaiveDate,
    /// UniqueCarrier code, e.g. "WN"
    pub carrier: String,
    pub origin: String,
    pub dest: String,
    pub dep_delay: Option<f64>,
    pub arr_delay: Option<f64>,
    pub carrier_delay: Option<f64>,
    pub weather_delay: Option<f64>,
    pub nas_delay: Option<f64>,
    pub security_delay: Option<f64>,
    pub late_aircraft_delay: Option<f64>,
}

impl FlightRecord {
    /// Value of the given delay column for this flight.
    pub fn delay(&self, column: DelayColumn) -> Option<f64> {
        match column {
            DelayColumn::DepDelay => self.dep_delay,
            DelayColumn::ArrDelay => self.arr_delay,
            DelayColumn::CarrierDelay => self.carrier_delay,
            DelayColumn::WeatherDelay => self.weather_delay,
            DelayColumn::NasDelay => self.nas_delay,
            DelayColumn::SecurityDelay => self.security_delay,
            DelayColumn::LateAircraftDelay => self.late_aircraft_delay,
        }
    }
}

/// The numeric delay columns of the dataset.
///
/// Serialized with the dataset's column names ("ArrDelay", "NASDelay", ...).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DelayColumn {
    DepDelay,
    ArrDelay,
    CarrierDelay,
    WeatherDelay,
    #[serde(rename = "NASDelay")]
    NasDelay,
    SecurityDelay,
    LateAircraftDelay,
}

impl DelayColumn {
    pub const ALL: [DelayColumn; 7] = [
        DelayColumn::DepDelay,
        DelayColumn::ArrDelay,
        DelayColumn::CarrierDelay,
        DelayColumn::WeatherDelay,
        DelayColumn::NasDelay,
        DelayColumn::SecurityDelay,
        DelayColumn::LateAircraftDelay,
    ];

    /// The five delay causes, excluding overall departure/arrival delay.
    pub const CAUSES: [DelayColumn; 5] = [
        DelayColumn::CarrierDelay,
        DelayColumn::WeatherDelay,
        DelayColumn::NasDelay,
        DelayColumn::SecurityDelay,
        DelayColumn::LateAircraftDelay,
    ];

    /// Column name as it appears in the CSV header.
    pub fn column_name(&self) -> &'static str {
        match self {
            DelayColumn::DepDelay => "DepDelay",
            DelayColumn::ArrDelay => "ArrDelay",
            DelayColumn::CarrierDelay => "CarrierDelay",
            DelayColumn::WeatherDelay => "WeatherDelay",
            DelayColumn::NasDelay => "NASDelay",
            DelayColumn::SecurityDelay => "SecurityDelay",
            DelayColumn::LateAircraftDelay => "LateAircraftDelay",
        }
    }

    /// Column name in the `flights` table.
    pub fn sql_column(&self) -> &'static str {
        match self {
            DelayColumn::DepDelay => "dep_delay",
            DelayColumn::ArrDelay => "arr_delay",
            DelayColumn::CarrierDelay => "carrier_delay",
            DelayColumn::WeatherDelay => "weather_delay",
            DelayColumn::NasDelay => "nas_delay",
            DelayColumn::SecurityDelay => "security_delay",
            DelayColumn::LateAircraftDelay => "late_aircraft_delay",
        }
    }

    /// Human-readable label for axis titles and legends.
    pub fn label(&self) -> &'static str {
        match self {
            DelayColumn::DepDelay => "Departure Delay",
            DelayColumn::ArrDelay => "Arrival Delay",
            DelayColumn::CarrierDelay => "Carrier Delay",
            DelayColumn::WeatherDelay => "Weather Delay",
            DelayColumn::NasDelay => "NAS Delay",
            DelayColumn::SecurityDelay => "Security Delay",
            DelayColumn::LateAircraftDelay => "Late Aircraft Delay",
        }
    }
}

impl fmt::Display for DelayColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for DelayColumn {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        DelayColumn::ALL
            .iter()
            .find(|c| c.column_name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| {
                let expected: Vec<&str> = DelayColumn::ALL.iter().map(|c| c.column_name()).collect();
                DashError::invalid("delay column", s, &expected)
            })
    }
}

/// Parse one delay cell. Empty cells and "NA" are missing values.
pub fn parse_delay(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("NA") {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Column positions of the fields we read from a flights CSV.
///
/// The dataset carries many more columns than we use (and an unnamed
/// leading index column), so fields are located by header name.
#[derive(Debug, Clone)]
pub struct FlightHeader {
    year: usize,
    month: usize,
    day: usize,
    carrier: usize,
    origin: usize,
    dest: usize,
    delays: [usize; 7],
}

impl FlightHeader {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashError::MissingColumn {
                    table: "flights",
                    column: name.to_string(),
                })
        };
        let mut delays = [0usize; 7];
        for (slot, column) in delays.iter_mut().zip(DelayColumn::ALL.iter()) {
            *slot = find(column.column_name())?;
        }
        Ok(FlightHeader {
            year: find("Year")?,
            month: find("Month")?,
            day: find("DayofMonth")?,
            carrier: find("UniqueCarrier")?,
            origin: find("Origin")?,
            dest: find("Dest")?,
            delays,
        })
    }

    /// Convert a CSV row into a record. Returns `None` when the row has no
    /// valid date or no carrier code.
    pub fn parse_record(&self, record: &StringRecord) -> Option<FlightRecord> {
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        let date = date_from_parts(field(self.year), field(self.month), field(self.day))?;
        let carrier = field(self.carrier);
        if carrier.is_empty() {
            return None;
        }
        let delay = |column: DelayColumn| parse_delay(field(self.delays[column as usize]));
        Some(FlightRecord {
            date,
            carrier: carrier.to_string(),
            origin: field(self.origin).to_string(),
            dest: field(self.dest).to_string(),
            dep_delay: delay(DelayColumn::DepDelay),
            arr_delay: delay(DelayColumn::ArrDelay),
            carrier_delay: delay(DelayColumn::CarrierDelay),
            weather_delay: delay(DelayColumn::WeatherDelay),
            nas_delay: delay(DelayColumn::NasDelay),
            security_delay: delay(DelayColumn::SecurityDelay),
            late_aircraft_delay: delay(DelayColumn::LateAircraftDelay),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;

    const SAMPLE: &str = "\
,Year,Month,DayofMonth,DayOfWeek,UniqueCarrier,FlightNum,ArrDelay,DepDelay,Origin,Dest,Distance,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay
0,2008,1,3,4,WN,335,-14.0,8.0,IAD,TPA,810,NA,NA,NA,NA,NA
1,2008,1,3,4,WN,3231,2.0,19.0,IAD,TPA,810,,,,,
4,2008,1,3,4,WN,3920,34.0,34.0,IND,BWI,515,2.0,0.0,0.0,0.0,32.0
9,2008,2,30,4,WN,378,57.0,67.0,IND,LAS,1591,10.0,0.0,0.0,0.0,47.0
";

    fn parse_sample() -> Vec<Option<FlightRecord>> {
        let mut rdr = ReaderBuilder::new().from_reader(SAMPLE.as_bytes());
        let header = FlightHeader::from_headers(rdr.headers().unwrap()).unwrap();
        rdr.records()
            .map(|r| header.parse_record(&r.unwrap()))
            .collect()
    }

    #[test]
    fn test_parse_records_by_header_name() {
        let rows = parse_sample();
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2008, 1, 3).unwrap());
        assert_eq!(first.carrier, "WN");
        assert_eq!(first.origin, "IAD");
        assert_eq!(first.dest, "TPA");
        assert_eq!(first.arr_delay, Some(-14.0));
        assert_eq!(first.dep_delay, Some(8.0));
        assert_eq!(first.carrier_delay, None);
    }

    #[test]
    fn test_missing_values_are_none() {
        let rows = parse_sample();
        let second = rows[1].as_ref().unwrap();
        assert_eq!(second.late_aircraft_delay, None);
        let third = rows[2].as_ref().unwrap();
        assert_eq!(third.delay(DelayColumn::LateAircraftDelay), Some(32.0));
        assert_eq!(third.delay(DelayColumn::NasDelay), Some(0.0));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let rows = parse_sample();
        assert!(rows[3].is_none(), "February 30th is not a date");
    }

    #[test]
    fn test_missing_column() {
        let headers = StringRecord::from(vec!["Year", "Month", "DayofMonth", "UniqueCarrier"]);
        match FlightHeader::from_headers(&headers) {
            Err(DashError::MissingColumn { column, .. }) => assert_eq!(column, "DepDelay"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_delay_column_from_str() {
        assert_eq!("ArrDelay".parse::<DelayColumn>().unwrap(), DelayColumn::ArrDelay);
        assert_eq!("nasdelay".parse::<DelayColumn>().unwrap(), DelayColumn::NasDelay);
        assert!(matches!(
            "TaxiOut".parse::<DelayColumn>(),
            Err(DashError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_delay_column_serde_uses_dataset_names() {
        let json = serde_json::to_string(&DelayColumn::NasDelay).unwrap();
        assert_eq!(json, "\"NASDelay\"");
        let back: DelayColumn = serde_json::from_str("\"LateAircraftDelay\"").unwrap();
        assert_eq!(back, DelayColumn::LateAircraftDelay);
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("12.5"), Some(12.5));
        assert_eq!(parse_delay(" -3 "), Some(-3.0));
        assert_eq!(parse_delay("NA"), None);
        assert_eq!(parse_delay(""), None);
        assert_eq!(parse_delay("abc"), None);
    }
}
