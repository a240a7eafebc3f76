use crate::error::{DashError, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// An airport from the reference table, keyed by IATA code.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    /// Three-letter IATA code, e.g. "SFO"
    pub iata: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

const IATA_HEADERS: [&str; 2] = ["IATA", "IATA_CODE"];
const LATITUDE_HEADERS: [&str; 2] = ["LATITUDE", "LAT"];
const LONGITUDE_HEADERS: [&str; 3] = ["LONGITUDE", "LONG", "LON"];

fn find_column(headers: &StringRecord, names: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        .ok_or_else(|| DashError::MissingColumn {
            table: "airports",
            column: names[0].to_string(),
        })
}

impl AirportRecord {
    /// Parse a CSV string of airport data into a vector of AirportRecords.
    ///
    /// Expected CSV columns (any order, case-insensitive): IATA, LATITUDE, LONGITUDE.
    /// Rows without a code or with unparseable coordinates are skipped.
    pub fn parse_airport_csv(csv_object: &str) -> Result<Vec<AirportRecord>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let headers = rdr.headers()?.clone();
        let iata_idx = find_column(&headers, &IATA_HEADERS)?;
        let lat_idx = find_column(&headers, &LATITUDE_HEADERS)?;
        let lon_idx = find_column(&headers, &LONGITUDE_HEADERS)?;

        let mut airports = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            let iata = record.get(iata_idx).unwrap_or("").trim();
            let latitude = record.get(lat_idx).and_then(|s| s.trim().parse::<f64>().ok());
            let longitude = record.get(lon_idx).and_then(|s| s.trim().parse::<f64>().ok());
            match (iata.is_empty(), latitude, longitude) {
                (false, Some(latitude), Some(longitude)) => airports.push(AirportRecord {
                    iata: iata.to_string(),
                    latitude,
                    longitude,
                }),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("airports: skipped {} rows without code or coordinates", skipped);
        }
        Ok(airports)
    }
}

#[cfg(test)]
mod tests {
    use super::AirportRecord;
    use crate::error::DashError;

    #[test]
    fn test_parse_airport_csv() {
        let csv_data = "\
IATA,AIRPORT,CITY,STATE,COUNTRY,LATITUDE,LONGITUDE
ABQ,Albuquerque International Sunport,Albuquerque,NM,USA,35.04022,-106.60919
SFO,San Francisco International Airport,San Francisco,CA,USA,37.61900,-122.37484
";
        let airports = AirportRecord::parse_airport_csv(csv_data).unwrap();
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].iata, "ABQ");
        assert!((airports[0].latitude - 35.04022).abs() < f64::EPSILON);
        assert!((airports[1].longitude - (-122.37484)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_lowercase_aliases() {
        let csv_data = "\
iata,airport,city,state,country,lat,long
BOS,Logan International,Boston,MA,USA,42.36435,-71.00518
";
        let airports = AirportRecord::parse_airport_csv(csv_data).unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].iata, "BOS");
    }

    #[test]
    fn test_skips_rows_without_coordinates() {
        let csv_data = "\
IATA,LATITUDE,LONGITUDE
ECP,,
,30.0,-90.0
MSY,29.99339,-90.25803
";
        let airports = AirportRecord::parse_airport_csv(csv_data).unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].iata, "MSY");
    }

    #[test]
    fn test_missing_column() {
        let csv_data = "IATA,LATITUDE\nSFO,37.6\n";
        let err = AirportRecord::parse_airport_csv(csv_data).unwrap_err();
        assert!(matches!(err, DashError::MissingColumn { .. }));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv_data = "IATA,LATITUDE,LONGITUDE\n";
        let airports = AirportRecord::parse_airport_csv(csv_data).unwrap();
        assert_eq!(airports.len(), 0);
    }
}
