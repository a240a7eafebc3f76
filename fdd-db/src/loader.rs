//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! # CSV Formats
//!
//! - **Flights** (has headers): the delay dataset layout. Columns are
//!   located by name; required are `Year,Month,DayofMonth,UniqueCarrier,
//!   Origin,Dest` and the seven delay columns. Other columns are ignored.
//! - **Airports** (has headers): `IATA,LATITUDE,LONGITUDE` (any order,
//!   extra columns ignored).

use crate::Database;
use fdd_core::airport::AirportRecord;
use fdd_core::flight::FlightHeader;
use fdd_utils::dates::format_date;
use rusqlite::params;
use std::collections::BTreeSet;
use std::io::Read;

impl Database {
    /// Load flights from a CSV string.
    ///
    /// Rows without a valid Year/Month/DayofMonth date or without a carrier
    /// code are skipped. Empty and `NA` delay cells are stored as NULL.
    /// Returns the number of flights loaded.
    ///
    /// # Example CSV
    /// ```text
    /// ,Year,Month,DayofMonth,UniqueCarrier,ArrDelay,DepDelay,Origin,Dest,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay
    /// 0,2008,1,3,WN,-14.0,8.0,IAD,TPA,NA,NA,NA,NA,NA
    /// ```
    pub fn load_flights(&self, csv_data: &str) -> anyhow::Result<usize> {
        self.load_flights_from_reader(csv_data.as_bytes())
    }

    /// Load flights from any reader, e.g. an open CSV file.
    pub fn load_flights_from_reader<R: Read>(&self, reader: R) -> anyhow::Result<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let header = FlightHeader::from_headers(rdr.headers()?)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut count = 0usize;
        let mut skipped = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flights
                 (date, carrier, origin, dest, dep_delay, arr_delay, carrier_delay,
                  weather_delay, nas_delay, security_delay, late_aircraft_delay)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let flight = match header.parse_record(&r) {
                    Some(flight) => flight,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };
                stmt.execute(params![
                    format_date(&flight.date),
                    flight.carrier,
                    flight.origin,
                    flight.dest,
                    flight.dep_delay,
                    flight.arr_delay,
                    flight.carrier_delay,
                    flight.weather_delay,
                    flight.nas_delay,
                    flight.security_delay,
                    flight.late_aircraft_delay,
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        if skipped > 0 {
            log::warn!("loader: skipped {} flight rows without a valid date or carrier", skipped);
        }
        log::info!("loader: Loaded {} flights", count);
        Ok(count)
    }

    /// Load the airport reference table from a CSV string.
    ///
    /// Expected format (with headers): `IATA,LATITUDE,LONGITUDE`. Loading the
    /// same code twice keeps the last row. Returns the number of distinct
    /// codes written.
    ///
    /// # Example CSV
    /// ```text
    /// IATA,AIRPORT,CITY,STATE,COUNTRY,LATITUDE,LONGITUDE
    /// SFO,San Francisco International,San Francisco,CA,USA,37.619,-122.374
    /// ```
    pub fn load_airports(&self, csv_data: &str) -> anyhow::Result<usize> {
        let airports = AirportRecord::parse_airport_csv(csv_data)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO airports (iata, latitude, longitude)
                 VALUES (?1, ?2, ?3)",
            )?;
            for airport in &airports {
                stmt.execute(params![airport.iata, airport.latitude, airport.longitude])?;
            }
        }
        tx.commit()?;
        let stored = airports
            .iter()
            .map(|a| a.iata.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        if stored < airports.len() {
            log::warn!("loader: {} duplicate airport rows replaced", airports.len() - stored);
        }
        log::info!("loader: Loaded {} airports", stored);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    const FLIGHTS_CSV: &str = "\
,Year,Month,DayofMonth,DayOfWeek,UniqueCarrier,FlightNum,ArrDelay,DepDelay,Origin,Dest,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay
0,2008,1,3,4,WN,335,-14.0,8.0,IAD,TPA,NA,NA,NA,NA,NA
1,2008,1,3,4,WN,3231,2.0,19.0,IAD,TPA,NA,NA,NA,NA,NA
4,2008,1,3,4,WN,3920,34.0,34.0,IND,BWI,2.0,0.0,0.0,0.0,32.0
";

    #[test]
    fn load_flights_from_csv() {
        let db = Database::new().unwrap();
        let loaded = db.load_flights(FLIGHTS_CSV).unwrap();
        assert_eq!(loaded, 3);

        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM flights", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let date: String = conn
            .query_row("SELECT date FROM flights WHERE origin = 'IND'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(date, "2008-01-03");
    }

    #[test]
    fn load_flights_stores_na_as_null() {
        let db = Database::new().unwrap();
        db.load_flights(FLIGHTS_CSV).unwrap();

        let conn = db.conn().unwrap();
        let nulls: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM flights WHERE carrier_delay IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 2, "NA cells should be NULL, not zero");
    }

    #[test]
    fn load_flights_skips_invalid_dates() {
        let db = Database::new().unwrap();
        let csv = "\
Year,Month,DayofMonth,UniqueCarrier,Origin,Dest,DepDelay,ArrDelay,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay
2008,1,3,WN,IAD,TPA,8,-14,,,,,
2008,2,30,WN,IAD,TPA,8,-14,,,,,
NA,1,3,WN,IAD,TPA,8,-14,,,,,
2008,1,4,,IAD,TPA,8,-14,,,,,
";
        let loaded = db.load_flights(csv).unwrap();
        assert_eq!(loaded, 1, "Rows without a date or carrier are skipped");
    }

    #[test]
    fn load_flights_missing_column_fails() {
        let db = Database::new().unwrap();
        let csv = "Year,Month,DayofMonth,UniqueCarrier\n2008,1,3,WN\n";
        assert!(db.load_flights(csv).is_err());
    }

    #[test]
    fn load_airports_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
IATA,AIRPORT,CITY,STATE,COUNTRY,LATITUDE,LONGITUDE
SFO,San Francisco International,San Francisco,CA,USA,37.619,-122.374
LAX,Los Angeles International,Los Angeles,CA,USA,33.942,-118.408
";
        assert_eq!(db.load_airports(csv).unwrap(), 2);

        let conn = db.conn().unwrap();
        let latitude: f64 = conn
            .query_row("SELECT latitude FROM airports WHERE iata = 'LAX'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!((latitude - 33.942).abs() < 1e-9);
    }

    #[test]
    fn load_airports_replaces_on_conflict() {
        let db = Database::new().unwrap();
        db.load_airports("IATA,LATITUDE,LONGITUDE\nSFO,1.0,2.0\n").unwrap();
        db.load_airports("IATA,LATITUDE,LONGITUDE\nSFO,37.619,-122.374\n").unwrap();

        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM airports", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Should have 1 row after upsert");
    }

    #[test]
    fn load_airports_counts_distinct_codes() {
        let db = Database::new().unwrap();
        let csv = "IATA,LATITUDE,LONGITUDE\nSFO,1.0,2.0\nLAX,33.942,-118.408\nSFO,37.619,-122.374\n";
        assert_eq!(db.load_airports(csv).unwrap(), 2);

        let conn = db.conn().unwrap();
        let latitude: f64 = conn
            .query_row("SELECT latitude FROM airports WHERE iata = 'SFO'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!((latitude - 37.619).abs() < 1e-9);
    }
}
