//! Typed query methods for retrieving flight and airport data.
//!
//! `query_flights` is the filter step of every dashboard recomputation:
//! it narrows the flights table by an inclusive date range and a carrier
//! selection and returns owned records for the aggregator and charts.

use crate::models::DatasetSummary;
use crate::Database;
use chrono::NaiveDate;
use fdd_core::airport::AirportRecord;
use fdd_core::date_range::DateRange;
use fdd_core::filter::{CarrierSelection, FilterSpec};
use fdd_core::flight::FlightRecord;
use rusqlite::{params_from_iter, types::Type, Row};
use std::collections::BTreeSet;

const FLIGHT_COLUMNS: &str = "date, carrier, origin, dest, dep_delay, arr_delay, carrier_delay,
     weather_delay, nas_delay, security_delay, late_aircraft_delay";

fn parse_date_column(idx: usize, text: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn flight_from_row(row: &Row<'_>) -> rusqlite::Result<FlightRecord> {
    Ok(FlightRecord {
        date: parse_date_column(0, row.get(0)?)?,
        carrier: row.get(1)?,
        origin: row.get(2)?,
        dest: row.get(3)?,
        dep_delay: row.get(4)?,
        arr_delay: row.get(5)?,
        carrier_delay: row.get(6)?,
        weather_delay: row.get(7)?,
        nas_delay: row.get(8)?,
        security_delay: row.get(9)?,
        late_aircraft_delay: row.get(10)?,
    })
}

impl Database {
    /// Get the flights matching a filter.
    ///
    /// A flight is returned iff `start <= date <= end` and its carrier is
    /// admitted by the selection. Each matching flight appears once, in
    /// load order. A reversed range or an empty `Only` selection yields an
    /// empty result without querying.
    pub fn query_flights(&self, filter: &FilterSpec) -> anyhow::Result<Vec<FlightRecord>> {
        if filter.is_vacuous() {
            log::info!("query: query_flights short-circuited on a vacuous filter");
            return Ok(Vec::new());
        }
        let (start, end) = filter.range.bounds_iso();
        let mut sql = format!(
            "SELECT {} FROM flights WHERE date >= ?1 AND date <= ?2",
            FLIGHT_COLUMNS
        );
        let mut values = vec![start, end];
        if let CarrierSelection::Only(codes) = &filter.carriers {
            let placeholders: Vec<String> = (0..codes.len())
                .map(|i| format!("?{}", i + 3))
                .collect();
            sql.push_str(&format!(" AND carrier IN ({})", placeholders.join(", ")));
            values.extend(codes.iter().cloned());
        }
        sql.push_str(" ORDER BY id");

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), flight_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_flights returned {} records", rows.len());
        Ok(rows)
    }

    /// Get the airport reference table, ordered by IATA code.
    pub fn query_airports(&self) -> anyhow::Result<Vec<AirportRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT iata, latitude, longitude FROM airports
             ORDER BY iata",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(AirportRecord {
                    iata: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_airports returned {} records", rows.len());
        Ok(rows)
    }

    /// Get every airport code that appears as an origin or destination.
    pub fn query_present_airport_codes(&self) -> anyhow::Result<BTreeSet<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT origin FROM flights
             UNION
             SELECT dest FROM flights",
        )?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        log::info!(
            "query: query_present_airport_codes returned {} codes",
            codes.len()
        );
        Ok(codes)
    }

    /// Get the distinct carrier codes present in the flights table.
    pub fn query_carriers(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT carrier FROM flights ORDER BY carrier")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get the earliest and latest flight dates, or `None` when no flights
    /// are loaded.
    pub fn query_date_range(&self) -> anyhow::Result<Option<DateRange>> {
        let conn = self.conn()?;
        let (min_date, max_date) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM flights", [], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            })?;
        match (min_date, max_date) {
            (Some(min_date), Some(max_date)) => Ok(Some(DateRange(
                parse_date_column(0, min_date)?,
                parse_date_column(1, max_date)?,
            ))),
            _ => Ok(None),
        }
    }

    pub fn flight_count(&self) -> anyhow::Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM flights", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Summarize the loaded dataset.
    pub fn summary(&self) -> anyhow::Result<DatasetSummary> {
        let airports = {
            let conn = self.conn()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM airports", [], |row| row.get(0))?;
            count as usize
        };
        Ok(DatasetSummary {
            flights: self.flight_count()?,
            airports,
            carriers: self.query_carriers()?,
            date_range: self.query_date_range()?,
        })
    }
}
