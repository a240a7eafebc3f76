//! In-memory SQLite dataset layer for flight delay data.
//!
//! This crate loads the flights CSV and the airport reference CSV into an
//! in-memory SQLite database once at startup and exposes typed query
//! methods. It is the only owner of the base tables: every consumer gets
//! owned, read-only subsets back from the query methods.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` wrapper so the database can be shared with
//!   the HTTP server's blocking workers
//! - In-memory SQLite via `rusqlite`
//! - Date-range and carrier filtering pushed down into SQL (`query_flights`)
//!
//! # Usage
//!
//! ```rust
//! use fdd_core::date_range::DateRange;
//! use fdd_core::filter::{CarrierSelection, FilterSpec};
//! use fdd_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_airports("IATA,LATITUDE,LONGITUDE\nSFO,37.619,-122.374\n").unwrap();
//! db.load_flights(
//!     "Year,Month,DayofMonth,UniqueCarrier,Origin,Dest,DepDelay,ArrDelay,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay\n\
//!      2008,1,3,WN,SFO,LAX,8,-14,NA,NA,NA,NA,NA\n",
//! )
//! .unwrap();
//!
//! let filter = FilterSpec::new(DateRange::parse("2008-01-01", "2008-01-31").unwrap(), CarrierSelection::All);
//! let flights = db.query_flights(&filter).unwrap();
//! assert_eq!(flights.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory SQLite database holding the flights and airports tables.
///
/// This struct is cheaply cloneable (via `Arc`); clones share the same
/// connection.
///
/// # Example
///
/// ```rust
/// use fdd_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_airports("IATA,LATITUDE,LONGITUDE\nSFO,37.619,-122.374\n").unwrap();
/// let airports = db.query_airports().unwrap();
/// assert_eq!(airports.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        // Both should reference the same underlying connection
        db.load_airports("IATA,LATITUDE,LONGITUDE\nSFO,37.619,-122.374\n")
            .unwrap();
        let airports = db2.query_airports().unwrap();
        assert_eq!(airports.len(), 1, "Clone should see same data via shared Arc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_airports().unwrap().is_empty());
        assert_eq!(db.flight_count().unwrap(), 0);
        assert!(db.query_date_range().unwrap().is_none());
    }

    #[test]
    fn database_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }
}
