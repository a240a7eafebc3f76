//! The loaded dataset and the handle the server swaps on reload.

use crate::config::DataSources;
use anyhow::Context;
use fdd_core::carrier::CarrierDirectory;
use fdd_core::date_range::DateRange;
use fdd_db::Database;
use std::fs::{self, File};
use std::io::BufReader;
use std::sync::{Arc, RwLock};

/// Everything a render needs: the database, the carrier names, and the
/// facts about the data the controls are initialised from.
///
/// A context is never mutated after construction. Reloading builds a new
/// one from the same sources.
#[derive(Debug)]
pub struct DataContext {
    sources: Option<DataSources>,
    db: Database,
    carriers: CarrierDirectory,
    carrier_codes: Vec<String>,
    bounds: Option<DateRange>,
}

impl DataContext {
    /// Read both CSV files into a fresh in-memory database.
    pub fn load(sources: &DataSources) -> anyhow::Result<Self> {
        let db = Database::new()?;

        let flights = File::open(&sources.flights)
            .with_context(|| format!("Failed to open flights file: {}", sources.flights.display()))?;
        db.load_flights_from_reader(BufReader::new(flights))
            .with_context(|| format!("Failed to load flights from {}", sources.flights.display()))?;

        let airports = fs::read_to_string(&sources.airports)
            .with_context(|| format!("Failed to read airports file: {}", sources.airports.display()))?;
        db.load_airports(&airports)
            .with_context(|| format!("Failed to load airports from {}", sources.airports.display()))?;

        Self::from_database(db, Some(sources.clone()))
    }

    /// Build a context from CSV text already in memory. Such a context has
    /// no sources and cannot be reloaded.
    pub fn from_csv(flights_csv: &str, airports_csv: &str) -> anyhow::Result<Self> {
        let db = Database::new()?;
        db.load_flights(flights_csv)?;
        db.load_airports(airports_csv)?;
        Self::from_database(db, None)
    }

    fn from_database(db: Database, sources: Option<DataSources>) -> anyhow::Result<Self> {
        let carrier_codes = db.query_carriers()?;
        let bounds = db.query_date_range()?;
        log::info!(
            "context: {} carriers, date bounds {:?}",
            carrier_codes.len(),
            bounds.map(|b| b.bounds_iso())
        );
        Ok(DataContext {
            sources,
            db,
            carriers: CarrierDirectory::default(),
            carrier_codes,
            bounds,
        })
    }

    /// Load a new context from this context's sources.
    pub fn reload(&self) -> anyhow::Result<Self> {
        let sources = self
            .sources
            .as_ref()
            .context("Dataset was not loaded from files and cannot be reloaded")?;
        log::info!("context: reloading from {}", sources.flights.display());
        Self::load(sources)
    }

    pub fn sources(&self) -> Option<&DataSources> {
        self.sources.as_ref()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn carriers(&self) -> &CarrierDirectory {
        &self.carriers
    }

    /// Carrier codes that occur in the flights table, ascending.
    pub fn carrier_codes(&self) -> &[String] {
        &self.carrier_codes
    }

    /// Earliest and latest flight date, `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }
}

/// The current context, shared by all request handlers.
///
/// Handlers take an `Arc` snapshot at the start of a request, so a reload
/// never changes the data under a request already running.
#[derive(Debug, Clone)]
pub struct SharedContext {
    inner: Arc<RwLock<Arc<DataContext>>>,
}

impl SharedContext {
    pub fn new(context: DataContext) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(context))),
        }
    }

    pub fn current(&self) -> Arc<DataContext> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, context: DataContext) {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(context);
    }
}
