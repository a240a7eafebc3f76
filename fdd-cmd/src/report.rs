//! The `summary` and `airports` commands.

use fdd_chart::map::MapSpec;
use fdd_core::carrier::CarrierDirectory;
use fdd_core::date_range::DateRange;
use fdd_core::filter::{CarrierSelection, FilterSpec};
use fdd_core::flight::DelayColumn;
use fdd_core::reduction::Reduction;
use fdd_dash::{DataContext, DataSources};
use fdd_data::aggregate::{aggregate, AggregateRow};
use fdd_data::group::{GroupKey, GroupValue};
use log::info;
use std::io::{self, Write};

/// Raw `summary` arguments, parsed against the loaded data.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub group_by: String,
    pub column: String,
    pub method: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub carriers: Option<Vec<String>>,
}

impl SummaryRequest {
    fn filter(&self, context: &DataContext) -> anyhow::Result<FilterSpec> {
        let bounds = context.bounds();
        let start = match (&self.start, bounds) {
            (Some(raw), _) => raw.clone(),
            (None, Some(b)) => b.bounds_iso().0,
            (None, None) => anyhow::bail!("No flights loaded; pass --start and --end"),
        };
        let end = match (&self.end, bounds) {
            (Some(raw), _) => raw.clone(),
            (None, Some(b)) => b.bounds_iso().1,
            (None, None) => anyhow::bail!("No flights loaded; pass --start and --end"),
        };
        let carriers = match &self.carriers {
            Some(codes) => CarrierSelection::only(codes.iter().map(|c| c.trim().to_uppercase())),
            None => CarrierSelection::All,
        };
        Ok(FilterSpec::new(DateRange::parse(&start, &end)?, carriers))
    }
}

/// Filter and aggregate according to `request`.
pub fn summarize(context: &DataContext, request: &SummaryRequest) -> anyhow::Result<(GroupKey, Vec<AggregateRow>)> {
    let key: GroupKey = request.group_by.parse()?;
    let column: DelayColumn = request.column.parse()?;
    let method: Reduction = request.method.parse()?;
    let filter = request.filter(context)?;
    let flights = context.db().query_flights(&filter)?;
    Ok((key, aggregate(&flights, key, column, method)))
}

/// Write aggregate rows as CSV: key, display label, value, contributing count.
pub fn write_summary<W: Write>(
    rows: &[AggregateRow],
    key: GroupKey,
    carriers: &CarrierDirectory,
    writer: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([key.name(), "label", "value", "count"])?;
    for row in rows {
        let label = match (&row.key, key) {
            (GroupValue::Text(code), GroupKey::Carrier) => carriers.display_name(code),
            (other, _) => other.to_string(),
        };
        wtr.write_record([
            row.key.to_string(),
            label,
            format!("{:.2}", row.value),
            row.count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_summary(sources: &DataSources, request: &SummaryRequest) -> anyhow::Result<()> {
    let context = DataContext::load(sources)?;
    let (key, rows) = summarize(&context, request)?;
    info!("Summary has {} rows", rows.len());
    write_summary(&rows, key, context.carriers(), io::stdout().lock())
}

/// Partition the airport table by presence in the flight data.
pub fn airport_partition(context: &DataContext) -> anyhow::Result<MapSpec> {
    let db = context.db();
    Ok(MapSpec::build(
        &db.query_airports()?,
        &db.query_present_airport_codes()?,
    ))
}

pub fn run_airports(sources: &DataSources) -> anyhow::Result<()> {
    let context = DataContext::load(sources)?;
    let spec = airport_partition(&context)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}: {}", spec.present.name, spec.present.markers.len())?;
    writeln!(out, "{}: {}", spec.absent.name, spec.absent.markers.len())?;
    Ok(())
}
