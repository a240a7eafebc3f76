//! Recomputes dashboard outputs from control state.
//!
//! Each output has one render function taking the data context, the control
//! state and, for data-driven outputs, the filtered subset. Which outputs
//! run for a change comes from [`DEPENDENCIES`](crate::controls::DEPENDENCIES)
//! alone.

use crate::context::DataContext;
use crate::controls::{dependents, Control, ControlChange, ControlState, Output, Tab};
use crate::error::Error;
use fdd_chart::chart::{ChartOptions, ChartSpec};
use fdd_chart::map::MapSpec;
use fdd_core::filter::{CarrierSelection, FilterSpec};
use fdd_core::flight::{DelayColumn, FlightRecord};
use fdd_data::aggregate::aggregate;
use fdd_data::group::{GroupKey, GroupValue, TimeUnit};
use fdd_data::trend::{column_profile, delay_trend};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const MINUTES: &str = "Minutes";

/// What one output renders to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Chart(ChartSpec),
    Map(MapSpec),
}

impl Rendered {
    pub fn as_chart(&self) -> Option<&ChartSpec> {
        match self {
            Rendered::Chart(chart) => Some(chart),
            Rendered::Map(_) => None,
        }
    }
}

pub type Outputs = BTreeMap<Output, Rendered>;

/// Result of applying one control change.
#[derive(Debug, Clone, Serialize)]
pub struct Update {
    pub state: ControlState,
    /// Outputs that were recomputed, in dependency table order
    pub recomputed: Vec<Output>,
    pub outputs: Outputs,
}

pub struct Controller {
    context: Arc<DataContext>,
}

impl Controller {
    pub fn new(context: Arc<DataContext>) -> Self {
        Self { context }
    }

    /// Render every output, e.g. for the first page load.
    pub fn render_all(&self, state: &ControlState) -> Result<Outputs, Error> {
        self.render_outputs(&Output::ALL, state)
    }

    /// Apply `change` to `state` and recompute the outputs that depend on
    /// the changed control.
    ///
    /// The map is rebuilt on a tab change only when the map tab becomes
    /// active. A panel toggle recomputes nothing.
    pub fn update(&self, mut state: ControlState, change: ControlChange) -> Result<Update, Error> {
        let control = state.apply(change)?;
        let mut recomputed = dependents(control);
        if control == Control::ActiveTab && state.active_tab != Tab::Map {
            recomputed.clear();
        }
        let outputs = self.render_outputs(&recomputed, &state)?;
        log::info!("controller: {:?} changed, recomputed {:?}", control, recomputed);
        Ok(Update {
            state,
            recomputed,
            outputs,
        })
    }

    /// Render the given outputs, querying the shared filtered subset at
    /// most once.
    pub fn render_outputs(&self, outputs: &[Output], state: &ControlState) -> Result<Outputs, Error> {
        let mut subset: Option<Vec<FlightRecord>> = None;
        let mut rendered = Outputs::new();
        for output in outputs {
            let value = match output {
                Output::CarrierTrend => Rendered::Chart(self.carrier_trend(state)?),
                Output::AirportMap => Rendered::Map(self.airport_map()?),
                Output::CarrierSummary
                | Output::DelayTrend
                | Output::DelayCauses
                | Output::DelayScatter => {
                    if subset.is_none() {
                        subset = Some(self.context.db().query_flights(&state.filter())?);
                    }
                    let flights = subset.as_deref().unwrap_or_default();
                    Rendered::Chart(match output {
                        Output::CarrierSummary => self.carrier_summary(flights, state),
                        Output::DelayTrend => trend_chart(flights, state),
                        Output::DelayCauses => causes_chart(flights, state),
                        _ => scatter_chart(flights, state),
                    })
                }
            };
            rendered.insert(*output, value);
        }
        Ok(rendered)
    }

    fn carrier_summary(&self, flights: &[FlightRecord], state: &ControlState) -> ChartSpec {
        let rows = aggregate(flights, GroupKey::Carrier, state.delay_type, state.method);
        let options = ChartOptions::new(
            format!("{} {} by Carrier", state.method.label(), state.delay_type.label()),
            "Carrier",
            MINUTES,
        );
        let carriers = self.context.carriers();
        ChartSpec::from_rows(&rows, state.chart_kind, &options, |key| match key {
            GroupValue::Text(code) => carriers.display_name(code),
            other => other.to_string(),
        })
    }

    /// Daily trend of one carrier: the hovered one, or the default carrier
    /// before any hover. The carrier filter of the page does not apply.
    fn carrier_trend(&self, state: &ControlState) -> Result<ChartSpec, Error> {
        let carrier = state.trend_carrier();
        let filter = FilterSpec::new(state.date_range, CarrierSelection::only([carrier]));
        let flights = self.context.db().query_flights(&filter)?;
        let points = delay_trend(&flights, TimeUnit::Date, state.method);
        let options = ChartOptions::new(
            format!(
                "{} Daily Delay for {}",
                state.method.label(),
                self.context.carriers().display_name(carrier)
            ),
            TimeUnit::Date.label(),
            MINUTES,
        );
        Ok(ChartSpec::from_trend(&points, &options))
    }

    fn airport_map(&self) -> Result<MapSpec, Error> {
        let db = self.context.db();
        let airports = db.query_airports()?;
        let present = db.query_present_airport_codes()?;
        Ok(MapSpec::build(&airports, &present))
    }
}

fn trend_chart(flights: &[FlightRecord], state: &ControlState) -> ChartSpec {
    let points = delay_trend(flights, state.time_unit, state.method);
    let options = ChartOptions::new(
        format!(
            "{} Departure and Arrival Delay by {}",
            state.method.label(),
            state.time_unit.label()
        ),
        state.time_unit.label(),
        MINUTES,
    );
    ChartSpec::from_trend(&points, &options)
}

fn causes_chart(flights: &[FlightRecord], state: &ControlState) -> ChartSpec {
    let profile = column_profile(flights, &DelayColumn::CAUSES, state.time_unit, state.method);
    let options = ChartOptions::new(
        format!("{} Delay by Cause", state.method.label()),
        state.time_unit.label(),
        MINUTES,
    );
    ChartSpec::from_profile(&profile, &options)
}

fn scatter_chart(flights: &[FlightRecord], state: &ControlState) -> ChartSpec {
    let options = ChartOptions::new(
        format!("{} vs. {}", state.scatter_x.label(), state.scatter_y.label()),
        format!("{} (minutes)", state.scatter_x.label()),
        format!("{} (minutes)", state.scatter_y.label()),
    );
    ChartSpec::scatter(flights, state.scatter_x, state.scatter_y, &options)
}
