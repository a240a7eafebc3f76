//! Control and output ids, the static dependency table, and the control
//! values the page posts with every request.

use crate::context::DataContext;
use chrono::NaiveDate;
use fdd_core::chart_kind::ChartKind;
use fdd_core::date_range::DateRange;
use fdd_core::error::{DashError, Result};
use fdd_core::filter::{CarrierSelection, FilterSpec};
use fdd_core::flight::DelayColumn;
use fdd_core::reduction::Reduction;
use fdd_data::group::TimeUnit;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Carrier whose trend is shown before any bar has been hovered.
pub const DEFAULT_HOVER_CARRIER: &str = "WN";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    DateRange,
    Carriers,
    Method,
    DelayType,
    ChartKind,
    TimeUnit,
    ScatterX,
    ScatterY,
    HoverCarrier,
    ActiveTab,
    Panels,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    /// Chosen delay column reduced per carrier, as bar, pie, line or scatter
    CarrierSummary,
    /// Arrival and departure delay per time unit
    DelayTrend,
    /// Daily delay trend of the hovered carrier
    CarrierTrend,
    /// One line per delay cause
    DelayCauses,
    /// Raw scatter of two delay columns
    DelayScatter,
    AirportMap,
}

impl Output {
    pub const ALL: [Output; 6] = [
        Output::CarrierSummary,
        Output::DelayTrend,
        Output::CarrierTrend,
        Output::DelayCauses,
        Output::DelayScatter,
        Output::AirportMap,
    ];
}

/// Which controls each output reads. Declared once; nothing is inferred.
pub const DEPENDENCIES: &[(Output, &[Control])] = &[
    (
        Output::CarrierSummary,
        &[
            Control::DateRange,
            Control::Carriers,
            Control::Method,
            Control::DelayType,
            Control::ChartKind,
        ],
    ),
    (
        Output::DelayTrend,
        &[
            Control::DateRange,
            Control::Carriers,
            Control::Method,
            Control::TimeUnit,
        ],
    ),
    (
        Output::CarrierTrend,
        &[Control::DateRange, Control::Method, Control::HoverCarrier],
    ),
    (
        Output::DelayCauses,
        &[
            Control::DateRange,
            Control::Carriers,
            Control::Method,
            Control::TimeUnit,
        ],
    ),
    (
        Output::DelayScatter,
        &[
            Control::DateRange,
            Control::Carriers,
            Control::ScatterX,
            Control::ScatterY,
        ],
    ),
    (Output::AirportMap, &[Control::ActiveTab]),
];

/// Outputs that list `control` as an input, in table order.
pub fn dependents(control: Control) -> Vec<Output> {
    DEPENDENCIES
        .iter()
        .filter(|(_, inputs)| inputs.contains(&control))
        .map(|(output, _)| *output)
        .collect()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Charts,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Charts, Tab::Map];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Charts => "charts",
            Tab::Map => "map",
        }
    }
}

impl FromStr for Tab {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Tab::ALL
            .iter()
            .find(|t| t.name() == wanted)
            .copied()
            .ok_or_else(|| DashError::invalid("tab", s, &["charts", "map"]))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Filters,
    ChartOptions,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Filters, Panel::ChartOptions];

    pub fn name(&self) -> &'static str {
        match self {
            Panel::Filters => "filters",
            Panel::ChartOptions => "chart_options",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Panel::Filters => "Filters",
            Panel::ChartOptions => "Chart Options",
        }
    }
}

impl FromStr for Panel {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Panel::ALL
            .iter()
            .find(|p| p.name() == wanted)
            .copied()
            .ok_or_else(|| DashError::invalid("panel", s, &["filters", "chart_options"]))
    }
}

/// Expanded/collapsed flag per collapsible panel.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Panels {
    pub filters: bool,
    pub chart_options: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Panels {
            filters: true,
            chart_options: true,
        }
    }
}

impl Panels {
    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::Filters => self.filters = !self.filters,
            Panel::ChartOptions => self.chart_options = !self.chart_options,
        }
    }
}

/// Every control value of one page.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ControlState {
    pub date_range: DateRange,
    pub carriers: CarrierSelection,
    pub method: Reduction,
    pub delay_type: DelayColumn,
    pub chart_kind: ChartKind,
    pub time_unit: TimeUnit,
    pub scatter_x: DelayColumn,
    pub scatter_y: DelayColumn,
    /// Carrier code reported by the last hover over the summary chart
    pub hover_carrier: Option<String>,
    pub active_tab: Tab,
    pub panels: Panels,
}

impl ControlState {
    /// Initial values: the full date span of the data and every carrier.
    pub fn defaults(context: &DataContext) -> Self {
        let date_range = context.bounds().unwrap_or_else(fallback_range);
        ControlState {
            date_range,
            carriers: CarrierSelection::All,
            method: Reduction::Mean,
            delay_type: DelayColumn::ArrDelay,
            chart_kind: ChartKind::Bar,
            time_unit: TimeUnit::Month,
            scatter_x: DelayColumn::DepDelay,
            scatter_y: DelayColumn::ArrDelay,
            hover_carrier: None,
            active_tab: Tab::Charts,
            panels: Panels::default(),
        }
    }

    /// The filter every data-driven output starts from.
    pub fn filter(&self) -> FilterSpec {
        FilterSpec::new(self.date_range, self.carriers.clone())
    }

    /// Carrier for the hover-driven trend.
    pub fn trend_carrier(&self) -> &str {
        self.hover_carrier.as_deref().unwrap_or(DEFAULT_HOVER_CARRIER)
    }

    /// Parse and apply one change, returning the control it touched.
    ///
    /// On error the state is left as it was.
    pub fn apply(&mut self, change: ControlChange) -> Result<Control> {
        let control = change.control();
        match change {
            ControlChange::DateRange { start, end } => {
                self.date_range = DateRange::parse(&start, &end)?;
            }
            ControlChange::Carriers(selection) => self.carriers = selection,
            ControlChange::Method(raw) => self.method = raw.parse()?,
            ControlChange::DelayType(raw) => self.delay_type = raw.parse()?,
            ControlChange::ChartKind(raw) => self.chart_kind = raw.parse()?,
            ControlChange::TimeUnit(raw) => self.time_unit = raw.parse()?,
            ControlChange::ScatterX(raw) => self.scatter_x = raw.parse()?,
            ControlChange::ScatterY(raw) => self.scatter_y = raw.parse()?,
            ControlChange::HoverCarrier(code) => {
                self.hover_carrier = code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
            }
            ControlChange::ActiveTab(raw) => self.active_tab = raw.parse()?,
            ControlChange::Panels(raw) => {
                let panel: Panel = raw.parse()?;
                self.panels.toggle(panel);
            }
        }
        Ok(control)
    }
}

fn fallback_range() -> DateRange {
    // The dataset covers 2008; used only when no flights are loaded.
    let start = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2008, 12, 31).unwrap_or_default();
    DateRange(start, end)
}

/// One control change as posted by the page, with enum values still raw
/// strings so unrecognized values surface as `InvalidArgument`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlChange {
    DateRange { start: String, end: String },
    Carriers(CarrierSelection),
    Method(String),
    DelayType(String),
    ChartKind(String),
    TimeUnit(String),
    ScatterX(String),
    ScatterY(String),
    HoverCarrier(Option<String>),
    ActiveTab(String),
    /// Name of the panel whose expanded flag flips
    Panels(String),
}

impl ControlChange {
    pub fn control(&self) -> Control {
        match self {
            ControlChange::DateRange { .. } => Control::DateRange,
            ControlChange::Carriers(_) => Control::Carriers,
            ControlChange::Method(_) => Control::Method,
            ControlChange::DelayType(_) => Control::DelayType,
            ControlChange::ChartKind(_) => Control::ChartKind,
            ControlChange::TimeUnit(_) => Control::TimeUnit,
            ControlChange::ScatterX(_) => Control::ScatterX,
            ControlChange::ScatterY(_) => Control::ScatterY,
            ControlChange::HoverCarrier(_) => Control::HoverCarrier,
            ControlChange::ActiveTab(_) => Control::ActiveTab,
            ControlChange::Panels(_) => Control::Panels,
        }
    }
}
