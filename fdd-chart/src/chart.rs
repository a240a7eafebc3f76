use fdd_core::chart_kind::ChartKind;
use fdd_core::flight::{DelayColumn, FlightRecord};
use fdd_data::aggregate::AggregateRow;
use fdd_data::group::GroupValue;
use fdd_data::trend::{Profile, TrendPoint};
use serde::Serialize;

/// Message shown in place of a chart whose input had no rows.
pub const NO_DATA_TEXT: &str = "No data for the current selection";

/// A Plotly figure: traces plus layout, serialized the way
/// `Plotly.react(div, data, layout)` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One x-axis value: a number for raw scatter plots, text for categories
/// and time keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Number(f64),
    Text(String),
}

impl From<&GroupValue> for Datum {
    fn from(value: &GroupValue) -> Self {
        match value {
            GroupValue::Number(n) => Datum::Number(f64::from(*n)),
            other => Datum::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar {
        x: Vec<String>,
        y: Vec<f64>,
        /// Value labels drawn on the bars
        text: Vec<String>,
        textposition: &'static str,
        /// Raw group keys, reported back by hover events
        customdata: Vec<String>,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
        customdata: Vec<String>,
    },
    Scatter {
        x: Vec<Datum>,
        y: Vec<Option<f64>>,
        mode: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        customdata: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        marker: Option<Marker>,
    },
}

impl Trace {
    fn len(&self) -> usize {
        match self {
            Trace::Bar { x, .. } => x.len(),
            Trace::Pie { values, .. } => values.len(),
            Trace::Scatter { x, .. } => x.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Title {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    pub hovermode: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// Title and axis labels for a chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartOptions {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        ChartOptions {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }
}

/// A named line over the shared x axis of [`ChartSpec::lines`].
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl ChartSpec {
    fn with_traces(data: Vec<Trace>, options: &ChartOptions, cartesian: bool) -> Self {
        let empty = data.iter().all(|t| t.len() == 0);
        let axis = |label: &str| {
            cartesian.then(|| Axis {
                title: Title::new(label),
            })
        };
        let annotations = if empty {
            vec![Annotation {
                text: NO_DATA_TEXT.to_string(),
                showarrow: false,
                xref: "paper",
                yref: "paper",
                x: 0.5,
                y: 0.5,
            }]
        } else {
            Vec::new()
        };
        ChartSpec {
            data,
            layout: Layout {
                title: Title::new(&options.title),
                xaxis: axis(&options.x_label),
                yaxis: axis(&options.y_label),
                hovermode: "closest",
                annotations,
            },
        }
    }

    /// Render aggregate rows as the requested chart kind.
    ///
    /// Row order is kept as given (the aggregator already ranked or sorted
    /// them). `label` turns a group key into display text, e.g. a carrier
    /// code into the airline name; the raw key travels in `customdata`.
    ///
    /// `ChartKind::Scatter` here places one marker per group at (key, value),
    /// so the summary chart stays one point per carrier and keeps reporting
    /// carrier codes on hover. Scatter over raw records of two delay columns
    /// is [`ChartSpec::scatter`].
    pub fn from_rows<F>(rows: &[AggregateRow], kind: ChartKind, options: &ChartOptions, label: F) -> Self
    where
        F: Fn(&GroupValue) -> String,
    {
        let labels: Vec<String> = rows.iter().map(|r| label(&r.key)).collect();
        let keys: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
        let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
        let trace = match kind {
            ChartKind::Bar => Trace::Bar {
                x: labels,
                text: values.iter().map(|v| format!("{:.2}", v)).collect(),
                y: values,
                textposition: "auto",
                customdata: keys,
            },
            ChartKind::Pie => Trace::Pie {
                labels,
                values,
                customdata: keys,
            },
            ChartKind::Line | ChartKind::Scatter => Trace::Scatter {
                x: labels.into_iter().map(Datum::Text).collect(),
                y: values.into_iter().map(Some).collect(),
                mode: if kind == ChartKind::Line {
                    "lines+markers"
                } else {
                    "markers"
                },
                name: None,
                text: None,
                customdata: Some(keys),
                marker: None,
            },
        };
        ChartSpec::with_traces(vec![trace], options, kind != ChartKind::Pie)
    }

    /// Several named line series sharing one ordered x axis.
    pub fn lines(keys: &[GroupValue], series: Vec<NamedSeries>, options: &ChartOptions) -> Self {
        let x: Vec<Datum> = keys.iter().map(Datum::from).collect();
        let data: Vec<Trace> = series
            .into_iter()
            .map(|s| Trace::Scatter {
                x: x.clone(),
                y: s.values,
                mode: "lines+markers",
                name: Some(s.name),
                text: None,
                customdata: None,
                marker: None,
            })
            .collect();
        ChartSpec::with_traces(data, options, true)
    }

    /// One line per profiled delay column, named by the column's label.
    pub fn from_profile(profile: &Profile, options: &ChartOptions) -> Self {
        let series = profile
            .series
            .iter()
            .map(|s| NamedSeries {
                name: s.column.label().to_string(),
                values: s.values.clone(),
            })
            .collect();
        ChartSpec::lines(&profile.keys, series, options)
    }

    /// Arrival and departure delay lines from a joined trend.
    pub fn from_trend(points: &[TrendPoint], options: &ChartOptions) -> Self {
        let keys: Vec<GroupValue> = points.iter().map(|p| p.key.clone()).collect();
        let series = vec![
            NamedSeries {
                name: DelayColumn::ArrDelay.label().to_string(),
                values: points.iter().map(|p| p.arrival).collect(),
            },
            NamedSeries {
                name: DelayColumn::DepDelay.label().to_string(),
                values: points.iter().map(|p| p.departure).collect(),
            },
        ];
        ChartSpec::lines(&keys, series, options)
    }

    /// Scatter of two delay columns over raw records, labelled by carrier.
    ///
    /// Records missing either value are left out; nothing is aggregated.
    pub fn scatter(records: &[FlightRecord], x: DelayColumn, y: DelayColumn, options: &ChartOptions) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut carriers = Vec::new();
        for record in records {
            if let (Some(xv), Some(yv)) = (record.delay(x), record.delay(y)) {
                xs.push(Datum::Number(xv));
                ys.push(Some(yv));
                carriers.push(record.carrier.clone());
            }
        }
        let trace = Trace::Scatter {
            x: xs,
            y: ys,
            mode: "markers",
            name: None,
            text: Some(carriers.clone()),
            customdata: Some(carriers),
            marker: Some(Marker { size: 5 }),
        };
        ChartSpec::with_traces(vec![trace], options, true)
    }

    /// True when the chart was built from no data and carries the "no data"
    /// annotation.
    pub fn is_empty(&self) -> bool {
        !self.layout.annotations.is_empty()
    }
}
