use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of chart an aggregate result is rendered as.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Scatter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ChartKind::ALL
            .iter()
            .find(|k| k.name() == wanted)
            .copied()
            .ok_or_else(|| DashError::invalid("chart kind", s, &["bar", "pie", "line", "scatter"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chart_kinds() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Pie".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert!(matches!(
            "histogram".parse::<ChartKind>(),
            Err(DashError::InvalidArgument(_))
        ));
    }
}
