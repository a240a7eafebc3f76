//! Query result model structs.

use fdd_core::date_range::DateRange;
use serde::Serialize;

/// Size and extent of the loaded dataset, reported at startup and to the
/// dashboard page for populating the date picker and carrier list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub flights: usize,
    pub airports: usize,
    /// Distinct carrier codes present in the flights table, ascending.
    pub carriers: Vec<String>,
    /// Earliest and latest flight date; `None` when no flights are loaded.
    pub date_range: Option<DateRange>,
}
