use crate::group::{GroupKey, GroupValue};
use fdd_core::flight::{DelayColumn, FlightRecord};
use fdd_core::reduction::Reduction;
use serde::Serialize;
use std::collections::BTreeMap;

/// One group of an aggregation: the key, its reduced value, and how many
/// non-null values contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: GroupValue,
    pub value: f64,
    pub count: usize,
}

/// Running sum and count of the non-null values seen for one group.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// `None` when nothing was pushed.
    pub(crate) fn reduce(&self, reduction: Reduction) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(match reduction {
            Reduction::Mean => self.sum / self.count as f64,
            Reduction::Sum => self.sum,
        })
    }
}

/// Group `subset` by `key` and reduce `column` within each group.
///
/// Null values are skipped, and a group with no non-null value produces no
/// row. Rows of a temporal key are returned in ascending key order; rows
/// of a categorical key are ranked by value descending, ties in ascending
/// key order.
pub fn aggregate(
    subset: &[FlightRecord],
    key: GroupKey,
    column: DelayColumn,
    reduction: Reduction,
) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<GroupValue, Accumulator> = BTreeMap::new();
    for record in subset {
        if let Some(value) = record.delay(column) {
            groups.entry(key.value_of(record)).or_default().push(value);
        }
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .filter_map(|(group, acc)| {
            acc.reduce(reduction).map(|value| AggregateRow {
                key: group,
                value,
                count: acc.count(),
            })
        })
        .collect();

    if !key.is_temporal() {
        // Stable sort: equal values keep the ascending key order from the map.
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    }
    log::debug!(
        "aggregate: {} {} of {} by {} -> {} rows",
        reduction,
        column,
        subset.len(),
        key.name(),
        rows.len()
    );
    rows
}
