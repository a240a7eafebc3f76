use crate::aggregate::Accumulator;
use crate::group::{GroupValue, TimeUnit};
use fdd_core::flight::{DelayColumn, FlightRecord};
use fdd_core::reduction::Reduction;
use serde::Serialize;
use std::collections::BTreeMap;

/// Arrival and departure delay reduced over the same time key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub key: GroupValue,
    pub arrival: Option<f64>,
    pub departure: Option<f64>,
}

/// One reduced delay column aligned to a [`Profile`]'s keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub column: DelayColumn,
    /// `values[i]` belongs to `Profile::keys[i]`; `None` where the column
    /// had no value for that key.
    pub values: Vec<Option<f64>>,
}

/// Several delay columns reduced over a shared, ascending time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Profile {
    pub keys: Vec<GroupValue>,
    pub series: Vec<Series>,
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Reduce each of `columns` per time key in a single pass.
///
/// All series are computed against the same key set, so they are aligned by
/// key rather than by position in independent groupings. A key is present
/// when at least one column has a value for it.
pub fn column_profile(
    subset: &[FlightRecord],
    columns: &[DelayColumn],
    unit: TimeUnit,
    reduction: Reduction,
) -> Profile {
    let key = unit.group_key();
    let mut groups: BTreeMap<GroupValue, Vec<Accumulator>> = BTreeMap::new();
    for record in subset {
        let values: Vec<Option<f64>> = columns.iter().map(|c| record.delay(*c)).collect();
        if values.iter().all(Option::is_none) {
            continue;
        }
        let accs = groups
            .entry(key.value_of(record))
            .or_insert_with(|| vec![Accumulator::default(); columns.len()]);
        for (acc, value) in accs.iter_mut().zip(values) {
            if let Some(value) = value {
                acc.push(value);
            }
        }
    }

    let mut series: Vec<Series> = columns
        .iter()
        .map(|column| Series {
            column: *column,
            values: Vec::with_capacity(groups.len()),
        })
        .collect();
    let mut keys = Vec::with_capacity(groups.len());
    for (group, accs) in groups {
        keys.push(group);
        for (s, acc) in series.iter_mut().zip(accs.iter()) {
            s.values.push(acc.reduce(reduction));
        }
    }
    Profile { keys, series }
}

/// Arrival vs departure delay per time key, joined by key.
pub fn delay_trend(subset: &[FlightRecord], unit: TimeUnit, reduction: Reduction) -> Vec<TrendPoint> {
    let profile = column_profile(
        subset,
        &[DelayColumn::ArrDelay, DelayColumn::DepDelay],
        unit,
        reduction,
    );
    let (arrival, departure) = match profile.series.as_slice() {
        [arrival, departure] => (&arrival.values, &departure.values),
        _ => return Vec::new(),
    };
    profile
        .keys
        .iter()
        .zip(arrival.iter().zip(departure.iter()))
        .map(|(key, (arr, dep))| TrendPoint {
            key: key.clone(),
            arrival: *arr,
            departure: *dep,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::flight;

    #[test]
    fn trend_pairs_arrival_and_departure_by_month() {
        let subset = vec![
            flight((2008, 1, 3), "WN", Some(10.0), Some(4.0)),
            flight((2008, 1, 20), "AA", Some(20.0), Some(6.0)),
            flight((2008, 3, 1), "WN", Some(-5.0), Some(1.0)),
        ];
        let trend = delay_trend(&subset, TimeUnit::Month, Reduction::Mean);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    key: GroupValue::Number(1),
                    arrival: Some(15.0),
                    departure: Some(5.0),
                },
                TrendPoint {
                    key: GroupValue::Number(3),
                    arrival: Some(-5.0),
                    departure: Some(1.0),
                },
            ]
        );
    }

    #[test]
    fn trend_joins_asymmetric_key_sets_by_key() {
        // Day 1 has only departures, day 2 only arrivals; a positional zip of
        // two independent groupings would pair day 1 departures with day 2
        // arrivals.
        let subset = vec![
            flight((2008, 1, 1), "WN", None, Some(30.0)),
            flight((2008, 1, 2), "WN", Some(12.0), None),
            flight((2008, 1, 3), "WN", Some(8.0), Some(2.0)),
        ];
        let trend = delay_trend(&subset, TimeUnit::Day, Reduction::Sum);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].key, GroupValue::Number(1));
        assert_eq!(trend[0].arrival, None);
        assert_eq!(trend[0].departure, Some(30.0));
        assert_eq!(trend[1].key, GroupValue::Number(2));
        assert_eq!(trend[1].arrival, Some(12.0));
        assert_eq!(trend[1].departure, None);
        assert_eq!(trend[2].arrival, Some(8.0));
        assert_eq!(trend[2].departure, Some(2.0));
    }

    #[test]
    fn trend_skips_rows_without_either_value() {
        let subset = vec![
            flight((2008, 1, 1), "WN", None, None),
            flight((2008, 1, 2), "WN", Some(1.0), None),
        ];
        let trend = delay_trend(&subset, TimeUnit::Date, Reduction::Mean);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].key.to_string(), "2008-01-02");
    }

    #[test]
    fn profile_series_share_keys() {
        let mut late = flight((2008, 2, 1), "WN", Some(40.0), Some(35.0));
        late.late_aircraft_delay = Some(35.0);
        let mut weather = flight((2008, 4, 1), "UA", Some(60.0), Some(55.0));
        weather.weather_delay = Some(55.0);
        let profile = column_profile(
            &[late, weather],
            &[DelayColumn::WeatherDelay, DelayColumn::LateAircraftDelay],
            TimeUnit::Month,
            Reduction::Sum,
        );
        assert_eq!(profile.keys, vec![GroupValue::Number(2), GroupValue::Number(4)]);
        assert_eq!(profile.series.len(), 2);
        assert_eq!(profile.series[0].column, DelayColumn::WeatherDelay);
        assert_eq!(profile.series[0].values, vec![None, Some(55.0)]);
        assert_eq!(profile.series[1].values, vec![Some(35.0), None]);
        assert!(profile.series.iter().all(|s| s.values.len() == profile.keys.len()));
    }

    #[test]
    fn empty_subset_gives_empty_profile() {
        let profile = column_profile(&[], &DelayColumn::CAUSES, TimeUnit::Month, Reduction::Mean);
        assert!(profile.is_empty());
        assert_eq!(profile.series.len(), 5);
        assert!(delay_trend(&[], TimeUnit::Month, Reduction::Mean).is_empty());
    }
}
