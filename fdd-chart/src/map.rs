//! The airport map: every known airport split into a layer of airports
//! that appear in the flight data and a layer of those that do not.

use fdd_core::airport::AirportRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Initial view: the centre of the contiguous United States.
pub const MAP_CENTER: [f64; 2] = [39.8283, -98.5795];
pub const MAP_ZOOM: u8 = 4;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerIcon {
    Plane,
    Default,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MapMarker {
    pub iata: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&AirportRecord> for MapMarker {
    fn from(airport: &AirportRecord) -> Self {
        MapMarker {
            iata: airport.iata.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
        }
    }
}

/// A toggleable group of markers.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MarkerLayer {
    pub name: String,
    pub icon: MarkerIcon,
    /// Whether the layer is visible when the map first draws
    pub show: bool,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MapSpec {
    pub center: [f64; 2],
    pub zoom: u8,
    pub present: MarkerLayer,
    pub absent: MarkerLayer,
}

impl MapSpec {
    /// Split `airports` by membership of their code in `present_codes`.
    ///
    /// Every airport lands in exactly one layer, and both layers are sorted
    /// by IATA code. Present codes with no row in the airport table cannot
    /// be placed and are dropped.
    pub fn build(airports: &[AirportRecord], present_codes: &BTreeSet<String>) -> MapSpec {
        let mut sorted: Vec<&AirportRecord> = airports.iter().collect();
        sorted.sort_by(|a, b| a.iata.cmp(&b.iata));

        let (present, absent): (Vec<&AirportRecord>, Vec<&AirportRecord>) = sorted
            .into_iter()
            .partition(|a| present_codes.contains(&a.iata));

        let known: BTreeSet<&str> = airports.iter().map(|a| a.iata.as_str()).collect();
        let unplaced = present_codes
            .iter()
            .filter(|code| !known.contains(code.as_str()))
            .count();
        if unplaced > 0 {
            log::debug!(
                "map: {} airport codes in flights have no coordinates and were dropped",
                unplaced
            );
        }
        log::info!(
            "map: built {} present and {} absent markers",
            present.len(),
            absent.len()
        );

        MapSpec {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            present: MarkerLayer {
                name: "Airports with flights".to_string(),
                icon: MarkerIcon::Plane,
                show: true,
                markers: present.into_iter().map(MapMarker::from).collect(),
            },
            absent: MarkerLayer {
                name: "Airports without flights".to_string(),
                icon: MarkerIcon::Default,
                show: false,
                markers: absent.into_iter().map(MapMarker::from).collect(),
            },
        }
    }
}
