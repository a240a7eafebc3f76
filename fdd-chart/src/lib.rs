//! Declarative chart and map descriptions for the dashboard page.
//!
//! This crate provides:
//! - `chart`: [`chart::ChartSpec`], a Plotly figure (`{ data, layout }`) built
//!   from aggregate rows, trend profiles or raw flight records
//! - `map`: [`map::MapSpec`], the two-layer airport map rendered with Leaflet
//!
//! Nothing here renders; the page's JavaScript hands the serialized specs
//! to Plotly.js and Leaflet.

pub mod chart;
pub mod map;
