//! Interaction controller and HTTP surface of the flight delay dashboard.
//!
//! The browser page owns the control values. Every change is posted to the
//! server together with the current [`controls::ControlState`]; the
//! [`controller::Controller`] looks up which outputs depend on the changed
//! control in [`controls::DEPENDENCIES`], recomputes exactly those
//! (filter, aggregate, chart), and returns them as Plotly and map specs.
//!
//! - `config`: data file locations and the listen address
//! - `context`: the loaded dataset, swapped wholesale on reload
//! - `controls`: control and output ids, the dependency table, control state
//! - `controller`: one render function per output
//! - `server`: axum routes and the embedded page

pub mod config;
pub mod context;
pub mod controller;
pub mod controls;
pub mod error;
pub mod server;

pub use config::{Config, DataSources, ServerConfig};
pub use context::{DataContext, SharedContext};
pub use error::Error;
