//! Core types for the flight delay dashboard.
//!
//! Holds the data model shared by every other crate: flight and airport
//! records, the carrier directory, filter values, reduction methods,
//! chart kinds, and the common error type.

pub mod airport;
pub mod carrier;
pub mod chart_kind;
pub mod date_range;
pub mod error;
pub mod filter;
pub mod flight;
pub mod reduction;
