use crate::error::{DashError, Result};
use std::collections::BTreeMap;

/// Carrier codes and display names for the airlines in the delay dataset.
const CARRIERS: [(&str, &str); 20] = [
    ("9E", "Pinnacle Airlines Inc."),
    ("AA", "American Airlines Inc."),
    ("AQ", "Aloha Airlines Inc."),
    ("AS", "Alaska Airlines Inc."),
    ("B6", "JetBlue Airways"),
    ("CO", "Continental Air Lines Inc."),
    ("DL", "Delta Air Lines Inc."),
    ("EV", "Atlantic Southeast Airlines"),
    ("F9", "Frontier Airlines Inc."),
    ("FL", "AirTran Airways Corporation"),
    ("HA", "Hawaiian Airlines Inc."),
    ("MQ", "American Eagle Airlines Inc."),
    ("NW", "Northwest Airlines Inc."),
    ("OH", "Comair Inc."),
    ("OO", "Skywest Airlines Inc."),
    ("UA", "United Air Lines Inc."),
    ("US", "US Airways Inc."),
    ("WN", "Southwest Airlines Co."),
    ("XE", "Expressjet Airlines Inc."),
    ("YV", "Mesa Airlines Inc."),
];

/// Static mapping from carrier code to airline display name.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierDirectory {
    names: BTreeMap<String, String>,
}

impl Default for CarrierDirectory {
    fn default() -> Self {
        CarrierDirectory::from_entries(CARRIERS.iter().copied())
    }
}

impl CarrierDirectory {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        CarrierDirectory {
            names: entries
                .into_iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Display name for a carrier code, failing for codes without an entry.
    pub fn lookup(&self, code: &str) -> Result<&str> {
        self.names
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| DashError::UnknownCarrier(code.to_string()))
    }

    /// Display name for chart labels; unknown codes render as
    /// "Unknown carrier (CODE)" instead of failing.
    pub fn display_name(&self, code: &str) -> String {
        match self.lookup(code) {
            Ok(name) => name.to_string(),
            Err(_) => format!("Unknown carrier ({})", code),
        }
    }

    /// Known carrier codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
