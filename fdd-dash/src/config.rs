use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the dataset is read from at load and reload time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSources {
    /// Flights CSV (one row per flight, 2008 on-time performance layout)
    pub flights: PathBuf,
    /// Airport reference CSV with IATA, LATITUDE, LONGITUDE
    pub airports: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            flights: PathBuf::from("data/flights.csv"),
            airports: PathBuf::from("data/airports.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub sources: DataSources,
    pub server: ServerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_localhost_8050() {
        let config = Config::default();
        assert_eq!(config.server.addr.to_string(), "127.0.0.1:8050");
        assert_eq!(config.sources.flights, PathBuf::from("data/flights.csv"));
    }
}
