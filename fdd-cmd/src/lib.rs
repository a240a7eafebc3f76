//! Command implementations for the flight delay dashboard CLI.
//!
//! `serve` runs the HTTP dashboard; `summary` and `airports` load the same
//! data context and print a report, which is handy for checking a dataset
//! before serving it.

use clap::{Args, Subcommand};
use fdd_dash::{Config, DataSources, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod report;
pub mod serve;

/// Data file locations shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Flights CSV (Year, Month, DayofMonth, UniqueCarrier, Origin, Dest and delay columns)
    #[arg(short = 'f', long, env = "FDD_FLIGHTS", default_value = "data/flights.csv")]
    pub flights: PathBuf,

    /// Airport reference CSV (IATA, LATITUDE, LONGITUDE)
    #[arg(short = 'a', long, env = "FDD_AIRPORTS", default_value = "data/airports.csv")]
    pub airports: PathBuf,
}

impl DataArgs {
    pub fn sources(&self) -> DataSources {
        DataSources {
            flights: self.flights.clone(),
            airports: self.airports.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to listen on
        #[arg(long, env = "FDD_ADDR", default_value = "127.0.0.1:8050")]
        addr: SocketAddr,
    },

    /// Print a delay column aggregated by a group key as CSV
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// Group key: carrier, origin, dest, date, month or day
        #[arg(short = 'g', long, default_value = "carrier")]
        group_by: String,

        /// Delay column, e.g. ArrDelay or WeatherDelay
        #[arg(short = 'c', long, default_value = "ArrDelay")]
        column: String,

        /// Reduction: mean or sum
        #[arg(short = 'm', long, default_value = "mean")]
        method: String,

        /// First date (YYYY-MM-DD), defaults to the earliest flight
        #[arg(long)]
        start: Option<String>,

        /// Last date (YYYY-MM-DD), defaults to the latest flight
        #[arg(long)]
        end: Option<String>,

        /// Comma-separated carrier codes; all carriers when omitted
        #[arg(long, value_delimiter = ',')]
        carriers: Option<Vec<String>>,
    },

    /// Print how many airports appear in the flight data and how many do not
    Airports {
        #[command(flatten)]
        data: DataArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve { data, addr } => {
            let config = Config {
                sources: data.sources(),
                server: ServerConfig { addr },
            };
            serve::run_serve(config).await
        }
        Command::Summary {
            data,
            group_by,
            column,
            method,
            start,
            end,
            carriers,
        } => {
            let request = report::SummaryRequest {
                group_by,
                column,
                method,
                start,
                end,
                carriers,
            };
            report::run_summary(&data.sources(), &request)
        }
        Command::Airports { data } => report::run_airports(&data.sources()),
    }
}
