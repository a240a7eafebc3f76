//! fdd-cli - serve and inspect the flight delay dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fdd-cli",
    version,
    about = "Flight delay dashboard: interactive charts and airport map"
)]
struct Cli {
    #[command(subcommand)]
    command: fdd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("fdd-cli {}", env!("CARGO_PKG_VERSION"));
    fdd_cmd::run(cli.command).await
}
