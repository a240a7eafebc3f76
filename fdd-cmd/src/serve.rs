//! The `serve` command.

use fdd_dash::{server, Config, DataContext, SharedContext};
use log::info;

/// Load the dataset and serve the dashboard until Ctrl-C.
pub async fn run_serve(config: Config) -> anyhow::Result<()> {
    let Config {
        sources,
        server: server_config,
    } = config;
    info!(
        "Loading flights from {} and airports from {}",
        sources.flights.display(),
        sources.airports.display()
    );
    let context = tokio::task::spawn_blocking(move || DataContext::load(&sources)).await??;
    server::serve(&server_config, SharedContext::new(context)).await?;
    Ok(())
}
