use anyhow::{Context, Result};
use clap::Parser;
use tracing::Instrument;

use geo_mcp_directions::{DirectionsConfig, DirectionsServer};
use geo_mcp_shared::{init_logging, run_server_loop, shutdown_signal, ServeArgs, StdioTransport};

#[derive(Parser, Debug)]
#[command(author, version, about = "MCP server for Google Maps directions")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.serve.logging_config()).context("failed to set tracing subscriber")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let result = runtime.block_on(serve());

    // A pending stdin read sits on a blocking thread that cannot be cancelled
    runtime.shutdown_background();
    result
}

async fn serve() -> Result<()> {
    let config = DirectionsConfig::from_env()?;
    let server = DirectionsServer::new(config).context("failed to initialize directions server")?;

    run_server_loop(StdioTransport::stdio(), &server, shutdown_signal())
        .instrument(tracing::info_span!("server", service = "directions"))
        .await?;

    Ok(())
}
