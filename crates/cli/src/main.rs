use clap::Parser;
use ferrous_resolver_domain::CliOverrides;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod jobs;

#[derive(Parser)]
#[command(name = "ferrous-resolver")]
#[command(version)]
#[command(about = "Ferrous Resolver - caching DNS forwarder over UDP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Resolver v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config).await?;
    let shutdown = CancellationToken::new();

    if let Some(cache) = &services.cache {
        Arc::new(
            jobs::CachePurgeJob::new(Arc::clone(cache))
                .with_interval(config.cache.purge_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .start();
    }

    let handle = services.server.spawn()?;
    info!(bind_address = %handle.local_addr(), upstream = %config.upstream.address, "Ready");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    shutdown.cancel();
    handle.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
