//! parley-server - The chat relay daemon

use anyhow::Result;
use clap::Parser;
use parley::config::Config;
use parley::server::RelayServer;
use std::net::SocketAddr;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "parley-server")]
#[command(about = "parley chat relay server")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Relay socket address override
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// HTTP status address override
    #[arg(long)]
    http_listen: Option<SocketAddr>,

    /// Don't serve the HTTP status endpoints
    #[arg(long)]
    no_http: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    if let Some(http_listen) = cli.http_listen {
        config.server.http_listen = http_listen;
    }
    if cli.no_http {
        config.server.http_enabled = false;
    }

    let server = RelayServer::bind(config).await?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(()).await;
        }
    });

    server.run(shutdown_rx).await
}
