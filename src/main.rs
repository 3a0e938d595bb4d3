//! parley - A real-time group chat relay client

use anyhow::Result;
use clap::{Parser, Subcommand};
use parley::client;
use parley::config::Config;
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Chat with everyone connected to a parley relay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Relay address (defaults to the configured listen address)
    #[arg(short, long)]
    server: Option<SocketAddr>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the chat under a display name
    Join {
        /// Display name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let addr = cli.server.unwrap_or(config.server.listen);

    match cli.command {
        Commands::Join { name } => {
            tracing::info!("Joining {} as {}", addr, name);
            client::run_chat(addr, &name, config.limits.client_max_frame_size).await
        }
    }
}
