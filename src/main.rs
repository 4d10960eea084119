//! Link registry server binary.
//!
//! # Usage
//!
//! ```bash
//! # Start the HTTP server (default command)
//! cargo run
//!
//! # Override the listen address
//! cargo run -- --listen 127.0.0.1:9000 serve
//!
//! # Create or migrate the link store schema, then exit
//! cargo run -- init-db
//! ```
//!
//! Configuration is read from the environment (and `.env`); see
//! [`atlas_links::config`].

use anyhow::{Context, Result};
use atlas_links::config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Link registry service.
#[derive(Parser)]
#[command(name = "atlas-links")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(short, long, global = true)]
    listen: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Initialize the link store schema and exit
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env().context("Failed to load configuration")?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level, &config.log_format)?;
    config.print_summary();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => atlas_links::server::run(config).await,
        Commands::InitDb => atlas_links::server::init_db(config).await,
    }
}

fn init_tracing(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)
        .with_context(|| format!("Invalid RUST_LOG directive '{}'", log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
