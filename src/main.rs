//! Blogstore - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogstore::{
    cli::{Cli, Commands},
    commands,
    config::{Config, DEFAULT_LOG_LEVEL},
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load layered configuration; a bad or missing connection string is
    // fatal before anything else is constructed.
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.verbose, DEFAULT_LOG_LEVEL);
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!("Configuration loaded: {:?}", config);

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
///
/// Precedence: `--verbose` forces debug, then `RUST_LOG`, then the
/// configured level.
fn init_tracing(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| configured_level.to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
