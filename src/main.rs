//! DataStore shell
//!
//! Opens the configured store and executes commands read from stdin.

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datastore::{shell, Config, DataStore};

/// Entry point for the data store shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (to stderr)
/// 2. Load configuration from environment variables
/// 3. Open the durable store behind the cache
/// 4. Execute commands from stdin until EOF or QUIT
/// 5. Close the store, flushing dirty entries
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datastore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, store={}",
        config.capacity,
        config.database_path()
    );

    let mut store = DataStore::open(&config)
        .with_context(|| format!("failed to open store {}", config.database_path()))?;

    let stdin = io::stdin();
    let executed = shell::run(&mut store, stdin.lock(), io::stdout().lock())
        .context("failed to process commands")?;
    info!("Executed {} commands", executed);

    store.close().context("final flush failed")?;
    info!("Shutdown complete");
    Ok(())
}
