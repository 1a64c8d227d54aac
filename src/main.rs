//! Pokedex - a PokeAPI REPL backed by a time-expiring response cache

use std::io;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Cli, Client, Config, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr, stdout belongs to the REPL)
/// 2. Load configuration from environment variables and flags
/// 3. Create the response cache, which starts its reaper
/// 4. Build the API client and session
/// 5. Run the REPL on stdin until `exit` or end of input
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so log lines do not interleave with the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().apply_cli(&cli);
    info!(
        "Configuration loaded: cache_interval={:?}, base_url={}, http_timeout={:?}",
        config.cache_interval, config.base_url, config.http_timeout
    );

    let cache = Cache::new(config.cache_interval).context("failed to create response cache")?;
    let client = Client::new(&config, cache.clone()).context("failed to build HTTP client")?;
    let mut session = Session::new(client, config.catch_threshold);

    let stdin = BufReader::new(tokio::io::stdin());
    let result = repl::run(&mut session, stdin, &mut io::stdout()).await;

    cache.close();
    info!("Pokedex shutdown complete");

    result.context("REPL terminated on an I/O error")
}
