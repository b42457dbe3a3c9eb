//! Pokedex - an interactive PokeAPI explorer
//!
//! Reads commands from stdin and answers them from the PokeAPI, caching
//! responses in a `TimedCache`.

use std::io::BufReader;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Config, PokeApiClient, TimedCache};

/// Main entry point for the pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr, so stdout stays the REPL)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Run the REPL until `exit`, end of input or Ctrl+C
/// 5. Stop the reaper and log final cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}ms, base_url={}, page_size={}",
        config.cache_interval_ms, config.base_url, config.page_size
    );

    let cache = TimedCache::new(config.cache_interval());
    let client = PokeApiClient::new(config.base_url.clone(), cache.clone());
    let mut session = Session::new(client, config.page_size);

    println!("pokedex");

    // Stdin is read on its own thread so Ctrl+C never waits on a pending read
    let lines = repl::spawn_line_reader(BufReader::new(std::io::stdin()))?;
    let mut stdout = std::io::stdout();
    repl::run_until(&mut session, lines, &mut stdout, shutdown_signal()).await?;

    cache.shutdown();
    let stats = cache.stats().await;
    let counters = serde_json::to_string(&stats)?;
    info!(stats = %counters, "Session ended, hit rate {:.2}", stats.hit_rate());

    Ok(())
}

/// Waits for Ctrl+C.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(err) => {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
