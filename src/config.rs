//! Configuration Module
//!
//! Handles loading runtime configuration from environment variables, with
//! command-line flags taking precedence.

use std::env;
use std::time::Duration;

use clap::Parser;

/// Default PokeAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache sweep period and maximum entry age
    pub cache_interval: Duration,
    /// Root URL of the PokeAPI (no trailing slash)
    pub base_url: String,
    /// Timeout applied to every outbound request
    pub http_timeout: Duration,
    /// A catch succeeds when a roll in `0..base_experience` lands below this
    pub catch_threshold: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_MS` - Cache interval in milliseconds (default: 5000)
    /// - `POKEAPI_BASE_URL` - API root URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    /// - `POKEDEX_CATCH_THRESHOLD` - Catch threshold (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_interval),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            catch_threshold: env::var("POKEDEX_CATCH_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.catch_threshold),
        }
    }

    /// Overrides values with any flags given on the command line.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(ms) = cli.cache_interval_ms {
            self.cache_interval = Duration::from_millis(ms);
        }
        if let Some(url) = &cli.base_url {
            self.base_url = normalize_base_url(url);
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_millis(5000),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            catch_threshold: 50,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "pokedex")]
#[command(about = "A Pokedex REPL backed by a time-expiring response cache")]
#[command(version)]
pub struct Cli {
    /// Cache interval in milliseconds (overrides POKEDEX_CACHE_INTERVAL_MS)
    #[arg(long, value_name = "MS")]
    pub cache_interval_ms: Option<u64>,

    /// PokeAPI root URL (overrides POKEAPI_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}
