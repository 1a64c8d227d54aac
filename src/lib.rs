//! Pokedex - a PokeAPI REPL backed by a time-expiring response cache
//!
//! Every API response is cached in memory by request URL and evicted by a
//! background reaper once it is older than the configured interval.

pub mod cache;
pub mod config;
pub mod error;
pub mod pokeapi;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use config::{Cli, Config};
pub use error::{Error, Result};
pub use pokeapi::Client;
pub use repl::Session;
pub use tasks::spawn_reaper_task;
