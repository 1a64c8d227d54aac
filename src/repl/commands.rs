//! REPL Commands
//!
//! The command registry and the session state the commands operate on.

use std::collections::BTreeMap;
use std::fmt::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::{Error, Result};
use crate::pokeapi::{Client, LocationAreaList, Pokemon};

// == Command Registry ==
/// A command's name and help text.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every command the REPL understands, in help order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: "Displays a help message",
    },
    CommandSpec {
        name: "exit",
        description: "Exit the Pokedex",
    },
    CommandSpec {
        name: "map",
        description: "Displays the next 20 location areas",
    },
    CommandSpec {
        name: "mapb",
        description: "Displays the previous 20 location areas",
    },
    CommandSpec {
        name: "explore",
        description: "Lists the pokemon found in a location area: explore <area>",
    },
    CommandSpec {
        name: "catch",
        description: "Throws a pokeball at a pokemon: catch <pokemon>",
    },
    CommandSpec {
        name: "inspect",
        description: "Shows details of a caught pokemon: inspect <pokemon>",
    },
    CommandSpec {
        name: "pokedex",
        description: "Lists every pokemon you have caught",
    },
    CommandSpec {
        name: "cache",
        description: "Shows response cache statistics",
    },
];

// == Outcome ==
/// What the loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and prompt again
    Continue(String),
    /// Print the text and stop
    Exit(String),
}

// == Session ==
/// State threaded through every command: the API client, the location
/// pagination cursors and the caught pokemon.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    client: Client,
    next: Option<String>,
    previous: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: R,
    catch_threshold: u32,
}

impl Session<StdRng> {
    /// Creates a session with an entropy-seeded RNG.
    pub fn new(client: Client, catch_threshold: u32) -> Self {
        Self::with_rng(client, catch_threshold, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(client: Client, catch_threshold: u32, rng: R) -> Self {
        let next = Some(client.first_location_page());
        Self {
            client,
            next,
            previous: None,
            pokedex: BTreeMap::new(),
            rng,
            catch_threshold,
        }
    }

    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    // == Execute ==
    /// Runs one cleaned command line.
    ///
    /// # Errors
    /// `Error::UnknownCommand` for names missing from `COMMANDS`, plus
    /// whatever the command itself returns.
    pub async fn execute(&mut self, words: &[String]) -> Result<Outcome> {
        let Some((name, args)) = words.split_first() else {
            return Ok(Outcome::Continue("Please enter a command".to_string()));
        };
        let arg = args.first().map(String::as_str);

        let output = match name.as_str() {
            "help" => help_message(),
            "exit" => return Ok(Outcome::Exit("Closing the Pokedex... Goodbye!".to_string())),
            "map" => self.map().await?,
            "mapb" => self.map_back().await?,
            "explore" => self.explore(required(arg, "explore", "area")?).await?,
            "catch" => self.catch(required(arg, "catch", "pokemon")?).await?,
            "inspect" => self.inspect(required(arg, "inspect", "pokemon")?)?,
            "pokedex" => self.list_pokedex(),
            "cache" => self.cache_report().await,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };

        Ok(Outcome::Continue(output))
    }

    async fn map(&mut self) -> Result<String> {
        let Some(url) = self.next.clone() else {
            return Ok("you're on the last page".to_string());
        };
        let page = self.client.location_areas(Some(&url)).await?;
        Ok(self.show_page(page))
    }

    async fn map_back(&mut self) -> Result<String> {
        let Some(url) = self.previous.clone() else {
            return Ok("you're on the first page".to_string());
        };
        let page = self.client.location_areas(Some(&url)).await?;
        Ok(self.show_page(page))
    }

    fn show_page(&mut self, page: LocationAreaList) -> String {
        self.next = page.next;
        self.previous = page.previous;
        page.results
            .into_iter()
            .map(|area| area.name)
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn explore(&mut self, area: &str) -> Result<String> {
        let location = self.client.location_area(area).await?;

        let mut out = format!("Exploring {}...\nFound Pokemon:", location.name);
        for encounter in &location.pokemon_encounters {
            let _ = write!(out, "\n - {}", encounter.pokemon.name);
        }
        Ok(out)
    }

    async fn catch(&mut self, name: &str) -> Result<String> {
        let pokemon = self.client.pokemon(name).await?;

        let mut out = format!("Throwing a Pokeball at {}...\n", pokemon.name);
        let difficulty = pokemon.base_experience.unwrap_or(0).max(1);
        let roll = self.rng.gen_range(0..difficulty);

        if roll < self.catch_threshold {
            info!(pokemon = %pokemon.name, roll, difficulty, "caught");
            let _ = write!(out, "{} was caught!", pokemon.name);
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            let _ = write!(out, "{} escaped!", pokemon.name);
        }
        Ok(out)
    }

    fn inspect(&self, name: &str) -> Result<String> {
        let pokemon = self
            .pokedex
            .get(name)
            .ok_or_else(|| Error::NotCaught(name.to_string()))?;

        let mut out = format!(
            "Name: {}\nHeight: {}\nWeight: {}\nStats:",
            pokemon.name, pokemon.height, pokemon.weight
        );
        for stat in &pokemon.stats {
            let _ = write!(out, "\n  -{}: {}", stat.stat.name, stat.base_stat);
        }
        out.push_str("\nTypes:");
        for kind in &pokemon.types {
            let _ = write!(out, "\n  - {}", kind.kind.name);
        }
        Ok(out)
    }

    fn list_pokedex(&self) -> String {
        if self.pokedex.is_empty() {
            return "Your Pokedex is empty".to_string();
        }
        let mut out = "Your Pokedex:".to_string();
        for name in self.pokedex.keys() {
            let _ = write!(out, "\n - {}", name);
        }
        out
    }

    async fn cache_report(&self) -> String {
        let cache = self.client.cache();
        let stats = cache.stats().await;

        let mut out = format!(
            "Cache interval: {}ms\nEntries: {}\nHits: {}\nMisses: {}\nHit rate: {:.1}%\nReaped: {}",
            cache.interval().as_millis(),
            stats.total_entries,
            stats.hits,
            stats.misses,
            stats.hit_rate() * 100.0,
            stats.reaped,
        );
        for entry in cache.entries().await {
            let _ = write!(
                out,
                "\n  {} ({} bytes, cached {}, age {}ms)",
                entry.key,
                entry.size,
                entry.cached_at.format("%H:%M:%S"),
                entry.age.as_millis()
            );
        }
        out
    }
}

fn required<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str> {
    arg.ok_or(Error::MissingArgument { command, argument })
}

/// The text printed by `help`.
pub fn help_message() -> String {
    let mut message = "Welcome to the Pokedex!\nUsage:\n".to_string();
    for command in COMMANDS {
        let _ = write!(message, "\n{}: {}", command.name, command.description);
    }
    message
}
