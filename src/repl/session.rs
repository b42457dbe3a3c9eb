//! REPL session state and command execution.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::api::PokeApiClient;
use crate::error::Result;
use crate::models::CaughtPokemon;
use crate::repl::commands::{help_text, Command};

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Pagination ==
/// Cursor over location-area pages.
///
/// `next` and `previous` only move after a page was fetched successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: u32,
    next: u32,
    previous: u32,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            next: 0,
            previous: 0,
        }
    }

    /// Offset of the page `map` shows.
    pub fn forward_offset(&self) -> u32 {
        self.next + 1
    }

    /// Offset of the page `mapb` shows, or `None` on the first page.
    pub fn back_offset(&self) -> Option<u32> {
        (self.previous != 0).then(|| self.previous - self.page_size + 1)
    }

    pub fn advance(&mut self) {
        self.previous = self.next;
        self.next += self.page_size;
    }

    pub fn retreat(&mut self) {
        self.next = self.previous;
        self.previous = self.previous.saturating_sub(self.page_size);
    }
}

// == Catch Odds ==
/// Catch threshold for a pokemon: higher base experience, lower odds.
pub fn catch_chance(base_experience: u32) -> u32 {
    1000 / base_experience.saturating_add(10)
}

/// A throw succeeds when the d10 roll (0..10) does not exceed the chance.
pub fn is_caught(base_experience: u32, roll: u32) -> bool {
    roll <= catch_chance(base_experience)
}

// == Session ==
/// One interactive session: pagination cursor, caught pokemon and dice.
pub struct Session {
    client: PokeApiClient,
    pagination: Pagination,
    pokedex: BTreeMap<String, CaughtPokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, page_size: u32) -> Self {
        Self::with_rng(client, page_size, StdRng::from_entropy())
    }

    /// Creates a session with a fixed random source.
    pub fn with_rng(client: PokeApiClient, page_size: u32, rng: StdRng) -> Self {
        Self {
            client,
            pagination: Pagination::new(page_size),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn pokedex(&self) -> &BTreeMap<String, CaughtPokemon> {
        &self.pokedex
    }

    /// Runs one command, writing its output to `out`.
    ///
    /// API failures are reported to `out` and the session carries on; only
    /// errors writing to `out` are returned.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => write!(out, "{}", help_text())?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore { area } => self.explore(&area, out).await?,
            Command::Catch { pokemon } => self.catch(&pokemon, out).await?,
            Command::Inspect { pokemon } => self.inspect(&pokemon, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let offset = self.pagination.forward_offset();
        match self
            .client
            .location_area_names(offset, self.pagination.page_size)
            .await
        {
            Ok(names) => {
                write_lines(out, &names)?;
                self.pagination.advance();
            }
            Err(err) => report(out, &err)?,
        }
        Ok(())
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(offset) = self.pagination.back_offset() else {
            writeln!(out, "No previous")?;
            return Ok(());
        };

        match self
            .client
            .location_area_names(offset, self.pagination.page_size)
            .await
        {
            Ok(names) => {
                write_lines(out, &names)?;
                self.pagination.retreat();
            }
            Err(err) => report(out, &err)?,
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        match self.client.pokemon_in_area(area).await {
            Ok(names) => {
                writeln!(out, "Found Pokemon:")?;
                for name in names {
                    writeln!(out, " - {}", name)?;
                }
            }
            Err(err) => report(out, &err)?,
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let pokemon = match self.client.pokemon_to_catch(name).await {
            Ok(pokemon) => pokemon,
            Err(err) => return report(out, &err),
        };

        let roll = self.rng.gen_range(0..10);
        if is_caught(pokemon.base_experience, roll) {
            writeln!(out, "{} was caught!", name)?;
            info!(pokemon = %name, "Caught");
            self.pokedex.insert(name.to_string(), pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for (stat, value) in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat, value)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "You caught no pokemons yet")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: &crate::error::PokedexError) -> Result<()> {
    warn!("Command failed: {}", err);
    writeln!(out, "Error: {}", err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{area_key, page_key};
    use crate::cache::TimedCache;
    use std::time::Duration;

    fn offline_session() -> Session {
        let cache = TimedCache::new(Duration::from_secs(60));
        let client = PokeApiClient::new("http://127.0.0.1:9", cache);
        Session::with_rng(client, 20, StdRng::seed_from_u64(7))
    }

    async fn run(session: &mut Session, command: Command) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = session.execute(command, &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    fn pokemon(name: &str, base_experience: u32) -> CaughtPokemon {
        CaughtPokemon {
            name: name.to_string(),
            base_experience,
            height: 4,
            weight: 60,
            stats: [("hp".to_string(), 35), ("speed".to_string(), 90)]
                .into_iter()
                .collect(),
            types: vec!["electric".to_string()],
        }
    }

    #[test]
    fn test_pagination_walk() {
        let mut pages = Pagination::new(20);
        assert_eq!(pages.forward_offset(), 1);
        assert_eq!(pages.back_offset(), None);

        pages.advance();
        assert_eq!(pages.forward_offset(), 21);
        assert_eq!(pages.back_offset(), None);

        pages.advance();
        assert_eq!(pages.forward_offset(), 41);
        assert_eq!(pages.back_offset(), Some(1));

        pages.retreat();
        assert_eq!(pages, {
            let mut expected = Pagination::new(20);
            expected.advance();
            expected
        });
    }

    #[test]
    fn test_catch_odds() {
        assert_eq!(catch_chance(0), 100);
        assert_eq!(catch_chance(112), 8);
        assert_eq!(catch_chance(990), 1);
        assert!(is_caught(112, 8));
        assert!(!is_caught(112, 9));
        assert!(is_caught(2000, 0));
        assert!(!is_caught(2000, 1));
    }

    #[test]
    fn test_catch_odds_huge_base_experience() {
        assert_eq!(catch_chance(u32::MAX), 0);
        assert_eq!(catch_chance(u32::MAX - 5), 0);
        assert!(is_caught(u32::MAX, 0));
        assert!(!is_caught(u32::MAX, 1));
    }

    #[tokio::test]
    async fn test_exit_stops_session() {
        let mut session = offline_session();
        let (flow, out) = run(&mut session, Command::Exit).await;

        assert_eq!(flow, Flow::Exit);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_map_then_mapb_uses_cached_pages() {
        let mut session = offline_session();
        let cache = session.client.cache().clone();
        cache.add(page_key(1, 20), "first-a\nfirst-b\n").await;
        cache.add(page_key(21, 20), "second-a\n").await;

        let (_, out) = run(&mut session, Command::Map).await;
        assert_eq!(out, "first-a\nfirst-b\n");

        let (_, out) = run(&mut session, Command::Map).await;
        assert_eq!(out, "second-a\n");

        let (_, out) = run(&mut session, Command::MapBack).await;
        assert_eq!(out, "first-a\nfirst-b\n");
        assert_eq!(session.pagination().back_offset(), None);
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let mut session = offline_session();

        let (flow, out) = run(&mut session, Command::MapBack).await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "No previous\n");
    }

    #[tokio::test]
    async fn test_failed_map_keeps_position() {
        let mut session = offline_session();

        let (flow, out) = run(&mut session, Command::Map).await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("Error: "));
        assert_eq!(session.pagination().forward_offset(), 1);
    }

    #[tokio::test]
    async fn test_explore_lists_area() {
        let mut session = offline_session();
        session
            .client
            .cache()
            .add(area_key("mt-coronet"), "zubat\ngeodude\n")
            .await;

        let (_, out) = run(
            &mut session,
            Command::Explore {
                area: "mt-coronet".to_string(),
            },
        )
        .await;

        assert_eq!(out, "Exploring mt-coronet...\nFound Pokemon:\n - zubat\n - geodude\n");
    }

    #[tokio::test]
    async fn test_catch_inspect_and_pokedex() {
        let mut session = offline_session();
        // Base experience 0 gives a chance of 100, so every roll succeeds
        let pikachu = pokemon("pikachu", 0);
        session
            .client
            .cache()
            .add("pikachu", serde_json::to_vec(&pikachu).unwrap())
            .await;

        let (_, out) = run(&mut session, Command::Pokedex).await;
        assert_eq!(out, "You caught no pokemons yet\n");

        let (_, out) = run(
            &mut session,
            Command::Catch {
                pokemon: "pikachu".to_string(),
            },
        )
        .await;
        assert_eq!(out, "Throwing a Pokeball at pikachu...\npikachu was caught!\n");
        assert_eq!(session.pokedex().get("pikachu"), Some(&pikachu));

        let (_, out) = run(
            &mut session,
            Command::Inspect {
                pokemon: "pikachu".to_string(),
            },
        )
        .await;
        assert_eq!(
            out,
            "Name: pikachu\nHeight: 4\nWeight: 60\nStats:\n  -hp: 35\n  -speed: 90\nTypes:\n  - electric\n"
        );

        let (_, out) = run(&mut session, Command::Pokedex).await;
        assert_eq!(out, "Your Pokedex:\n - pikachu\n");
    }

    #[tokio::test]
    async fn test_inspect_uncaught() {
        let mut session = offline_session();

        let (_, out) = run(
            &mut session,
            Command::Inspect {
                pokemon: "mew".to_string(),
            },
        )
        .await;

        assert_eq!(out, "you have not caught that pokemon\n");
    }

    #[tokio::test]
    async fn test_help_output() {
        let mut session = offline_session();

        let (flow, out) = run(&mut session, Command::Help).await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, help_text());
    }
}
