//! REPL command table and line parsing.

use thiserror::Error;

/// Name and help text of one REPL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every command, in the order `help` lists them.
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
        description: "Displays the next 20 names of location areas in the Pokemon world",
    },
    CommandSpec {
        name: "mapb",
        description: "Displays previous 20 locations",
    },
    CommandSpec {
        name: "explore",
        description: "List of all the Pokémon in a given area",
    },
    CommandSpec {
        name: "catch",
        description: "Catching Pokemon adds them to the user's Pokedex. It takes the name of a Pokemon as an argument",
    },
    CommandSpec {
        name: "inspect",
        description: "Takes the name of a Pokemon as an argument. Print the name, height, weight, stats and type(s) of the Pokemon",
    },
    CommandSpec {
        name: "pokedex",
        description: "Print a list of all the names of the Pokemon the user has caught",
    },
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore { area: String },
    Catch { pokemon: String },
    Inspect { pokemon: String },
    Pokedex,
}

/// Why a line did not produce a command. `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("")]
    Empty,

    #[error("Unknown command: {0}. Type 'help' for usage")]
    Unknown(String),

    #[error("No location area name specified")]
    MissingArea,

    #[error("No pokemon name specified")]
    MissingPokemon,
}

impl Command {
    /// Parses one input line.
    ///
    /// The line is split on whitespace; the first word names the command and
    /// the second, if any, is its argument. Extra words are ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next().map(str::to_string);

        match name {
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            "map" => Ok(Command::Map),
            "mapb" => Ok(Command::MapBack),
            "explore" => arg
                .map(|area| Command::Explore { area })
                .ok_or(CommandError::MissingArea),
            "catch" => arg
                .map(|pokemon| Command::Catch { pokemon })
                .ok_or(CommandError::MissingPokemon),
            "inspect" => arg
                .map(|pokemon| Command::Inspect { pokemon })
                .ok_or(CommandError::MissingPokemon),
            "pokedex" => Ok(Command::Pokedex),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Help screen listing every command.
pub fn help_text() -> String {
    let mut text = String::from("\nWelcome to the Pokedex!\nUsage:\n\n");
    for spec in COMMANDS {
        text.push_str(&format!("{}: {}\n", spec.name, spec.description));
    }
    text
}
