use std::{error::Error, fmt};

use grid_arena_core::{FighterRef, MonsterId};

/// Marker that starts a comment line.
const COMMENT_PREFIX: char = '#';

/// Single instruction parsed from a script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Instruction {
    /// Step a fighter one cell. The direction is validated by the arena.
    Move {
        /// Fighter that should move.
        fighter: FighterRef,
        /// Direction label exactly as written.
        direction: String,
    },
    /// Resolve a battle between the hero and a monster.
    Battle {
        /// Monster the hero engages.
        monster: MonsterId,
    },
    /// Print the current board.
    Board,
}

/// Parses one script line, returning `None` for blank lines and comments.
///
/// Accepted forms are `move hero <DIR>`, `move <ID> <DIR>`, `battle <ID>` and
/// `board`. Verbs are case-insensitive.
pub(crate) fn parse_line(line: &str) -> Result<Option<Instruction>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let mut words = trimmed.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let instruction = match verb.as_str() {
        "move" => {
            let fighter = words.next().ok_or(ScriptError::MissingArgument {
                verb: "move",
                argument: "fighter",
            })?;
            let direction = words.next().ok_or(ScriptError::MissingArgument {
                verb: "move",
                argument: "direction",
            })?;
            Instruction::Move {
                fighter: parse_fighter(fighter)?,
                direction: direction.to_owned(),
            }
        }
        "battle" => {
            let monster = words.next().ok_or(ScriptError::MissingArgument {
                verb: "battle",
                argument: "monster id",
            })?;
            Instruction::Battle {
                monster: parse_monster_id(monster)?,
            }
        }
        "board" => Instruction::Board,
        _ => return Err(ScriptError::UnknownVerb(verb)),
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ScriptError::TrailingInput(rest.join(" ")));
    }

    Ok(Some(instruction))
}

fn parse_fighter(value: &str) -> Result<FighterRef, ScriptError> {
    if value.eq_ignore_ascii_case("hero") {
        return Ok(FighterRef::Hero);
    }
    parse_monster_id(value).map(FighterRef::Monster)
}

fn parse_monster_id(value: &str) -> Result<MonsterId, ScriptError> {
    value
        .parse::<u32>()
        .map(MonsterId::new)
        .map_err(|_| ScriptError::InvalidFighter(value.to_owned()))
}

/// Errors that can occur while parsing script lines.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The line started with a word that is not a known verb.
    UnknownVerb(String),
    /// The verb was given too few arguments.
    MissingArgument {
        /// Verb that was being parsed.
        verb: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },
    /// A fighter reference was neither `hero` nor a monster number.
    InvalidFighter(String),
    /// Extra words followed a complete instruction.
    TrailingInput(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVerb(verb) => write!(f, "unknown command '{verb}'"),
            Self::MissingArgument { verb, argument } => {
                write!(f, "'{verb}' is missing its {argument}")
            }
            Self::InvalidFighter(value) => {
                write!(f, "'{value}' is neither 'hero' nor a monster number")
            }
            Self::TrailingInput(rest) => write!(f, "unexpected trailing input '{rest}'"),
        }
    }
}

impl Error for ScriptError {}
