#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Arena engine.
//!
//! This crate defines the vocabulary that connects drivers, the authoritative
//! arena, and pure systems. Drivers submit [`Command`] values describing
//! desired mutations, the world executes those commands via its `apply` entry
//! point, and then reports [`Event`] values describing what changed. Fighters
//! plug into the arena through the [`Fighter`] trait; the arena sequences
//! their attacks but never computes damage itself.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells along each edge of the square arena grid.
pub const ARENA_SIZE: i32 = 10;

/// Commands that express all permissible arena mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that a fighter advance a single cell in the specified direction.
    Move {
        /// Fighter attempting to move.
        fighter: FighterRef,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests a two-sided exchange between the hero and a monster.
    Battle {
        /// Identifier of the monster the hero engages.
        monster: MonsterId,
    },
    /// Requests removal of a specific monster instance from the arena.
    RemoveMonster {
        /// Handle identifying the monster instance to remove.
        monster: MonsterHandle,
    },
}

/// Events reported by the arena after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a fighter moved between two cells.
    FighterMoved {
        /// Fighter that moved.
        fighter: FighterRef,
        /// Cell the fighter occupied before moving.
        from: Position,
        /// Cell the fighter occupies after moving.
        to: Position,
    },
    /// Confirms that an attacker's `fight` capability was invoked on a defender.
    AttackLanded {
        /// Fighter that attacked.
        attacker: FighterRef,
        /// Fighter that received the attack.
        defender: FighterRef,
    },
    /// Confirms that a monster left the arena.
    MonsterRemoved {
        /// Identifier the monster held before removal.
        monster: MonsterId,
    },
}

/// Location of a single grid cell expressed as x (column) and y (row).
///
/// Coordinates are signed so that destinations computed beyond the grid edge
/// remain representable and can be rejected explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the neighbouring position one step away in `direction`.
    ///
    /// The result is not bounds checked.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Cardinal movement directions available to fighters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
    /// Movement toward increasing column indices.
    East,
}

impl Direction {
    /// Unit offset applied to a position when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }

    /// Single-letter label used by scripts and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::West => "W",
            Self::East => "E",
        }
    }
}

impl FromStr for Direction {
    type Err = ArenaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "N" => Ok(Self::North),
            "S" => Ok(Self::South),
            "W" => Ok(Self::West),
            "E" => Ok(Self::East),
            other => Err(ArenaError::InvalidDirection(other.to_owned())),
        }
    }
}

/// Stable identifier assigned to a monster for the lifetime of its roster.
///
/// Identifiers equal the monster's slot index and are never renumbered when
/// other monsters leave the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one specific monster instance.
///
/// A handle pairs the monster's identifier with the roster generation that
/// issued it, so a handle never matches a different monster that later
/// reuses the same identifier after the roster is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonsterHandle {
    id: MonsterId,
    roster: u32,
}

impl MonsterHandle {
    /// Creates a handle from an identifier and the roster generation that owns it.
    #[must_use]
    pub const fn new(id: MonsterId, roster: u32) -> Self {
        Self { id, roster }
    }

    /// Identifier of the monster referenced by the handle.
    #[must_use]
    pub const fn id(&self) -> MonsterId {
        self.id
    }

    /// Roster generation that issued the handle.
    #[must_use]
    pub const fn roster(&self) -> u32 {
        self.roster
    }
}

/// Addresses one of the fighters present in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FighterRef {
    /// The arena's single hero.
    Hero,
    /// The monster holding the provided identifier.
    Monster(MonsterId),
}

impl fmt::Display for FighterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => f.write_str("hero"),
            Self::Monster(id) => write!(f, "monster {id}"),
        }
    }
}

/// Side of a battle exchange that was unable to reach its opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackSide {
    /// The hero's opening attack could not reach the monster.
    Hero,
    /// The monster's return attack could not reach the hero.
    Monster,
}

impl fmt::Display for AttackSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => f.write_str("the hero cannot reach the monster"),
            Self::Monster => f.write_str("the monster cannot strike back at the hero"),
        }
    }
}

/// Capability set every combatant exposes to the arena.
///
/// The arena reads [`Fighter::name`] and [`Fighter::range`] and sequences
/// calls to [`Fighter::fight`]. How an attack affects its target is entirely
/// up to the implementation.
pub trait Fighter {
    /// Display name of the fighter.
    fn name(&self) -> &str;

    /// Maximum Euclidean distance this fighter can strike across.
    fn range(&self) -> f64;

    /// Applies this fighter's attack to `target`.
    fn fight(&mut self, target: &mut dyn Fighter);

    /// Receives an attack of the given strength.
    ///
    /// Called by other fighters from within [`Fighter::fight`]; the arena
    /// never calls it directly.
    fn take_damage(&mut self, amount: u32);
}

/// Reasons an arena operation may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The requested direction is not one of `N`, `S`, `W` or `E`.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),
    /// The destination lies outside the grid.
    #[error("invalid position: {x}, {y}")]
    InvalidPosition {
        /// Column of the rejected destination.
        x: i32,
        /// Row of the rejected destination.
        y: i32,
    },
    /// The destination is already occupied by another fighter.
    #[error("position already occupied: {x}, {y}")]
    PositionOccupied {
        /// Column of the occupied destination.
        x: i32,
        /// Row of the occupied destination.
        y: i32,
    },
    /// No live monster holds the provided identifier.
    #[error("invalid monster id: {0}")]
    InvalidMonsterId(MonsterId),
    /// An attacker could not reach its defender.
    #[error("target out of range: {side}")]
    OutOfRange {
        /// Side whose attack fell short.
        side: AttackSide,
    },
}
