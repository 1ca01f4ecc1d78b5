use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use grid_arena_core::{Position, ARENA_SIZE};
use grid_arena_fighters::{Hero, Monster, Stats};
use grid_arena_world::{Arena, Placed};
use serde::Deserialize;

/// Skirmish used when no scenario file is supplied.
const BUILTIN_SCENARIO: &str = r#"
[hero]
name = "Aria"
position = { x = 0, y = 0 }
range = 1.5
health = 30
power = 6

[[monsters]]
name = "Goblin"
position = { x = 3, y = 3 }
range = 1.0
health = 10
power = 3

[[monsters]]
name = "Archer"
position = { x = 7, y = 2 }
range = 4.0
health = 8
power = 2

[[monsters]]
name = "Ogre"
position = { x = 8, y = 8 }
range = 1.5
health = 25
power = 7
"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    hero: FighterEntry,
    #[serde(default)]
    monsters: Vec<FighterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FighterEntry {
    name: String,
    position: Position,
    range: f64,
    health: u32,
    power: u32,
}

impl FighterEntry {
    fn stats(&self) -> Stats {
        Stats {
            health: self.health,
            power: self.power,
            range: self.range,
        }
    }
}

/// Loads the scenario stored at `path`.
pub(crate) fn load(path: &Path) -> Result<Arena<Hero, Monster>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
}

/// Builds the arena described by the built-in skirmish.
pub(crate) fn builtin() -> Result<Arena<Hero, Monster>> {
    parse(BUILTIN_SCENARIO).context("built-in scenario is invalid")
}

/// Parses scenario TOML and places every fighter.
///
/// The arena trusts whatever placement it is given, so this loader rejects
/// fighters outside the grid and fighters sharing a cell.
pub(crate) fn parse(contents: &str) -> Result<Arena<Hero, Monster>> {
    let scenario: ScenarioFile =
        toml::from_str(contents).context("failed to parse scenario toml contents")?;

    let mut occupied = HashSet::with_capacity(scenario.monsters.len() + 1);
    for entry in std::iter::once(&scenario.hero).chain(&scenario.monsters) {
        check_placement(entry, &mut occupied)?;
    }

    let hero = Placed::new(
        Hero::new(scenario.hero.name.clone(), scenario.hero.stats()),
        scenario.hero.position,
    );
    let monsters = scenario
        .monsters
        .iter()
        .map(|entry| Placed::new(Monster::new(entry.name.clone(), entry.stats()), entry.position))
        .collect();

    Ok(Arena::new(hero, monsters))
}

fn check_placement(entry: &FighterEntry, occupied: &mut HashSet<Position>) -> Result<()> {
    let position = entry.position;
    let inside = (0..ARENA_SIZE).contains(&position.x()) && (0..ARENA_SIZE).contains(&position.y());
    if !inside {
        bail!(
            "{} at ({position}) lies outside the {ARENA_SIZE}x{ARENA_SIZE} arena",
            entry.name
        );
    }
    if !occupied.insert(position) {
        bail!("{} at ({position}) shares its cell with another fighter", entry.name);
    }
    if !entry.range.is_finite() || entry.range < 0.0 {
        bail!("{} has invalid range {}", entry.name, entry.range);
    }
    Ok(())
}
