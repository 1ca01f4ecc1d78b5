use std::io::{self, Write};

use grid_arena_core::FighterRef;
use grid_arena_fighters::{Hero, Monster};
use grid_arena_world::{query, Arena};

const EMPTY_CELL: char = '.';
const HERO_GLYPH: char = 'H';
/// Glyph for monsters whose identifier has no single-digit form.
const CROWD_GLYPH: char = 'M';

/// Writes the grid followed by a legend of every fighter.
pub(crate) fn render<W: Write>(arena: &Arena<Hero, Monster>, out: &mut W) -> io::Result<()> {
    let header: String = (0..arena.size()).map(column_label).collect();
    writeln!(out, "   {header}")?;

    for (y, row) in query::occupancy_rows(arena).iter().enumerate() {
        let cells: String = row.iter().map(|cell| glyph(*cell)).collect();
        writeln!(out, "{y:>2} {cells}")?;
    }

    for snapshot in query::fighters(arena) {
        let health = match snapshot.fighter {
            FighterRef::Hero => Some(arena.hero().fighter().health()),
            FighterRef::Monster(id) => arena.monster(id).map(|monster| monster.fighter().health()),
        };
        writeln!(
            out,
            "{} {} at ({}) range {} health {}",
            glyph(Some(snapshot.fighter)),
            snapshot.name,
            snapshot.position,
            snapshot.range,
            health.unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn column_label(x: i32) -> char {
    char::from_digit(x.unsigned_abs() % 10, 10).unwrap_or('?')
}

fn glyph(cell: Option<FighterRef>) -> char {
    match cell {
        None => EMPTY_CELL,
        Some(FighterRef::Hero) => HERO_GLYPH,
        Some(FighterRef::Monster(id)) => char::from_digit(id.get(), 10).unwrap_or(CROWD_GLYPH),
    }
}
