use std::io::{self, Write};

use grid_arena_core::{ArenaError, Command, Direction, Event, Fighter, FighterRef};
use grid_arena_fighters::{Hero, Monster};
use grid_arena_system_reaper::Reaper;
use grid_arena_world::{self as world, Arena};
use tracing::info;

use crate::{board, script::Instruction};

/// Drives an arena one instruction at a time and narrates the outcome.
#[derive(Debug)]
pub(crate) struct Session {
    arena: Arena<Hero, Monster>,
    reaper: Reaper,
    reap: bool,
}

impl Session {
    /// Creates a session. When `reap` is set, defeated monsters are removed
    /// after every battle.
    pub(crate) fn new(arena: Arena<Hero, Monster>, reap: bool) -> Self {
        Self {
            arena,
            reaper: Reaper::new(),
            reap,
        }
    }

    #[cfg(test)]
    pub(crate) fn arena(&self) -> &Arena<Hero, Monster> {
        &self.arena
    }

    /// Executes one instruction, writing user-facing messages to `out`.
    ///
    /// Arena rejections are reported and swallowed; only write failures
    /// propagate.
    pub(crate) fn execute<W: Write>(
        &mut self,
        instruction: Instruction,
        out: &mut W,
    ) -> io::Result<()> {
        let mut events = Vec::new();
        match instruction {
            Instruction::Board => return board::render(&self.arena, out),
            Instruction::Move { fighter, direction } => {
                let outcome = direction.parse::<Direction>().and_then(|direction| {
                    world::apply(
                        &mut self.arena,
                        Command::Move { fighter, direction },
                        &mut events,
                    )
                });
                self.narrate(&events, out)?;
                if let Err(error) = outcome {
                    writeln!(out, "invalid move: {error}")?;
                }
            }
            Instruction::Battle { monster } => {
                let outcome =
                    world::apply(&mut self.arena, Command::Battle { monster }, &mut events);
                self.narrate(&events, out)?;
                if let Err(error) = outcome {
                    report_battle_failure(&error, out)?;
                }
                self.reap(&events, out)?;
            }
        }
        Ok(())
    }

    fn narrate<W: Write>(&self, events: &[Event], out: &mut W) -> io::Result<()> {
        for event in events {
            match event {
                Event::FighterMoved { fighter, to, .. } => {
                    writeln!(out, "{} moves to ({to})", self.name_of(*fighter))?;
                }
                Event::AttackLanded { attacker, defender } => {
                    writeln!(
                        out,
                        "{} attacks {} ({} health left)",
                        self.name_of(*attacker),
                        self.name_of(*defender),
                        self.health_of(*defender),
                    )?;
                }
                Event::MonsterRemoved { monster } => {
                    writeln!(out, "monster {monster} leaves the arena")?;
                }
            }
        }
        Ok(())
    }

    fn reap<W: Write>(&mut self, events: &[Event], out: &mut W) -> io::Result<()> {
        if !self.reap {
            return Ok(());
        }

        let arena = &self.arena;
        let mut removals = Vec::new();
        self.reaper.handle(
            events,
            |id| {
                let monster = arena.monster(id)?;
                if monster.fighter().is_defeated() {
                    arena.handle(id)
                } else {
                    None
                }
            },
            &mut removals,
        );

        for removal in removals {
            if let Command::RemoveMonster { monster } = removal {
                let name = self.name_of(FighterRef::Monster(monster.id()));
                writeln!(out, "{name} is defeated")?;
                info!(monster = %monster.id(), %name, "removing defeated monster");
            }
            let mut removed = Vec::new();
            if world::apply(&mut self.arena, removal, &mut removed).is_ok() {
                self.narrate(&removed, out)?;
            }
        }
        Ok(())
    }

    fn name_of(&self, fighter: FighterRef) -> String {
        match fighter {
            FighterRef::Hero => self.arena.hero().fighter().name().to_owned(),
            FighterRef::Monster(id) => self
                .arena
                .monster(id)
                .map(|monster| monster.fighter().name().to_owned())
                .unwrap_or_else(|| format!("monster {id}")),
        }
    }

    fn health_of(&self, fighter: FighterRef) -> u32 {
        match fighter {
            FighterRef::Hero => self.arena.hero().fighter().health(),
            FighterRef::Monster(id) => self
                .arena
                .monster(id)
                .map_or(0, |monster| monster.fighter().health()),
        }
    }
}

fn report_battle_failure<W: Write>(error: &ArenaError, out: &mut W) -> io::Result<()> {
    match error {
        ArenaError::OutOfRange { .. } => writeln!(out, "{error}"),
        other => writeln!(out, "battle failed: {other}"),
    }
}
