#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns observed defeats into monster removal commands.
//!
//! The arena never removes monsters on its own. After each batch of events
//! the driver hands them to [`Reaper::handle`], which inspects every monster
//! that was attacked and queues a [`Command::RemoveMonster`] for the ones
//! reported as defeated.

use grid_arena_core::{Command, Event, FighterRef, MonsterHandle, MonsterId};

/// Reaper system that queues removal commands for defeated monsters.
#[derive(Debug, Default)]
pub struct Reaper {
    scratch: Vec<MonsterId>,
}

impl Reaper {
    /// Creates a new reaper with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::RemoveMonster` for each defeated monster that was attacked.
    ///
    /// The `defeated` closure should return the monster's handle when the
    /// monster is live but out of the fight, and `None` otherwise. Each
    /// monster is considered at most once per call, in identifier order.
    pub fn handle<F>(&mut self, events: &[Event], mut defeated: F, out: &mut Vec<Command>)
    where
        F: FnMut(MonsterId) -> Option<MonsterHandle>,
    {
        self.scratch.clear();
        for event in events {
            if let Event::AttackLanded {
                defender: FighterRef::Monster(id),
                ..
            } = event
            {
                self.scratch.push(*id);
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        self.scratch.sort_unstable();
        self.scratch.dedup();

        for id in &self.scratch {
            if let Some(monster) = defeated(*id) {
                out.push(Command::RemoveMonster { monster });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attacked(id: u32) -> Event {
        Event::AttackLanded {
            attacker: FighterRef::Hero,
            defender: FighterRef::Monster(MonsterId::new(id)),
        }
    }

    #[test]
    fn quiet_without_attacks() {
        let mut reaper = Reaper::new();
        let mut out = Vec::new();

        reaper.handle(
            &[Event::MonsterRemoved {
                monster: MonsterId::new(0),
            }],
            |id| Some(MonsterHandle::new(id, 0)),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn attacks_on_the_hero_are_ignored() {
        let mut reaper = Reaper::new();
        let mut out = Vec::new();

        reaper.handle(
            &[Event::AttackLanded {
                attacker: FighterRef::Monster(MonsterId::new(2)),
                defender: FighterRef::Hero,
            }],
            |id| Some(MonsterHandle::new(id, 0)),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn repeated_attacks_yield_single_removal_in_id_order() {
        let mut reaper = Reaper::new();
        let mut out = Vec::new();

        reaper.handle(
            &[attacked(4), attacked(1), attacked(4)],
            |id| Some(MonsterHandle::new(id, 3)),
            &mut out,
        );

        assert_eq!(
            out,
            vec![
                Command::RemoveMonster {
                    monster: MonsterHandle::new(MonsterId::new(1), 3),
                },
                Command::RemoveMonster {
                    monster: MonsterHandle::new(MonsterId::new(4), 3),
                },
            ]
        );
    }

    #[test]
    fn survivors_are_kept() {
        let mut reaper = Reaper::new();
        let mut out = Vec::new();

        reaper.handle(
            &[attacked(0), attacked(1)],
            |id| (id.get() == 1).then(|| MonsterHandle::new(id, 0)),
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::RemoveMonster {
                monster: MonsterHandle::new(MonsterId::new(1), 0),
            }]
        );
    }
}
