#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state management for Grid Arena.
//!
//! The [`Arena`] owns one hero and a sparse roster of monsters on a square
//! grid. It enforces placement rules (bounds, exclusive occupancy), validates
//! movement and sequences battles between the hero and a monster. Damage is
//! never computed here: the arena only decides *whether* a fighter may
//! attack and then calls into [`Fighter::fight`].

mod geometry;
mod placed;

use std::mem;

use grid_arena_core::{
    ArenaError, AttackSide, Command, Direction, Event, Fighter, FighterRef, MonsterHandle,
    MonsterId, Position, ARENA_SIZE,
};
use tracing::debug;

pub use geometry::{distance, touchable};
pub use placed::Placed;

/// Represents the authoritative arena state.
#[derive(Clone, Debug)]
pub struct Arena<H, M> {
    hero: Placed<H>,
    monsters: Vec<Option<Placed<M>>>,
    roster: u32,
    size: i32,
}

impl<H, M> Arena<H, M> {
    /// Creates an arena from an already placed hero and monster roster.
    ///
    /// Placement is trusted as provided: overlapping or out-of-bounds
    /// fighters are not rejected here. Monsters receive identifiers equal to
    /// their index in `monsters`.
    #[must_use]
    pub fn new(hero: Placed<H>, monsters: Vec<Placed<M>>) -> Self {
        Self {
            hero,
            monsters: monsters.into_iter().map(Some).collect(),
            roster: 0,
            size: ARENA_SIZE,
        }
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// The hero and the cell it occupies.
    #[must_use]
    pub const fn hero(&self) -> &Placed<H> {
        &self.hero
    }

    /// Mutable access to the hero's own state. Its position stays arena-controlled.
    pub fn hero_mut(&mut self) -> &mut H {
        self.hero.fighter_mut()
    }

    /// Replaces the hero without validating its placement, returning the previous one.
    pub fn set_hero(&mut self, hero: Placed<H>) -> Placed<H> {
        mem::replace(&mut self.hero, hero)
    }

    /// The live monster holding `id`, if any.
    #[must_use]
    pub fn monster(&self, id: MonsterId) -> Option<&Placed<M>> {
        let index = usize::try_from(id.get()).ok()?;
        self.monsters.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to a live monster's own state.
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut M> {
        slot_mut(&mut self.monsters, id).map(Placed::fighter_mut)
    }

    /// Iterator over live monsters in identifier order.
    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, &Placed<M>)> {
        self.monsters
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|monster| (monster_id(index), monster)))
    }

    /// Number of monsters still present in the arena.
    #[must_use]
    pub fn monster_count(&self) -> usize {
        self.monsters.iter().filter(|slot| slot.is_some()).count()
    }

    /// Replaces the monster roster without validating placement.
    ///
    /// Identifiers restart from zero and handles issued for the previous
    /// roster stop matching. The previous live monsters are returned in
    /// identifier order.
    pub fn set_monsters(&mut self, monsters: Vec<Placed<M>>) -> Vec<Placed<M>> {
        let previous = mem::replace(
            &mut self.monsters,
            monsters.into_iter().map(Some).collect(),
        );
        self.roster = self.roster.wrapping_add(1);
        previous.into_iter().flatten().collect()
    }

    /// Issues an identity handle for the live monster holding `id`.
    #[must_use]
    pub fn handle(&self, id: MonsterId) -> Option<MonsterHandle> {
        self.monster(id).map(|_| MonsterHandle::new(id, self.roster))
    }

    /// Cell occupied by the addressed fighter, if it is present.
    #[must_use]
    pub fn position_of(&self, fighter: FighterRef) -> Option<Position> {
        match fighter {
            FighterRef::Hero => Some(self.hero.position()),
            FighterRef::Monster(id) => self.monster(id).map(Placed::position),
        }
    }

    /// Reports whether `(x, y)` lies within `[0, size) × [0, size)`.
    #[must_use]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        geometry::within_grid(x, y, self.size)
    }

    /// Reports whether any fighter occupies `(x, y)`.
    #[must_use]
    pub fn is_position_taken(&self, x: i32, y: i32) -> bool {
        self.occupant(x, y).is_some()
    }

    /// Returns the fighter occupying `(x, y)`, scanning the hero first and
    /// then monsters in identifier order.
    #[must_use]
    pub fn occupant(&self, x: i32, y: i32) -> Option<FighterRef> {
        let cell = Position::new(x, y);
        if self.hero.position() == cell {
            return Some(FighterRef::Hero);
        }

        self.monsters()
            .find(|(_, monster)| monster.position() == cell)
            .map(|(id, _)| FighterRef::Monster(id))
    }

    /// Reports whether `id` currently resolves to a live monster.
    #[must_use]
    pub fn is_valid_monster_id(&self, id: MonsterId) -> bool {
        self.monster(id).is_some()
    }

    /// Moves a fighter one cell in the direction named by `direction`.
    ///
    /// Accepts `"N"`, `"S"`, `"W"` and `"E"`. Every failure leaves the
    /// arena untouched. Returns the fighter's new position.
    pub fn move_fighter(
        &mut self,
        fighter: FighterRef,
        direction: &str,
    ) -> Result<Position, ArenaError> {
        let direction: Direction = direction.parse()?;
        self.step(fighter, direction)
    }

    /// Moves a fighter one cell in `direction`, returning its new position.
    pub fn step(
        &mut self,
        fighter: FighterRef,
        direction: Direction,
    ) -> Result<Position, ArenaError> {
        self.relocate(fighter, direction).map(|(_, to)| to)
    }

    /// Removes the exact monster instance identified by `handle`.
    ///
    /// Returns `None` without touching the arena when the handle is stale,
    /// belongs to a replaced roster, or the monster already left. Remaining
    /// identifiers are unaffected.
    pub fn remove_monster(&mut self, handle: MonsterHandle) -> Option<Placed<M>> {
        if handle.roster() != self.roster {
            return None;
        }

        let index = usize::try_from(handle.id().get()).ok()?;
        let removed = self.monsters.get_mut(index)?.take()?;
        debug!(monster = %handle.id(), "monster removed");
        Some(removed)
    }

    fn relocate(
        &mut self,
        fighter: FighterRef,
        direction: Direction,
    ) -> Result<(Position, Position), ArenaError> {
        let from = match fighter {
            FighterRef::Hero => self.hero.position(),
            FighterRef::Monster(id) => self
                .monster(id)
                .map(Placed::position)
                .ok_or(ArenaError::InvalidMonsterId(id))?,
        };

        let to = from.offset(direction);
        if !self.is_valid_position(to.x(), to.y()) {
            return Err(ArenaError::InvalidPosition { x: to.x(), y: to.y() });
        }
        if self.is_position_taken(to.x(), to.y()) {
            return Err(ArenaError::PositionOccupied { x: to.x(), y: to.y() });
        }

        match fighter {
            FighterRef::Hero => self.hero.relocate(to),
            FighterRef::Monster(id) => {
                if let Some(monster) = slot_mut(&mut self.monsters, id) {
                    monster.relocate(to);
                }
            }
        }

        debug!(%fighter, %from, %to, "fighter moved");
        Ok((from, to))
    }
}

impl<H, M> Arena<H, M>
where
    H: Fighter,
    M: Fighter,
{
    /// Resolves one exchange between the hero and the monster holding `id`.
    ///
    /// The hero strikes first and must be within its own range of the
    /// monster. The monster then strikes back if it can reach the hero. When
    /// only the return strike is out of range the hero's attack has already
    /// been applied and is kept; the error reports [`AttackSide::Monster`].
    /// Defeated monsters are not removed here.
    pub fn battle(&mut self, id: MonsterId) -> Result<(), ArenaError> {
        self.resolve_battle(id, |_, _| {})
    }

    fn resolve_battle<F>(&mut self, id: MonsterId, mut on_attack: F) -> Result<(), ArenaError>
    where
        F: FnMut(FighterRef, FighterRef),
    {
        let hero = &mut self.hero;
        let monster =
            slot_mut(&mut self.monsters, id).ok_or(ArenaError::InvalidMonsterId(id))?;
        let monster_ref = FighterRef::Monster(id);

        if !touchable(&*hero, &*monster) {
            return Err(ArenaError::OutOfRange {
                side: AttackSide::Hero,
            });
        }
        hero.fighter_mut().fight(monster.fighter_mut());
        debug!(
            attacker = hero.fighter().name(),
            defender = monster.fighter().name(),
            "hero attacked"
        );
        on_attack(FighterRef::Hero, monster_ref);

        if !touchable(&*monster, &*hero) {
            return Err(ArenaError::OutOfRange {
                side: AttackSide::Monster,
            });
        }
        monster.fighter_mut().fight(hero.fighter_mut());
        debug!(
            attacker = monster.fighter().name(),
            defender = hero.fighter().name(),
            "monster struck back"
        );
        on_attack(monster_ref, FighterRef::Hero);

        Ok(())
    }
}

/// Applies the provided command to the arena, reporting what changed.
///
/// Events describing completed effects are appended to `out_events` even
/// when the command ultimately fails, so a battle whose return strike is out
/// of range still reports the hero's landed attack.
pub fn apply<H, M>(
    arena: &mut Arena<H, M>,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ArenaError>
where
    H: Fighter,
    M: Fighter,
{
    let outcome = match command {
        Command::Move { fighter, direction } => {
            arena
                .relocate(fighter, direction)
                .map(|(from, to)| out_events.push(Event::FighterMoved { fighter, from, to }))
        }
        Command::Battle { monster } => arena.resolve_battle(monster, |attacker, defender| {
            out_events.push(Event::AttackLanded { attacker, defender });
        }),
        Command::RemoveMonster { monster } => {
            if arena.remove_monster(monster).is_some() {
                out_events.push(Event::MonsterRemoved {
                    monster: monster.id(),
                });
            }
            Ok(())
        }
    };

    if let Err(error) = &outcome {
        debug!(?command, %error, "command rejected");
    }
    outcome
}

/// Query functions that provide read-only access to the arena state.
pub mod query {
    use grid_arena_core::{Fighter, FighterRef, MonsterId, Position};

    use super::Arena;

    /// Reports the cell currently occupied by the hero.
    #[must_use]
    pub fn hero_position<H, M>(arena: &Arena<H, M>) -> Position {
        arena.hero().position()
    }

    /// Lists every live monster with its cell, ordered by identifier.
    #[must_use]
    pub fn monster_positions<H, M>(arena: &Arena<H, M>) -> Vec<(MonsterId, Position)> {
        arena
            .monsters()
            .map(|(id, monster)| (id, monster.position()))
            .collect()
    }

    /// Immutable representation of a single fighter used for presentation.
    #[derive(Clone, Debug, PartialEq)]
    pub struct FighterSnapshot {
        /// Which fighter the snapshot describes.
        pub fighter: FighterRef,
        /// Display name reported by the fighter.
        pub name: String,
        /// Cell the fighter occupies.
        pub position: Position,
        /// Attack range reported by the fighter.
        pub range: f64,
    }

    /// Captures every fighter in the arena, hero first then monsters by identifier.
    #[must_use]
    pub fn fighters<H, M>(arena: &Arena<H, M>) -> Vec<FighterSnapshot>
    where
        H: Fighter,
        M: Fighter,
    {
        let hero = arena.hero();
        let mut snapshots = Vec::with_capacity(arena.monster_count() + 1);
        snapshots.push(FighterSnapshot {
            fighter: FighterRef::Hero,
            name: hero.fighter().name().to_owned(),
            position: hero.position(),
            range: hero.fighter().range(),
        });
        snapshots.extend(arena.monsters().map(|(id, monster)| FighterSnapshot {
            fighter: FighterRef::Monster(id),
            name: monster.fighter().name().to_owned(),
            position: monster.position(),
            range: monster.fighter().range(),
        }));
        snapshots
    }

    /// Dense occupancy matrix indexed as `rows[y][x]`.
    #[must_use]
    pub fn occupancy_rows<H, M>(arena: &Arena<H, M>) -> Vec<Vec<Option<FighterRef>>> {
        (0..arena.size())
            .map(|y| (0..arena.size()).map(|x| arena.occupant(x, y)).collect())
            .collect()
    }
}

fn slot_mut<M>(monsters: &mut [Option<Placed<M>>], id: MonsterId) -> Option<&mut Placed<M>> {
    let index = usize::try_from(id.get()).ok()?;
    monsters.get_mut(index).and_then(Option::as_mut)
}

fn monster_id(index: usize) -> MonsterId {
    MonsterId::new(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dummy {
        name: &'static str,
        range: f64,
        damage_taken: u32,
    }

    impl Dummy {
        fn new(name: &'static str, range: f64) -> Self {
            Self {
                name,
                range,
                damage_taken: 0,
            }
        }
    }

    impl Fighter for Dummy {
        fn name(&self) -> &str {
            self.name
        }

        fn range(&self) -> f64 {
            self.range
        }

        fn fight(&mut self, target: &mut dyn Fighter) {
            target.take_damage(1);
        }

        fn take_damage(&mut self, amount: u32) {
            self.damage_taken += amount;
        }
    }

    fn arena_with(monsters: &[(i32, i32)]) -> Arena<Dummy, Dummy> {
        Arena::new(
            Placed::new(Dummy::new("hero", 1.0), Position::new(5, 5)),
            monsters
                .iter()
                .map(|&(x, y)| Placed::new(Dummy::new("monster", 1.0), Position::new(x, y)))
                .collect(),
        )
    }

    #[test]
    fn new_arena_assigns_sequential_identifiers() {
        let arena = arena_with(&[(0, 0), (1, 1), (2, 2)]);

        let ids: Vec<_> = arena.monsters().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(arena.size(), ARENA_SIZE);
    }

    #[test]
    fn occupant_prefers_hero_scan_order() {
        let arena = arena_with(&[(3, 3), (3, 3)]);

        assert_eq!(arena.occupant(5, 5), Some(FighterRef::Hero));
        assert_eq!(
            arena.occupant(3, 3),
            Some(FighterRef::Monster(MonsterId::new(0)))
        );
        assert_eq!(arena.occupant(4, 4), None);
    }

    #[test]
    fn removal_leaves_gap_without_renumbering() {
        let mut arena = arena_with(&[(0, 0), (1, 1), (2, 2)]);
        let handle = arena.handle(MonsterId::new(1)).expect("monster 1 is live");

        let removed = arena.remove_monster(handle).expect("monster removed");

        assert_eq!(removed.position(), Position::new(1, 1));
        let ids: Vec<_> = arena.monsters().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(arena.monster_count(), 2);
        assert!(!arena.is_position_taken(1, 1));
    }

    #[test]
    fn replacing_roster_invalidates_previous_handles() {
        let mut arena = arena_with(&[(0, 0)]);
        let stale = arena.handle(MonsterId::new(0)).expect("monster 0 is live");

        let previous = arena.set_monsters(vec![Placed::new(
            Dummy::new("replacement", 1.0),
            Position::new(9, 9),
        )]);

        assert_eq!(previous.len(), 1);
        assert!(arena.remove_monster(stale).is_none());
        assert!(arena.is_valid_monster_id(MonsterId::new(0)));
    }

    #[test]
    fn moving_missing_monster_is_rejected() {
        let mut arena = arena_with(&[]);

        let result = arena.step(FighterRef::Monster(MonsterId::new(4)), Direction::East);

        assert_eq!(result, Err(ArenaError::InvalidMonsterId(MonsterId::new(4))));
    }

    #[test]
    fn apply_reports_moves_with_both_endpoints() {
        let mut arena = arena_with(&[]);
        let mut events = Vec::new();

        apply(
            &mut arena,
            Command::Move {
                fighter: FighterRef::Hero,
                direction: Direction::West,
            },
            &mut events,
        )
        .expect("west of the centre is free");

        assert_eq!(
            events,
            vec![Event::FighterMoved {
                fighter: FighterRef::Hero,
                from: Position::new(5, 5),
                to: Position::new(4, 5),
            }]
        );
    }

    #[test]
    fn apply_skips_removal_event_for_unknown_handle() {
        let mut arena = arena_with(&[(0, 0)]);
        let mut events = Vec::new();

        apply(
            &mut arena,
            Command::RemoveMonster {
                monster: MonsterHandle::new(MonsterId::new(7), 0),
            },
            &mut events,
        )
        .expect("removal never fails");

        assert!(events.is_empty());
        assert_eq!(arena.monster_count(), 1);
    }

    #[test]
    fn battle_lands_both_attacks_when_adjacent() {
        let mut arena = arena_with(&[(5, 6)]);

        arena.battle(MonsterId::new(0)).expect("adjacent fighters reach each other");

        let monster = arena.monster(MonsterId::new(0)).expect("battle keeps monsters");
        assert_eq!(monster.fighter().damage_taken, 1);
        assert_eq!(arena.hero().fighter().damage_taken, 1);
    }

    #[test]
    fn occupancy_rows_cover_full_grid() {
        let arena = arena_with(&[(0, 9)]);

        let rows = query::occupancy_rows(&arena);

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.len() == 10));
        assert_eq!(rows[5][5], Some(FighterRef::Hero));
        assert_eq!(rows[9][0], Some(FighterRef::Monster(MonsterId::new(0))));
    }

    #[test]
    fn position_queries_skip_removed_monsters() {
        let mut arena = arena_with(&[(0, 0), (1, 1), (2, 2)]);
        let handle = arena.handle(MonsterId::new(1)).expect("monster 1 is live");
        let _ = arena.remove_monster(handle);

        assert_eq!(query::hero_position(&arena), Position::new(5, 5));
        assert_eq!(
            query::monster_positions(&arena),
            vec![
                (MonsterId::new(0), Position::new(0, 0)),
                (MonsterId::new(2), Position::new(2, 2)),
            ]
        );
    }
}
