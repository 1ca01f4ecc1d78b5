use grid_arena_core::{Command, Event, Position};
use grid_arena_fighters::{Hero, Monster, Stats};
use grid_arena_system_reaper::Reaper;
use grid_arena_world::{self as world, Arena, Placed};

fn stats(health: u32, power: u32, range: f64) -> Stats {
    Stats {
        health,
        power,
        range,
    }
}

fn arena() -> Arena<Hero, Monster> {
    Arena::new(
        Placed::new(Hero::new("Aria", stats(30, 5, 1.0)), Position::new(4, 4)),
        vec![
            Placed::new(Monster::new("Rat", stats(5, 1, 1.0)), Position::new(4, 5)),
            Placed::new(Monster::new("Ogre", stats(40, 8, 1.0)), Position::new(5, 4)),
        ],
    )
}

fn pump(arena: &mut Arena<Hero, Monster>, reaper: &mut Reaper, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    let _ = world::apply(arena, command, &mut events);

    let mut removals = Vec::new();
    reaper.handle(
        &events,
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
        world::apply(arena, removal, &mut events).expect("removal never fails");
    }
    events
}

#[test]
fn defeated_monster_is_removed_after_battle() {
    let mut arena = arena();
    let mut reaper = Reaper::new();
    let rat = arena.monsters().next().map(|(id, _)| id).expect("rat present");

    let events = pump(&mut arena, &mut reaper, Command::Battle { monster: rat });

    assert!(events.contains(&Event::MonsterRemoved { monster: rat }));
    assert!(!arena.is_valid_monster_id(rat));
    assert!(!arena.is_position_taken(4, 5));
    assert_eq!(arena.monster_count(), 1);
}

#[test]
fn surviving_monster_stays_in_the_arena() {
    let mut arena = arena();
    let mut reaper = Reaper::new();
    let ogre = arena
        .monsters()
        .nth(1)
        .map(|(id, _)| id)
        .expect("ogre present");

    let events = pump(&mut arena, &mut reaper, Command::Battle { monster: ogre });

    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::MonsterRemoved { .. })));
    assert!(arena.is_valid_monster_id(ogre));
    assert_eq!(arena.hero().fighter().health(), 22);
}
