#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Concrete hero and monster combatants for Grid Arena.
//!
//! Both variants share the same simple model: an attack subtracts the
//! attacker's power from the target's health, saturating at zero. A fighter
//! whose health reached zero is defeated and no longer attacks.

use grid_arena_core::Fighter;
use serde::Deserialize;

/// Combat attributes shared by heroes and monsters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Stats {
    /// Health the fighter starts with.
    pub health: u32,
    /// Damage dealt by each landed attack.
    pub power: u32,
    /// Maximum Euclidean distance the fighter can strike across.
    pub range: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Vitals {
    name: String,
    stats: Stats,
    health: u32,
}

impl Vitals {
    fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            stats,
            health: stats.health,
        }
    }

    fn strike(&self, target: &mut dyn Fighter) {
        if self.health > 0 {
            target.take_damage(self.stats.power);
        }
    }

    fn absorb(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// The player's champion.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    vitals: Vitals,
}

impl Hero {
    /// Creates a hero at full health.
    #[must_use]
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            vitals: Vitals::new(name, stats),
        }
    }

    /// Remaining health.
    #[must_use]
    pub fn health(&self) -> u32 {
        self.vitals.health
    }

    /// Attributes the hero was created with.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.vitals.stats
    }

    /// Reports whether the hero's health is exhausted.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.vitals.health == 0
    }
}

impl Fighter for Hero {
    fn name(&self) -> &str {
        &self.vitals.name
    }

    fn range(&self) -> f64 {
        self.vitals.stats.range
    }

    fn fight(&mut self, target: &mut dyn Fighter) {
        self.vitals.strike(target);
    }

    fn take_damage(&mut self, amount: u32) {
        self.vitals.absorb(amount);
    }
}

/// A hostile creature roaming the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    vitals: Vitals,
}

impl Monster {
    /// Creates a monster at full health.
    #[must_use]
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            vitals: Vitals::new(name, stats),
        }
    }

    /// Remaining health.
    #[must_use]
    pub fn health(&self) -> u32 {
        self.vitals.health
    }

    /// Attributes the monster was created with.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.vitals.stats
    }

    /// Reports whether the monster's health is exhausted.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.vitals.health == 0
    }
}

impl Fighter for Monster {
    fn name(&self) -> &str {
        &self.vitals.name
    }

    fn range(&self) -> f64 {
        self.vitals.stats.range
    }

    fn fight(&mut self, target: &mut dyn Fighter) {
        self.vitals.strike(target);
    }

    fn take_damage(&mut self, amount: u32) {
        self.vitals.absorb(amount);
    }
}
