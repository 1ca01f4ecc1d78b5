use grid_arena_core::Fighter;

use crate::Placed;

/// Euclidean distance between the cells two fighters occupy.
#[must_use]
pub fn distance<A, B>(a: &Placed<A>, b: &Placed<B>) -> f64 {
    a.position().distance(b.position())
}

/// Reports whether `attacker` can reach `defender`.
///
/// Only the attacker's range is consulted, so the relation is not symmetric
/// when the two fighters carry different ranges.
#[must_use]
pub fn touchable<A, D>(attacker: &Placed<A>, defender: &Placed<D>) -> bool
where
    A: Fighter,
{
    distance(attacker, defender) <= attacker.fighter().range()
}

pub(crate) fn within_grid(x: i32, y: i32, size: i32) -> bool {
    x >= 0 && y >= 0 && x < size && y < size
}
