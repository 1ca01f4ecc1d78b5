use grid_arena_core::Position;

/// A fighter together with the grid cell it occupies.
///
/// The position can be read by anyone, but once a fighter is handed to an
/// [`Arena`](crate::Arena) only the arena's movement rules relocate it.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed<F> {
    fighter: F,
    position: Position,
}

impl<F> Placed<F> {
    /// Places a fighter at the provided position without validation.
    #[must_use]
    pub const fn new(fighter: F, position: Position) -> Self {
        Self { fighter, position }
    }

    /// Cell currently occupied by the fighter.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Read access to the wrapped fighter.
    #[must_use]
    pub const fn fighter(&self) -> &F {
        &self.fighter
    }

    /// Mutable access to the wrapped fighter's own state.
    pub fn fighter_mut(&mut self) -> &mut F {
        &mut self.fighter
    }

    /// Consumes the placement, yielding the fighter.
    #[must_use]
    pub fn into_fighter(self) -> F {
        self.fighter
    }

    pub(crate) fn relocate(&mut self, position: Position) {
        self.position = position;
    }
}
