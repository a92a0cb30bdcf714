use super::grid::{Cell, Grid};
use std::fmt;

/// What a prospective head position ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the grid
    Wall,

    /// The head ran into the snake's own body
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::Body => write!(f, "bit itself"),
        }
    }
}

/// Check whether moving the head to `head` collides with anything.
///
/// `body` is the snake's body *before* the move, excluding its current head.
/// The wall check is done first, as it is cheaper.
pub(crate) fn check<'a, I>(grid: Grid, head: Cell, body: I) -> Option<Collision>
where
    I: IntoIterator<Item = &'a Cell>,
{
    if !grid.is_in_bounds(head) {
        Some(Collision::Wall)
    } else if body.into_iter().any(|&c| c == head) {
        Some(Collision::Body)
    } else {
        None
    }
}
