use super::grid::{Cell, Grid};
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;

/// How many random draws to make before falling back to choosing among the
/// free cells directly
const MAX_DRAWS: usize = 64;

/// Choose a cell for a new piece of food uniformly at random from the cells
/// of `grid` not in `occupied`.
///
/// Random cells are drawn and redrawn while they land on an occupied cell.
/// On a crowded board this gives up after [`MAX_DRAWS`] attempts and picks
/// from an enumeration of the free cells instead, so the result is still
/// uniform.  Returns `None` if every cell is occupied.
pub(crate) fn spawn<R: Rng>(grid: Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
    if grid.capacity() == 0 {
        return None;
    }
    for _ in 0..MAX_DRAWS {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
    grid.cells().filter(|c| !occupied.contains(c)).choose(rng)
}
