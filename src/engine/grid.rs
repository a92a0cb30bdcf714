use rand::Rng;
use std::fmt;

/// A single square of the playfield, addressed by column (`x`) and row (`y`)
/// in cell units.
///
/// Coordinates are signed so that a prospective head one step past the edge
/// of the grid can be represented and then rejected by
/// [`Grid::is_in_bounds()`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `dx` columns and `dy` rows away from `self`
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The dimensions of the playfield.  Pure value; all operations are
/// side-effect free.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Grid {
    /// Number of columns
    pub(crate) columns: u16,

    /// Number of rows
    pub(crate) rows: u16,
}

impl Grid {
    pub(crate) fn is_in_bounds(self, cell: Cell) -> bool {
        (0..i32::from(self.columns)).contains(&cell.x)
            && (0..i32::from(self.rows)).contains(&cell.y)
    }

    /// The total number of cells in the grid
    pub(crate) fn capacity(self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// The cell at the middle of the grid, rounding towards the top-left
    pub(crate) fn center(self) -> Cell {
        Cell::new(i32::from(self.columns / 2), i32::from(self.rows / 2))
    }

    /// Draw a uniformly random cell within the grid.  The grid must not be
    /// empty.
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        Cell::new(
            rng.random_range(0..i32::from(self.columns)),
            rng.random_range(0..i32::from(self.rows)),
        )
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let columns = i32::from(self.columns);
        (0..i32::from(self.rows)).flat_map(move |y| (0..columns).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const GRID: Grid = Grid {
        columns: 29,
        rows: 25,
    };

    #[rstest]
    #[case(Cell::new(0, 0), true)]
    #[case(Cell::new(28, 24), true)]
    #[case(Cell::new(14, 12), true)]
    #[case(Cell::new(29, 12), false)]
    #[case(Cell::new(14, 25), false)]
    #[case(Cell::new(-1, 12), false)]
    #[case(Cell::new(14, -1), false)]
    fn test_is_in_bounds(#[case] cell: Cell, #[case] inside: bool) {
        assert_eq!(GRID.is_in_bounds(cell), inside);
    }

    #[test]
    fn center() {
        assert_eq!(GRID.center(), Cell::new(14, 12));
    }

    #[test]
    fn cells_cover_grid() {
        let cells = GRID.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), GRID.capacity());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(28, 24)));
        assert!(cells.iter().all(|&c| GRID.is_in_bounds(c)));
    }

    #[test]
    fn random_cells_are_in_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..1000 {
            assert!(GRID.is_in_bounds(GRID.random_cell(&mut rng)));
        }
    }
}
