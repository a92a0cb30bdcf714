use super::direction::Direction;
use super::grid::Cell;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The body is stored head-first: `body[0]` is the head and the back of the
/// deque is the tail.  The body is never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) body: VecDeque<Cell>,

    /// The direction the snake moved in on its most recent advance (or will
    /// move in on its first)
    pub(super) direction: Direction,

    /// A turn requested since the last advance, applied at the start of the
    /// next one.  Later requests overwrite earlier ones.
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a one-segment snake at `head` facing in `direction`
    pub(crate) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
            pending: None,
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the cells occupied by the snake, head first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Return the cells occupied by the snake other than its head
    pub(crate) fn tail(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// The direction the snake will move in on its next advance
    pub(crate) fn heading(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Request a change of direction.  A request for the exact reverse of
    /// the current direction of motion is ignored; anything else replaces any
    /// turn already pending.  Returns whether the request was accepted.
    pub(crate) fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction.reverse() {
            false
        } else {
            self.pending = Some(requested);
            true
        }
    }

    /// Apply any pending turn and return the cell the head will move into on
    /// the next advance
    pub(crate) fn next_head(&mut self) -> Cell {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        self.direction.advance(self.head())
    }

    /// Move the snake one cell in its current direction and return the new
    /// head.  If `grew` is true, the tail is kept and the snake becomes one
    /// cell longer.
    pub(crate) fn advance(&mut self, grew: bool) -> Cell {
        let head = self.next_head();
        self.body.push_front(head);
        if !grew {
            let _ = self.body.pop_back();
        }
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn moves_without_growing() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert_eq!(snake.advance(false), Cell::new(6, 5));
        assert_eq!(snake.body(), &VecDeque::from([Cell::new(6, 5)]));
    }

    #[test]
    fn grows_by_one() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        snake.advance(true);
        snake.advance(true);
        snake.advance(false);
        assert_eq!(
            snake.body(),
            &VecDeque::from([Cell::new(8, 5), Cell::new(7, 5), Cell::new(6, 5)])
        );
        assert_eq!(
            snake.tail().copied().collect::<Vec<_>>(),
            [Cell::new(7, 5), Cell::new(6, 5)]
        );
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn reverse_is_ignored(#[case] current: Direction, #[case] requested: Direction) {
        let mut snake = Snake::new(Cell::new(5, 5), current);
        assert!(!snake.set_direction(requested));
        assert_eq!(snake.heading(), current);
        assert_eq!(snake.advance(false), current.advance(Cell::new(5, 5)));
    }

    #[test]
    fn turn_waits_for_next_advance() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert!(snake.set_direction(Direction::Up));
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.heading(), Direction::Up);
        assert_eq!(snake.advance(false), Cell::new(5, 4));
    }

    #[test]
    fn last_valid_request_wins() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert!(snake.set_direction(Direction::Up));
        assert!(snake.set_direction(Direction::Down));
        // Left reverses the committed heading even though Down is pending
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.advance(false), Cell::new(5, 6));
    }

    #[test]
    fn quick_double_turn_cannot_reverse_into_neck() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        snake.advance(true);
        snake.advance(true);
        assert!(snake.set_direction(Direction::Up));
        assert!(!snake.set_direction(Direction::Left));
        snake.advance(false);
        let cells = snake.body().iter().copied().collect::<HashSet<_>>();
        assert_eq!(cells.len(), snake.len());
    }
}
