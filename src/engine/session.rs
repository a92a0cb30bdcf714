use super::direction::Direction;
use super::grid::Cell;
use super::snake::Snake;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// The complete mutable state of one playthrough, from start to halt
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session {
    pub(super) player: String,
    pub(super) snake: Snake,
    pub(super) food: Vec<Cell>,
    pub(super) score: u32,
    pub(super) speed: Duration,

    /// When the snake last advanced; `None` before the first tick, which
    /// happens on the first frame
    pub(super) last_tick: Option<Instant>,
}

impl Session {
    pub(super) fn new(player: String, head: Cell, speed: Duration) -> Session {
        Session {
            player,
            snake: Snake::new(head, Direction::Right),
            food: Vec::new(),
            score: 0,
            speed,
            last_tick: None,
        }
    }

    /// Build a session in an arbitrary state for drawing.  `body` is head
    /// first and must not be empty.
    #[cfg(test)]
    pub(crate) fn for_display(
        player: &str,
        body: Vec<Cell>,
        heading: Direction,
        food: Vec<Cell>,
        score: u32,
    ) -> Session {
        Session {
            player: player.to_owned(),
            snake: Snake {
                body: body.into(),
                direction: heading,
                pending: None,
            },
            food,
            score,
            speed: crate::consts::INITIAL_SPEED,
            last_tick: None,
        }
    }

    pub(crate) fn player(&self) -> &str {
        &self.player
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> &[Cell] {
        &self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    /// Is it time for the snake to advance again?
    pub(super) fn due(&self, now: Instant) -> bool {
        self.last_tick
            .is_none_or(|last| now.saturating_duration_since(last) >= self.speed)
    }

    /// All cells occupied by the snake or by food
    pub(super) fn occupied(&self) -> HashSet<Cell> {
        self.snake
            .body()
            .iter()
            .chain(&self.food)
            .copied()
            .collect()
    }
}
