use super::{Collision, Session};
use super::collision;
use super::direction::Direction;
use super::food;
use super::presenter::{LoopState, Notice, Presenter, View};
use super::settings::GameSettings;
use crate::scores::protocol::ScoreSubmission;
use crate::scores::{Leaderboard, ScoreEvent, Scoreboard};
use rand::Rng;
use std::io;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The game loop controller.  Owns the current [`Session`] (if any) and moves
/// between the idle, running, and halted states.
///
/// Time only advances when the driver calls [`GameLoop::frame()`]; the
/// controller decides on each call whether enough time has passed for the
/// snake to move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameLoop<S, R = rand::rngs::ThreadRng> {
    settings: GameSettings,
    state: LoopState,

    /// `Some` exactly when `state` is not `Idle`
    session: Option<Session>,

    leaderboard: Leaderboard,

    /// Number of leaderboard fetches that have been issued but whose
    /// outcomes have not been received yet
    fetches_in_flight: usize,

    /// Set when a game ends; while set, a new game cannot start until every
    /// leaderboard fetch in flight has completed
    awaiting_ranking: bool,

    scores: S,
    rng: R,
}

impl<S: Scoreboard> GameLoop<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: GameSettings, scores: S) -> Self {
        GameLoop::new_with_rng(settings, scores, rand::rng())
    }
}

impl<S: Scoreboard, R: Rng> GameLoop<S, R> {
    /// Create an idle game loop and request the current leaderboard
    pub(crate) fn new_with_rng(settings: GameSettings, mut scores: S, rng: R) -> GameLoop<S, R> {
        scores.refresh();
        GameLoop {
            settings,
            state: LoopState::Idle,
            session: None,
            leaderboard: Leaderboard::default(),
            fetches_in_flight: 1,
            awaiting_ranking: false,
            scores,
            rng,
        }
    }

    /// Start a new game for the player named `name`.
    ///
    /// # Errors
    ///
    /// Fails if the loop is not idle, if the leaderboard refresh from the end
    /// of the last game is still outstanding, or if `name` is empty after
    /// trimming whitespace (in which case the player is told so).
    pub(crate) fn start<P: Presenter>(
        &mut self,
        name: &str,
        presenter: &mut P,
    ) -> Result<(), StartError> {
        if self.state != LoopState::Idle {
            return Err(StartError::NotIdle);
        }
        if self.awaiting_ranking {
            return Err(StartError::AwaitingRanking);
        }
        let name = name.trim();
        if name.is_empty() {
            presenter.notify(Notice::NameRequired);
            return Err(StartError::NoName);
        }
        let grid = self.settings.grid;
        let mut session = Session::new(name.to_owned(), grid.center(), self.settings.initial_speed);
        for _ in 0..self.settings.food {
            let Some(cell) = food::spawn(grid, &session.occupied(), &mut self.rng) else {
                break;
            };
            session.food.push(cell);
        }
        info!(player = name, "Starting new game");
        self.session = Some(session);
        self.state = LoopState::Running;
        Ok(())
    }

    /// Process one frame at time `now`.  If the current tick interval has
    /// elapsed since the last tick, the snake advances (or collides) and the
    /// game is redrawn.
    ///
    /// The driver should stop calling this once it returns
    /// [`FrameOutcome::Halted`] or [`FrameOutcome::Stopped`].
    pub(crate) fn frame<P: Presenter>(
        &mut self,
        now: Instant,
        presenter: &mut P,
    ) -> io::Result<FrameOutcome> {
        if self.state != LoopState::Running {
            return Ok(FrameOutcome::Stopped);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(FrameOutcome::Stopped);
        };
        if !session.due(now) {
            return Ok(FrameOutcome::Throttled);
        }
        session.last_tick = Some(now);
        let grid = self.settings.grid;
        let head = session.snake.next_head();
        if let Some(collision) = collision::check(grid, head, session.snake.tail()) {
            self.halt(collision, presenter);
            self.render(presenter)?;
            return Ok(FrameOutcome::Halted(collision));
        }
        // The head moves one cell at a time, so it can land on at most one
        // piece of food.
        let eaten = session.food.iter().position(|&c| c == head);
        if eaten.is_some() {
            session.score = session.score.saturating_add(self.settings.reward);
            session.speed = self.settings.speed_up(session.speed);
        }
        session.snake.advance(eaten.is_some());
        if let Some(i) = eaten {
            debug!(%head, score = session.score, "Food eaten");
            match food::spawn(grid, &session.occupied(), &mut self.rng) {
                Some(cell) => session.food[i] = cell,
                None => {
                    let _ = session.food.remove(i);
                }
            }
        }
        self.render(presenter)?;
        Ok(FrameOutcome::Advanced {
            ate: eaten.is_some(),
        })
    }

    fn halt<P: Presenter>(&mut self, collision: Collision, presenter: &mut P) {
        self.state = LoopState::Halted(collision);
        let Some(session) = self.session.as_ref() else {
            return;
        };
        info!(
            player = %session.player,
            score = session.score,
            length = session.snake.len(),
            %collision,
            "Game over"
        );
        presenter.notify(Notice::GameOver {
            score: session.score,
            collision,
        });
        self.scores.submit(ScoreSubmission {
            name: session.player.clone(),
            score: session.score,
        });
        self.fetches_in_flight += 1;
        self.awaiting_ranking = true;
    }

    /// Feed the outcome of a score server request back into the loop
    pub(crate) fn handle_score_event<P: Presenter>(&mut self, event: ScoreEvent, presenter: &mut P) {
        match event {
            ScoreEvent::Submitted(Ok(())) => debug!("Score submitted"),
            ScoreEvent::Submitted(Err(e)) => {
                warn!(error = %e, "Failed to submit score");
                presenter.notify(Notice::SubmissionFailed(e.to_string()));
            }
            ScoreEvent::Leaderboard(r) => {
                self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
                if self.fetches_in_flight == 0 {
                    self.awaiting_ranking = false;
                }
                match r {
                    Ok(entries) => {
                        debug!(entries = entries.len(), "Leaderboard fetched");
                        self.leaderboard.update(entries);
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch leaderboard");
                        self.leaderboard.mark_unavailable();
                        presenter.notify(Notice::RankingUnavailable(e.to_string()));
                    }
                }
            }
        }
    }
}

impl<S, R> GameLoop<S, R> {
    /// Request a change of direction for the next tick.  Ignored unless a
    /// game is running.
    pub(crate) fn steer(&mut self, direction: Direction) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if !session.snake.set_direction(direction) {
                debug!(?direction, "Ignoring reversal");
            }
        }
    }

    /// Return from a finished game to the idle state, discarding the
    /// session.  Does nothing when idle or while a game is running.
    pub(crate) fn reset(&mut self) {
        if matches!(self.state, LoopState::Halted(_)) {
            self.state = LoopState::Idle;
            self.session = None;
        }
    }

    pub(crate) fn state(&self) -> LoopState {
        self.state
    }

    pub(crate) fn running(&self) -> bool {
        self.state == LoopState::Running
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(crate) fn view(&self) -> View<'_> {
        View {
            grid: self.settings.grid,
            state: self.state,
            session: self.session.as_ref(),
            leaderboard: &self.leaderboard,
            awaiting_ranking: self.awaiting_ranking,
        }
    }

    pub(crate) fn render<P: Presenter>(&self, presenter: &mut P) -> io::Result<()> {
        presenter.render(&self.view())
    }
}

/// What happened during a call to [`GameLoop::frame()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FrameOutcome {
    /// No game is running
    Stopped,

    /// Not enough time has passed since the last tick
    Throttled,

    /// The snake moved one cell
    Advanced { ate: bool },

    /// The snake collided with something, ending the game
    Halted(Collision),
}

impl FrameOutcome {
    /// Should the driver schedule another frame?
    pub(crate) fn rearm(self) -> bool {
        matches!(self, FrameOutcome::Throttled | FrameOutcome::Advanced { .. })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum StartError {
    #[error("a game is already in progress")]
    NotIdle,
    #[error("a player name is required")]
    NoName,
    #[error("waiting for the leaderboard to refresh")]
    AwaitingRanking,
}
