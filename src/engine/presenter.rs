use super::{Collision, Grid, Session};
use crate::scores::Leaderboard;
use std::fmt;
use std::io;

/// The presentation layer: draws the game and shows notices to the player.
/// The game loop calls into it but does not implement it.
pub(crate) trait Presenter {
    /// Draw the current state of the game
    fn render(&mut self, view: &View<'_>) -> io::Result<()>;

    /// Show the player a message that does not require a response
    fn notify(&mut self, notice: Notice);
}

/// A snapshot of everything a [`Presenter`] may draw
#[derive(Clone, Copy, Debug)]
pub(crate) struct View<'a> {
    pub(crate) grid: Grid,
    pub(crate) state: LoopState,

    /// The current or just-ended game; `None` when idle
    pub(crate) session: Option<&'a Session>,

    pub(crate) leaderboard: &'a Leaderboard,

    /// True while a new game cannot start because the leaderboard is still
    /// being refreshed after the last one
    pub(crate) awaiting_ranking: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum LoopState {
    #[default]
    Idle,
    Running,
    Halted(Collision),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Notice {
    /// The player tried to start a game without entering a name
    NameRequired,

    GameOver { score: u32, collision: Collision },

    /// The final score could not be saved
    SubmissionFailed(String),

    /// The leaderboard could not be fetched
    RankingUnavailable(String),
}

impl Notice {
    /// Is this notice about something having gone wrong?
    pub(crate) fn is_problem(&self) -> bool {
        !matches!(self, Notice::GameOver { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NameRequired => write!(f, "Please enter a player name."),
            Notice::GameOver { score, collision } => {
                write!(f, "Game over! The snake {collision}.  Score: {score}")
            }
            Notice::SubmissionFailed(e) => write!(f, "Score submission failed: {e}"),
            Notice::RankingUnavailable(e) => write!(f, "Ranking unavailable: {e}"),
        }
    }
}
