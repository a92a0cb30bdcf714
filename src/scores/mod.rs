mod client;
mod feed;
pub(crate) mod protocol;
pub(crate) use self::client::{ClientError, ScoreClient};
pub(crate) use self::feed::ScoreFeed;
use self::protocol::{LeaderboardEntry, ScoreSubmission};

/// The game's view of the score server.  Implementations must not block:
/// outcomes are delivered later as [`ScoreEvent`]s.
pub(crate) trait Scoreboard {
    /// Submit a finished game's score, then refresh the leaderboard whether
    /// or not the submission succeeded.  Produces a
    /// [`ScoreEvent::Submitted`] followed by a [`ScoreEvent::Leaderboard`].
    fn submit(&mut self, submission: ScoreSubmission);

    /// Fetch the current leaderboard.  Produces a
    /// [`ScoreEvent::Leaderboard`].
    fn refresh(&mut self);
}

/// The outcome of a request made through a [`Scoreboard`]
#[derive(Debug)]
pub(crate) enum ScoreEvent {
    Submitted(Result<(), ClientError>),
    Leaderboard(Result<Vec<LeaderboardEntry>, ClientError>),
}

/// The game's read-only copy of the leaderboard
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    status: LeaderboardStatus,
}

impl Leaderboard {
    pub(crate) fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub(crate) fn status(&self) -> LeaderboardStatus {
        self.status
    }

    /// Replace the entries with a freshly-fetched list
    pub(crate) fn update(&mut self, entries: Vec<LeaderboardEntry>) {
        self.entries = entries;
        self.status = LeaderboardStatus::Ready;
    }

    /// Record that the latest fetch failed.  Previously-fetched entries are
    /// kept for display.
    pub(crate) fn mark_unavailable(&mut self) {
        self.status = LeaderboardStatus::Unavailable;
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum LeaderboardStatus {
    /// No fetch has completed yet
    #[default]
    Loading,
    Ready,
    Unavailable,
}
