//! JSON bodies exchanged between the game and the score server
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the leaderboard as returned by `GET /api/scores`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct LeaderboardEntry {
    pub(crate) player_name: String,
    pub(crate) score: u32,
}

/// The body of `POST /api/score`
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreSubmission {
    pub(crate) name: String,
    pub(crate) score: u32,
}

/// A score submission as received, before the required fields have been
/// checked
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct RawSubmission {
    name: Option<String>,
    score: Option<u32>,
}

impl TryFrom<RawSubmission> for ScoreSubmission {
    type Error = MissingFields;

    /// A score of zero is a valid score.  A name consisting only of
    /// whitespace counts as missing.
    fn try_from(value: RawSubmission) -> Result<ScoreSubmission, MissingFields> {
        match value {
            RawSubmission {
                name: Some(name),
                score: Some(score),
            } if !name.trim().is_empty() => Ok(ScoreSubmission { name, score }),
            _ => Err(MissingFields),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("name and score are required")]
pub(crate) struct MissingFields;

/// Successful response to a score submission
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct MessageBody {
    pub(crate) message: String,
}

/// Body of every non-2xx response from the score server
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}
