use crate::consts::LEADERBOARD_SIZE;
use crate::scores::protocol::{LeaderboardEntry, ScoreSubmission};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_name TEXT NOT NULL,
    score INTEGER NOT NULL
)";

/// Where the server keeps its scores
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Database {
    /// A private in-memory database, lost when the server exits
    Memory,
    File(PathBuf),
}

impl Database {
    pub(crate) const MEMORY_NAME: &'static str = ":memory:";
}

impl From<String> for Database {
    fn from(s: String) -> Database {
        if s == Database::MEMORY_NAME {
            Database::Memory
        } else {
            Database::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::Memory => write!(f, "{}", Database::MEMORY_NAME),
            Database::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Append-only store of submitted scores
#[derive(Clone, Debug)]
pub(crate) struct ScoreStore {
    pool: SqlitePool,
}

impl ScoreStore {
    /// Open (creating if necessary) the score database and make sure the
    /// `scores` table exists
    pub(crate) async fn open(database: &Database) -> Result<ScoreStore, StoreError> {
        let pool = match database {
            // Every connection to `:memory:` gets its own database, so the
            // pool must hold on to exactly one connection for good.
            Database::Memory => {
                let options = Database::MEMORY_NAME
                    .parse::<SqliteConnectOptions>()
                    .map_err(StoreError::Open)?;
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
                    .map_err(StoreError::Open)?
            }
            Database::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs_err::create_dir_all(parent).map_err(StoreError::Mkdir)?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .connect_with(options)
                    .await
                    .map_err(StoreError::Open)?
            }
        };
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(StoreError::Init)?;
        Ok(ScoreStore { pool })
    }

    pub(crate) async fn insert(&self, submission: &ScoreSubmission) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO scores (player_name, score) VALUES (?, ?)")
            .bind(&submission.name)
            .bind(i64::from(submission.score))
            .execute(&self.pool)
            .await
            .map_err(StoreError::Insert)?;
        Ok(())
    }

    /// Return the highest scores, best first.  Equal scores are listed in
    /// the order they were submitted.
    pub(crate) async fn top(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT player_name, score FROM scores ORDER BY score DESC, id ASC LIMIT ?",
        )
        .bind(i64::from(LEADERBOARD_SIZE))
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)?;
        rows.into_iter()
            .map(|(player_name, score)| {
                let score = u32::try_from(score).map_err(|_| StoreError::BadScore(score))?;
                Ok(LeaderboardEntry { player_name, score })
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to create database directory")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to open score database")]
    Open(#[source] sqlx::Error),
    #[error("failed to create score table")]
    Init(#[source] sqlx::Error),
    #[error("failed to record score")]
    Insert(#[source] sqlx::Error),
    #[error("failed to query leaderboard")]
    Query(#[source] sqlx::Error),
    #[error("stored score {0} is out of range")]
    BadScore(i64),
}
