//! The score server: accepts finished games' scores and serves the top ten
mod store;
pub(crate) use self::store::{Database, ScoreStore, StoreError};
use crate::config::ServerConfig;
use crate::scores::protocol::{
    ErrorBody, LeaderboardEntry, MessageBody, MissingFields, RawSubmission, ScoreSubmission,
};
use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::error::Error as _;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub(crate) fn router(store: ScoreStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/api/score", post(submit_score))
        .route("/api/scores", get(list_scores))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Run the score server until interrupted with Ctrl-C
pub(crate) async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = ScoreStore::open(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database))?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind))?;
    info!(
        address = %listener.local_addr()?,
        database = %config.database,
        "Score server listening"
    );
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("score server failed")?;
    info!("Score server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C; shutting down");
    }
}

async fn submit_score(
    State(store): State<ScoreStore>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(raw) = payload?;
    let submission = ScoreSubmission::try_from(raw)?;
    store.insert(&submission).await?;
    info!(player = %submission.name, score = submission.score, "Score recorded");
    Ok(Json(MessageBody {
        message: String::from("Score saved."),
    }))
}

async fn list_scores(
    State(store): State<ScoreStore>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    Ok(Json(store.top().await?))
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("invalid request body: {0}")]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Missing(#[from] MissingFields),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Json(_) | ApiError::Missing(_) => {
                warn!(error = %self, "Rejected score submission");
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(ref e) => {
                error!(error = %e, cause = ?e.source(), "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Start a server backed by a fresh in-memory database on an ephemeral local
/// port and return its base URL
#[cfg(test)]
pub(crate) async fn spawn_test_server() -> String {
    let store = ScoreStore::open(&Database::Memory).await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router(store)).await });
    format!("http://{addr}")
}
