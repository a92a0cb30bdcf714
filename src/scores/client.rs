//! HTTP client for the score server
use super::protocol::{ErrorBody, LeaderboardEntry, MessageBody, ScoreSubmission};
use bytes::Bytes;
use http::{header, Method, Request, StatusCode, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug)]
pub(crate) struct ScoreClient {
    client: Client<HttpConnector, Full<Bytes>>,

    /// Server URL with any trailing slashes removed
    base: String,

    timeout: Option<Duration>,
}

impl ScoreClient {
    /// Create a client for the score server at `base_url` (e.g.,
    /// `http://127.0.0.1:3000`).  If `timeout` is set, requests taking longer
    /// than that fail with [`ClientError::Timeout`].
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<ScoreClient, ClientError> {
        let base = base_url.trim_end_matches('/');
        let uri = base
            .parse::<Uri>()
            .map_err(|e| ClientError::InvalidUrl(base_url.to_owned(), e))?;
        if uri.scheme() != Some(&http::uri::Scheme::HTTP) || uri.host().is_none() {
            return Err(ClientError::UnsupportedUrl(base_url.to_owned()));
        }
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Ok(ScoreClient {
            client,
            base: base.to_owned(),
            timeout,
        })
    }

    /// `POST /api/score`
    pub(crate) async fn submit(&self, submission: &ScoreSubmission) -> Result<(), ClientError> {
        let body = serde_json::to_vec(submission).map_err(ClientError::Encode)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{}/api/score", self.base))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;
        let _: MessageBody = self.send(req).await?;
        Ok(())
    }

    /// `GET /api/scores`
    pub(crate) async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(format!("{}/api/scores", self.base))
            .body(Full::new(Bytes::new()))?;
        self.send(req).await
    }

    /// Perform `req` and deserialize the JSON body of a successful response
    async fn send<T: DeserializeOwned>(&self, req: Request<Full<Bytes>>) -> Result<T, ClientError> {
        let fut = self.exchange(req);
        let (status, body) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ClientError::Timeout)??,
            None => fut.await?,
        };
        if status.is_success() {
            serde_json::from_slice(&body).map_err(ClientError::Decode)
        } else {
            let message = serde_json::from_slice::<ErrorBody>(&body).map_or_else(
                |_| String::from_utf8_lossy(&body).into_owned(),
                |eb| eb.error,
            );
            Err(ClientError::Status { status, message })
        }
    }

    async fn exchange(&self, req: Request<Full<Bytes>>) -> Result<(StatusCode, Bytes), ClientError> {
        let resp = self.client.request(req).await.map_err(ClientError::Connect)?;
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(ClientError::Body)?
            .to_bytes();
        Ok((status, body))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ClientError {
    #[error("invalid server URL {0:?}")]
    InvalidUrl(String, #[source] http::uri::InvalidUri),
    #[error("server URL {0:?} is not an http:// URL with a host")]
    UnsupportedUrl(String),
    #[error("failed to build request")]
    Request(#[from] http::Error),
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
    #[error("could not reach score server")]
    Connect(#[source] hyper_util::client::legacy::Error),
    #[error("failed to read response from score server")]
    Body(#[source] hyper::Error),
    #[error("score server did not respond in time")]
    Timeout,
    #[error("score server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("score server sent a malformed response")]
    Decode(#[source] serde_json::Error),
}
