//! High-score HTTP service
//!
//! Keeps the table in memory; restarting the service empties it.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::types::HIGH_SCORE_LIMIT;

pub const DEFAULT_SERVER_PORT: u16 = 420;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_SERVER_PORT)),
        }
    }
}

impl ServerConfig {
    /// Read `BLOCKFALL_SERVER_ADDR`, then `BLOCKFALL_SERVER_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(addr) = get_env("BLOCKFALL_SERVER_ADDR").and_then(|v| v.trim().parse().ok()) {
            return Self { addr };
        }

        if let Some(port) = get_env("BLOCKFALL_SERVER_PORT").and_then(|v| v.trim().parse::<u16>().ok())
        {
            return Self {
                addr: SocketAddr::from(([0, 0, 0, 0], port)),
            };
        }

        Self::default()
    }
}

/// Stored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScore {
    pub id: u64,
    pub initials: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

/// Top-N table, highest score first, earlier submission first on ties.
#[derive(Debug, Default)]
pub struct HighScoreTable {
    entries: Vec<StoredScore>,
    next_id: u64,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Vec<StoredScore> {
        self.entries.clone()
    }

    /// Whether `score` would enter the table
    pub fn qualifies(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= HIGH_SCORE_LIMIT => score > lowest.score,
            _ => true,
        }
    }

    /// Store the submission if it qualifies. Returns whether it was stored.
    pub fn submit(&mut self, initials: &str, score: u32, timestamp: DateTime<Utc>) -> bool {
        if !self.qualifies(score) {
            return false;
        }

        self.next_id += 1;
        let entry = StoredScore {
            id: self.next_id,
            initials: initials.to_string(),
            score,
            timestamp,
        };

        // Insert after every entry with an equal or higher score.
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(at, entry);
        self.entries.truncate(HIGH_SCORE_LIMIT);
        true
    }
}

/// Shared handler state
#[derive(Clone, Default)]
pub struct AppState {
    table: Arc<RwLock<HighScoreTable>>,
}

impl AppState {
    pub fn new(table: HighScoreTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    initials: Option<String>,
    score: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn invalid_input() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "Invalid input",
        }),
    )
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/submit_score", post(submit_score))
        .route("/get_high_scores", get(get_high_scores))
        .with_state(state)
        .layer(cors)
}

async fn get_high_scores(State(state): State<AppState>) -> Json<Vec<StoredScore>> {
    Json(state.table.read().await.top())
}

async fn submit_score(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<Vec<StoredScore>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log::debug!("rejected submission body: {}", rejection);
        invalid_input()
    })?;

    // Only absent or empty initials are invalid; blanks are stored as sent.
    let initials = request.initials.filter(|s| !s.is_empty());
    let score = request.score.filter(|&s| s > 0);
    let (Some(initials), Some(score)) = (initials, score) else {
        return Err(invalid_input());
    };

    let mut table = state.table.write().await;
    if table.submit(&initials, score, Utc::now()) {
        log::info!("stored {} for {}", score, initials);
    }
    Ok(Json(table.top()))
}

/// Serve on an already bound listener until the task is dropped.
pub async fn serve_on(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

/// Bind the configured address and serve forever.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.addr).await?;
    log::info!("leaderboard listening on http://{}", listener.local_addr()?);
    serve_on(listener, AppState::default()).await?;
    Ok(())
}
