//! HTTP boundary for the decision engine.
//!
//! Translates JSON requests into engine calls and engine results (or typed
//! failures) back into JSON responses. The engine work is bounded and
//! synchronous, so handlers run it inline.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::engine;
use crate::engine::error::{EngineError, ErrorKind};
use crate::engine::models::{ErrorBody, GameStateRequest, PlayResponse};
use crate::engine::selector::{Decision, SelectionPolicy};

/// Shared, read-only server state.
#[derive(Clone)]
pub struct DominoServer {
    policy: Arc<SelectionPolicy>,
}

impl DominoServer {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/", post(play))
            .route("/jogar", post(play))
            .route("/health", get(health))
            .with_state(self)
    }
}

// --- Error translation ---

/// Failure surfaced to the client as `{"error", "status", "code"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let status = match err.kind() {
            ErrorKind::Client => StatusCode::BAD_REQUEST,
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            status: self.status.canonical_reason().unwrap_or_default().to_string(),
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

// --- Handlers ---

async fn play(
    State(server): State<DominoServer>,
    body: Bytes,
) -> Result<Json<PlayResponse>, ApiError> {
    let request: GameStateRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected undecodable request");
        ApiError::bad_request(format!("invalid request JSON: {}", e))
    })?;

    let decision = engine::decide(&request, &server.policy).map_err(|e| {
        tracing::warn!(kind = e.label(), error = %e, player = request.player, "rejected request");
        ApiError::from(e)
    })?;

    match &decision {
        Decision::Pass { player } => tracing::debug!(player, "pass"),
        Decision::Play { player, candidate } => tracing::debug!(
            player,
            bone = %format_args!("{:#}", candidate.bone),
            side = candidate.side.label(),
            "play"
        ),
    }

    Ok(Json(PlayResponse::from(&decision)))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
