//! HTTP front end: `POST /api/rhyme`.
//!
//! The body is a JSON object with a string field `word`. The response is a
//! JSON array of rhymes, or `400 {"error": "Word is required"}` when the word
//! is missing, null or blank.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use rifma_core::{LookupError, RhymeService};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Request body for `POST /api/rhyme`.
#[derive(Debug, Default, Deserialize)]
pub struct RhymeRequest {
    /// Word to rhyme. `null` and absent are treated alike.
    #[serde(default)]
    pub word: Option<String>,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// The request carried no usable word.
    Lookup(LookupError),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Lookup(err) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Build the router with request tracing.
pub fn build_router(service: Arc<RhymeService>) -> Router {
    Router::new()
        .route("/api/rhyme", post(find_rhymes))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn find_rhymes(
    State(service): State<Arc<RhymeService>>,
    Json(request): Json<RhymeRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let word = request.word.unwrap_or_default();
    let report = service.lookup(&word)?;
    tracing::debug!(word = %report.word, count = report.count, "rhyme request served");
    Ok(Json(report.rhymes.clone()))
}
