//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{self, EventRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InvestorEventsResponse {
    pub investor: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(e: IndexerError) -> Response {
    error!("API query failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns every indexed event for the campaign.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (StatusCode::OK, Json(AllEventsResponse { count, events })).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /investors/:address/events`
pub async fn get_investor_events(
    State(state): State<Arc<ApiState>>,
    Path(investor): Path<String>,
) -> Response {
    match db::get_events_for_investor(&state.pool, &investor).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(InvestorEventsResponse {
                    investor,
                    count,
                    events,
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /investors/:address/summary`
///
/// Totals invested, claimed and refunded for one investor. An address with no
/// events gets an all-zero summary rather than a 404.
pub async fn get_investor_summary(
    State(state): State<Arc<ApiState>>,
    Path(investor): Path<String>,
) -> Response {
    match db::get_events_for_investor(&state.pool, &investor).await {
        Ok(records) => (
            StatusCode::OK,
            Json(events::summarize(&investor, &records)),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}
