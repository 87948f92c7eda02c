use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_API_KEY: &str = "rana-mock-key";

/// Longest span, in days between `start` and `end`, a summary may cover.
pub const MAX_SUMMARY_SPAN_DAYS: i64 = 31;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug)]
pub struct AppState {
    pub api_key: String,
    pub user: User,
}

pub type SharedState = Arc<AppState>;

/// Failures rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub enum MockError {
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            MockError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            MockError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Deserialize)]
pub struct SummaryParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state: SharedState = Arc::new(AppState {
        api_key: api_key.to_string(),
        user: User {
            id: Uuid::new_v4(),
            username: "mock".to_string(),
        },
    });
    Router::new()
        .route("/", get(index))
        .route("/api/v1/users/current", get(current_user))
        .route("/api/v1/users/current/summaries", get(summaries))
        .route("/api/v1/boom", get(boom))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

/// Check `Authorization: Basic base64(key)` against the configured key.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<(), MockError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MockError::Unauthorized("No token provided".to_string()))?;

    let key = header
        .strip_prefix("Basic ")
        .and_then(|payload| general_purpose::STANDARD.decode(payload).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match key {
        Some(key) if key == state.api_key => Ok(()),
        _ => Err(MockError::Unauthorized("Invalid API key".to_string())),
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, MockError> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| MockError::BadRequest("Invalid date format".to_string()))
}

/// One per-day summary. The mock records no activity, so totals are zero.
fn day_summary(date: NaiveDate) -> Value {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + chrono::Duration::seconds(23 * 3600 + 59 * 60 + 59);
    json!({
        "grand_total": { "total_seconds": 0 },
        "projects": [],
        "languages": [],
        "range": {
            "date": date.format("%Y-%m-%d").to_string(),
            "start": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "end": end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        },
    })
}

async fn index() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}

async fn current_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    authenticate(&state, &headers)?;
    Ok(Json(json!({ "data": state.user })))
}

async fn summaries(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Value>, MockError> {
    authenticate(&state, &headers)?;
    let start = parse_date(params.start.as_deref())?;
    let end = parse_date(params.end.as_deref())?;

    if start > end {
        return Err(MockError::BadRequest("Invalid date range.".to_string()));
    }
    let span = (end - start).num_days();
    if span > MAX_SUMMARY_SPAN_DAYS {
        return Err(MockError::BadRequest("Too many requested days.".to_string()));
    }

    debug!(%start, %end, "building summaries");
    let data: Vec<Value> = start.iter_days().take(span as usize + 1).map(day_summary).collect();
    info!(days = data.len(), "summaries served");

    Ok(Json(json!({
        "data": data,
        "start": start.format("%Y-%m-%d").to_string(),
        "end": end.format("%Y-%m-%d").to_string(),
    })))
}

async fn boom() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
