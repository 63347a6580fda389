#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use jobsearch_backend::{
    database::{pool::connect_in_memory, run_migrations},
    routes,
    utils::time::{Clock, FixedClock, SystemClock},
    AppState,
};
use serde_json::Value as JsonValue;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub async fn test_pool() -> SqlitePool {
    let pool = connect_in_memory().await.expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn test_state() -> AppState {
    AppState::new(test_pool().await, Arc::new(SystemClock))
}

pub async fn test_state_at(now: DateTime<Utc>) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now));
    AppState::new(test_pool().await, clock)
}

pub fn test_router(state: AppState) -> Router {
    routes::router(state, Duration::from_secs(5))
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}
