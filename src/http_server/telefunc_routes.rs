//! Telefunc HTTP Routes
//!
//! The telefunc URL answers GET and POST; `/health` reports call counters.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::observability::MetricsSnapshot;
use crate::server::{handle, Dispatcher, HttpRequest};
use crate::wire::HttpResponse;

// ==================
// Shared State
// ==================

/// State shared across telefunc handlers
pub struct TelefuncState {
    pub dispatcher: Dispatcher,
    pub telefunc_url: String,
}

impl TelefuncState {
    pub fn new(dispatcher: Dispatcher, telefunc_url: impl Into<String>) -> Self {
        Self {
            dispatcher,
            telefunc_url: telefunc_url.into(),
        }
    }
}

// ==================
// Routes
// ==================

/// Create the telefunc route at the configured URL
pub fn telefunc_routes(state: Arc<TelefuncState>) -> Router {
    let url = state.telefunc_url.clone();
    Router::new()
        .route(&url, get(telefunc_handler).post(telefunc_handler))
        .with_state(state)
}

/// Health route with call counters
pub fn health_routes(state: Arc<TelefuncState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn telefunc_handler(
    State(state): State<Arc<TelefuncState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Response {
    // A body that is not text is a malformed call, not a transport failure
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(err) => {
            let reason = format!("body is not valid UTF-8: {}", err);
            return telefunc_response(state.dispatcher.reject_malformed(&reason));
        }
    };

    let request = HttpRequest {
        url: uri.path().to_string(),
        method: method.as_str().to_string(),
        body,
    };

    match handle(&state.dispatcher, &state.telefunc_url, &request).await {
        Ok(response) => telefunc_response(response),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::NOT_FOUND);
            (status, err.to_string()).into_response()
        }
    }
}

fn telefunc_response(response: HttpResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, response.content_type)], response.body).into_response()
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub telefunctions: usize,
    pub calls: MetricsSnapshot,
}

async fn health_handler(State(state): State<Arc<TelefuncState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        telefunctions: state.dispatcher.telefunctions().len(),
        calls: state.dispatcher.metrics().snapshot(),
    };

    (StatusCode::OK, Json(response))
}
