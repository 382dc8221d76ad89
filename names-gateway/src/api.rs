pub use crate::data::data_handler;

use crate::state::AppState;
use crate::warehouse::WarehouseError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/columns", get(columns_handler))
        .route("/api/data", get(data_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn health_handler() -> impl IntoResponse {
    // Simple readiness/health endpoint. Must answer even with the warehouse down.
    Json(json!({ "status": "healthy", "message": "USA Names API is running" }))
}

pub async fn columns_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "columns": [
            { "name": "gender", "type": "string", "description": "Gender of the person" },
            { "name": "state", "type": "string", "description": "State where the name was recorded" },
            { "name": "year", "type": "integer", "description": "Year of the record" },
            { "name": "name", "type": "string", "description": "Name of the person" }
        ]
    }))
}

/// Errors surfaced to API clients. Every variant renders as the uniform
/// `{"status":"error","message":...}` envelope; the HTTP status carries the
/// failure class: 400 for rejected filters, 502 when the warehouse cannot be
/// reached, 500 when it rejects the query or returns malformed rows.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::Warehouse(WarehouseError::Unreachable(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Warehouse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "status": "error", "message": self.to_string() }));
        (status, body).into_response()
    }
}
