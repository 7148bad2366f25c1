//! HTTP request handlers

use super::response::json;
use super::state::AppState;
use crate::error::LookupError;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Query parameter carrying the product search
const QUERY_PARAM: &str = "query";

/// Price lookup handler
///
/// Repeated `query` parameters are allowed; the first one is used.
pub async fn get_price(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match params {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .find(|(key, _)| key == QUERY_PARAM)
            .map(|(_, value)| value),
        Err(e) => {
            tracing::debug!("Rejected query string: {}", e);
            None
        }
    };

    let query = match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return LookupError::MissingQuery.into_response(),
    };

    match state.lookup.lookup(&query).await {
        Ok(product) => json(StatusCode::OK, &product),
        Err(e) => e.into_response(),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
