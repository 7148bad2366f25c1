//! JSON responses and the error envelope

use crate::error::LookupError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            error: error.into(),
            detail,
        }
    }
}

/// Serialize `body` with an explicit UTF-8 JSON content type
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = (status, bytes).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
            response
        }
        Err(e) => {
            tracing::error!("Response serialization error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            LookupError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Query parameter is missing", None),
            ),
            LookupError::FetchFailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Could not fetch the search results page", Some(e.to_string())),
            ),
            LookupError::NoMatchFound => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Could not find a non-sponsored product", None),
            ),
            LookupError::Unexpected(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Unexpected failure", Some(message.clone())),
            ),
        };
        json(status, &body)
    }
}

/// Render a handler panic as the unexpected-failure envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!("Handler panicked: {}", message);
    LookupError::Unexpected(message).into_response()
}
