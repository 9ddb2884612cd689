//! Signal endpoints and the request plumbing they share.

pub mod analise;
pub mod ultimate;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::SignalError;
use crate::models::signal::ErrorEnvelope;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const INTERNAL_ERROR: &str = "internal_error";

/// Query parameters accepted by the signal endpoints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignalQuery {
    pub watchlist: Option<String>,
    /// Horizon in hours (ultimate only)
    pub h: Option<String>,
    /// `1` enables the ultimate endpoint for this request
    pub ultimate: Option<String>,
}

impl SignalQuery {
    /// Build from raw query pairs. A key given more than once counts as
    /// absent, so `?watchlist=A&watchlist=B` falls back to the default list.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }

        let mut single = |key: &str| match values.remove(key) {
            Some(mut v) if v.len() == 1 => v.pop(),
            _ => None,
        };

        Self {
            watchlist: single("watchlist"),
            h: single("h"),
            ultimate: single("ultimate"),
        }
    }
}

/// Inbound `x-request-id` when present, otherwise a fresh random token.
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id)
}

pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Failure message for the error envelope.
pub fn error_message(err: &SignalError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        INTERNAL_ERROR.to_string()
    } else {
        message
    }
}

/// 200 with `Cache-Control: no-store`.
pub(crate) fn no_store_json<T: Serialize>(payload: T) -> Response {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(payload),
    )
        .into_response()
}

pub(crate) fn error_response(status: StatusCode, body: ErrorEnvelope) -> Response {
    (status, Json(body)).into_response()
}
