//! `GET /api/ultimate`: feature-gated pass-through of the analysis service.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, error, warn};

use super::{error_message, error_response, no_store_json, resolve_request_id, SignalQuery};
use crate::core::http::AppState;
use crate::error::Result;
use crate::models::signal::{
    ErrorEnvelope, UltimateEnvelope, HORIZON_24H, ULTIMATE_SCHEMA_VERSION,
};
use crate::services::analysis::UltimateAnalysisRequest;
use crate::signals::{iso_timestamp, parse_horizon_hours, parse_watchlist};

pub const ULTIMATE_DISABLED: &str = "ultimate_disabled";

/// Enabled by configuration or per request with `?ultimate=1`.
pub fn ultimate_enabled(configured: bool, query: &SignalQuery) -> bool {
    configured || query.ultimate.as_deref() == Some("1")
}

pub async fn ultimate_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let request_id = resolve_request_id(&headers);
    let query = SignalQuery::from_pairs(pairs);

    if !ultimate_enabled(state.ultimate_enabled, &query) {
        warn!(request_id = %request_id, "Ultimate endpoint disabled");
        return error_response(
            StatusCode::FORBIDDEN,
            ErrorEnvelope::new(ULTIMATE_SCHEMA_VERSION, request_id, ULTIMATE_DISABLED),
        );
    }

    match build_envelope(&state, &query, &request_id).await {
        Ok(envelope) => {
            debug!(
                request_id = %request_id,
                signals = envelope.signals.len(),
                "Ultimate envelope built"
            );
            state
                .metrics
                .signals_emitted_total
                .with_label_values(&["ultimate"])
                .inc_by(envelope.signals.len() as u64);
            no_store_json(envelope)
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Ultimate analysis failed");
            state
                .metrics
                .collaborator_failures_total
                .with_label_values(&["analysis"])
                .inc();
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope::new(ULTIMATE_SCHEMA_VERSION, request_id, error_message(&e)),
            )
        }
    }
}

async fn build_envelope(
    state: &AppState,
    query: &SignalQuery,
    request_id: &str,
) -> Result<UltimateEnvelope> {
    let watchlist = parse_watchlist(query.watchlist.as_deref());
    let horizon_hours = parse_horizon_hours(query.h.as_deref());
    let now = state.clock.now_brt();

    let analysis = state
        .analysis
        .run_ultimate_analysis(UltimateAnalysisRequest::new(
            watchlist,
            iso_timestamp(&now),
            horizon_hours,
        ))
        .await?;

    Ok(UltimateEnvelope {
        schema_version: ULTIMATE_SCHEMA_VERSION.to_string(),
        request_id: request_id.to_string(),
        generated_at: iso_timestamp(&state.clock.now_brt()),
        horizon: HORIZON_24H.to_string(),
        ultimate: true,
        signals: analysis.signals,
    })
}
