//! `GET /api/analise`: live prices mapped into a fixed 2% target / 2% stop band.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::{debug, error};

use super::{error_message, error_response, no_store_json, resolve_request_id, SignalQuery};
use crate::core::http::AppState;
use crate::error::Result;
use crate::models::signal::{
    AnalysisEnvelope, ErrorEnvelope, ANALYSIS_SCHEMA_VERSION, HORIZON_24H,
};
use crate::signals::{build_signals, iso_timestamp, parse_watchlist, SignalWindow};

pub async fn analise_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let request_id = resolve_request_id(&headers);
    let query = SignalQuery::from_pairs(pairs);

    match build_envelope(&state, &query, &request_id).await {
        Ok(envelope) => {
            debug!(
                request_id = %request_id,
                signals = envelope.signals.len(),
                "Analysis envelope built"
            );
            state
                .metrics
                .signals_emitted_total
                .with_label_values(&["analise"])
                .inc_by(envelope.signals.len() as u64);
            no_store_json(envelope)
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Analysis request failed");
            state
                .metrics
                .collaborator_failures_total
                .with_label_values(&["price_source"])
                .inc();
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope::new(ANALYSIS_SCHEMA_VERSION, request_id, error_message(&e)),
            )
        }
    }
}

async fn build_envelope(
    state: &AppState,
    query: &SignalQuery,
    request_id: &str,
) -> Result<AnalysisEnvelope> {
    let watchlist = parse_watchlist(query.watchlist.as_deref());

    let now = state.clock.now_brt();
    let window = SignalWindow::starting_at(&now);

    let prices = state.prices.fetch_live_prices(&watchlist).await?;
    let signals = build_signals(&watchlist, &prices, &window);

    Ok(AnalysisEnvelope {
        schema_version: ANALYSIS_SCHEMA_VERSION.to_string(),
        request_id: request_id.to_string(),
        generated_at: iso_timestamp(&state.clock.now_brt()),
        horizon: HORIZON_24H.to_string(),
        signals,
    })
}
