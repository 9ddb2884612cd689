//! HTTP endpoint server using Axum

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::api::{analise::analise_handler, ultimate::ultimate_handler};
use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::services::{
    AnalysisSource, BinancePriceSource, Clock, HttpAnalysisService, PriceSource, SystemClock,
    UnconfiguredAnalysis,
};

pub const SERVICE_NAME: &str = "lucra-signals";
pub const RUNTIME_HEADER: HeaderName = HeaderName::from_static("x-runtime-ms");
/// Endpoint label for requests no route matched
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Per-process handles shared by every request. Nothing in here is mutated
/// while serving.
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<dyn PriceSource>,
    pub analysis: Arc<dyn AnalysisSource>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    /// `LUCRA_ULTIMATE` resolved at startup
    pub ultimate_enabled: bool,
}

impl AppState {
    /// Wire the production collaborators described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, prometheus::Error> {
        let analysis: Arc<dyn AnalysisSource> = match &config.analysis_url {
            Some(url) => Arc::new(HttpAnalysisService::new(
                url.clone(),
                config.analysis_api_key.clone(),
            )),
            None => Arc::new(UnconfiguredAnalysis),
        };

        Ok(Self {
            prices: Arc::new(BinancePriceSource::new(config.binance_base_url.clone())),
            analysis,
            clock: Arc::new(SystemClock),
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            ultimate_enabled: config.ultimate_enabled,
        })
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": SERVICE_NAME
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Counts and times every request by matched route; the raw path is only
/// logged so arbitrary URLs cannot grow the label set.
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let duration = start.elapsed();
    let status = response.status();
    state
        .metrics
        .http_requests_total
        .with_label_values(&[endpoint.as_str(), status.as_str()])
        .inc();
    state
        .metrics
        .http_request_duration_seconds
        .with_label_values(&[endpoint.as_str()])
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            endpoint = %endpoint,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Stamps `x-runtime-ms` on every response that passes through, whatever
/// the handler returned.
async fn runtime_header(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    response
        .headers_mut()
        .insert(RUNTIME_HEADER, HeaderValue::from(elapsed_ms));
    response
}

/// `/api/analise` and `/api/ultimate`
pub fn signal_router() -> Router<AppState> {
    Router::new()
        .route("/api/analise", get(analise_handler))
        .route("/api/ultimate", get(ultimate_handler))
        .route_layer(middleware::from_fn(runtime_header))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .merge(signal_router())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Signal endpoints: http://0.0.0.0:{}/api/analise, http://0.0.0.0:{}/api/ultimate",
        port, port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
