//! Test utilities for API server integration tests

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use lucra::core::http::{create_router, AppState};
use lucra::error::{Result, SignalError};
use lucra::metrics::Metrics;
use lucra::services::{
    AnalysisSource, FixedClock, LivePrice, PriceMap, PriceSource, UltimateAnalysis,
    UltimateAnalysisRequest,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// 2025-01-15 12:30:00 in Sao Paulo (UTC-3)
pub fn fixed_instant() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 15, 30, 0).unwrap()
}

pub struct MockPriceSource {
    prices: PriceMap,
    failure: Option<String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
}

#[allow(dead_code)]
impl MockPriceSource {
    pub fn with_prices(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), LivePrice { price: *price }))
                .collect(),
            failure: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_prices(&[])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<Vec<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_live_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(symbols.to_vec());
        match &self.failure {
            Some(message) => Err(SignalError::PriceSource(message.clone())),
            None => Ok(self.prices.clone()),
        }
    }
}

pub struct MockAnalysis {
    signals: Vec<Value>,
    failure: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<UltimateAnalysisRequest>>,
}

#[allow(dead_code)]
impl MockAnalysis {
    pub fn returning(signals: Vec<Value>) -> Self {
        Self {
            signals,
            failure: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::returning(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<UltimateAnalysisRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisSource for MockAnalysis {
    async fn run_ultimate_analysis(
        &self,
        request: UltimateAnalysisRequest,
    ) -> Result<UltimateAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.failure {
            Some(message) => Err(SignalError::Analysis(message.clone())),
            None => Ok(UltimateAnalysis {
                signals: self.signals.clone(),
            }),
        }
    }
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub prices: Arc<MockPriceSource>,
    pub analysis: Arc<MockAnalysis>,
}

#[allow(dead_code)]
impl TestApiServer {
    pub async fn new() -> Self {
        Self::with_mocks(
            MockPriceSource::with_prices(&[("BTCUSDT", 100.0)]),
            MockAnalysis::returning(Vec::new()),
            false,
        )
        .await
    }

    pub async fn with_mocks(
        prices: MockPriceSource,
        analysis: MockAnalysis,
        ultimate_enabled: bool,
    ) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let prices = Arc::new(prices);
        let analysis = Arc::new(analysis);

        let state = AppState {
            prices: prices.clone(),
            analysis: analysis.clone(),
            clock: Arc::new(FixedClock(fixed_instant())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            ultimate_enabled,
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            prices,
            analysis,
        }
    }
}
