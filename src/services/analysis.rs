//! Upstream "ultimate" analysis collaborator.
//!
//! The handler treats the result as opaque: whatever `signals` array comes
//! back is forwarded to the client as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::services::body_excerpt;
use crate::error::{Result, SignalError};

/// Minimum score the analysis service must require of a signal
pub const REQUIRE_MIN_SCORE: f64 = 8.5;
/// Minimum probability the analysis service must require of a signal
pub const REQUIRE_PROB: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UltimateAnalysisRequest {
    pub watchlist: Vec<String>,
    #[serde(rename = "nowISO")]
    pub now_iso: String,
    pub horizon_hours: f64,
    pub require_min_score: f64,
    pub require_prob: f64,
}

impl UltimateAnalysisRequest {
    /// Request with the fixed score/probability thresholds.
    pub fn new(watchlist: Vec<String>, now_iso: String, horizon_hours: f64) -> Self {
        Self {
            watchlist,
            now_iso,
            horizon_hours,
            require_min_score: REQUIRE_MIN_SCORE,
            require_prob: REQUIRE_PROB,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UltimateAnalysis {
    /// Absent or `null` both read as no signals.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub signals: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn run_ultimate_analysis(
        &self,
        request: UltimateAnalysisRequest,
    ) -> Result<UltimateAnalysis>;
}

/// Posts the request as JSON to a remote analysis endpoint.
pub struct HttpAnalysisService {
    url: String,
    api_key: Option<String>,
    http: Client,
}

impl HttpAnalysisService {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(url, api_key, Client::new())
    }

    pub fn with_client(url: impl Into<String>, api_key: Option<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            api_key,
            http,
        }
    }
}

#[async_trait]
impl AnalysisSource for HttpAnalysisService {
    async fn run_ultimate_analysis(
        &self,
        request: UltimateAnalysisRequest,
    ) -> Result<UltimateAnalysis> {
        let mut builder = self.http.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SignalError::Analysis(format!(
                "analysis service HTTP {status}: {}",
                body_excerpt(&body)
            )));
        }

        let analysis: UltimateAnalysis =
            serde_json::from_str(&body).map_err(|e| SignalError::Decode(e.to_string()))?;
        debug!(
            signals = analysis.signals.len(),
            "Analysis service returned signals"
        );
        Ok(analysis)
    }
}

/// Stand-in used when no analysis URL is configured; every call fails.
pub struct UnconfiguredAnalysis;

#[async_trait]
impl AnalysisSource for UnconfiguredAnalysis {
    async fn run_ultimate_analysis(
        &self,
        _request: UltimateAnalysisRequest,
    ) -> Result<UltimateAnalysis> {
        Err(SignalError::AnalysisUnconfigured)
    }
}
