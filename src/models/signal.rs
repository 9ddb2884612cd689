//! Signal records and the JSON envelopes that carry them

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ANALYSIS_SCHEMA_VERSION: &str = "1.0.0";
pub const ULTIMATE_SCHEMA_VERSION: &str = "2.0.0";
pub const HORIZON_24H: &str = "24h";

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// One entry of the analysis envelope.
///
/// Timestamps are local America/Sao_Paulo wall-clock strings
/// (`yyyy-MM-dd HH:mm:ss`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub side: Side,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
    pub entrada_datahora: String,
    pub saida_datahora: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub schema_version: String,
    pub request_id: String,
    pub generated_at: String,
    pub horizon: String,
    pub signals: Vec<Signal>,
}

/// Envelope for `/api/ultimate`; `signals` is whatever the analysis service
/// produced, untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateEnvelope {
    pub schema_version: String,
    pub request_id: String,
    pub generated_at: String,
    pub horizon: String,
    pub ultimate: bool,
    pub signals: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub schema_version: String,
    pub request_id: String,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(
        schema_version: &str,
        request_id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: schema_version.to_string(),
            request_id: request_id.into(),
            error: error.into(),
        }
    }
}
