//! Shared data models for the signal envelopes.

pub mod signal;

pub use signal::{
    AnalysisEnvelope, ErrorEnvelope, Side, Signal, UltimateEnvelope, ANALYSIS_SCHEMA_VERSION,
    HORIZON_24H, ULTIMATE_SCHEMA_VERSION,
};
