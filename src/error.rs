use thiserror::Error;

/// Failures raised by the collaborators a handler calls.
///
/// `Display` is what ends up in the `error` field of the 500 envelope, so the
/// message-carrying variants render their message untouched.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("{0}")]
    PriceSource(String),

    #[error("{0}")]
    Analysis(String),

    #[error("analysis service is not configured")]
    AnalysisUnconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(String),
}

pub type Result<T, E = SignalError> = std::result::Result<T, E>;
