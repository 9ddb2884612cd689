//! External collaborators: prices, analysis and the clock

pub mod analysis;
pub mod binance;
pub mod clock;
pub mod market_data;

pub use analysis::{
    AnalysisSource, HttpAnalysisService, UltimateAnalysis, UltimateAnalysisRequest,
    UnconfiguredAnalysis,
};
pub use binance::BinancePriceSource;
pub use clock::{Clock, FixedClock, SystemClock};
pub use market_data::{LivePrice, PriceMap, PriceSource};

/// Upstream error bodies are cut to this many characters before they reach
/// an error message.
pub const ERROR_BODY_LIMIT: usize = 200;

/// Trimmed, length-capped rendition of an upstream error body.
pub fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
