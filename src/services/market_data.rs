//! Live price collaborator interface.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LivePrice {
    pub price: f64,
}

/// Symbol → price. Symbols the source does not know are absent.
pub type PriceMap = HashMap<String, LivePrice>;

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch current prices for every symbol in one call.
    async fn fetch_live_prices(&self, symbols: &[String]) -> Result<PriceMap>;
}
