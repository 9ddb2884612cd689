//! Binance spot REST price source

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{Result, SignalError};
use crate::services::body_excerpt;
use crate::services::market_data::{LivePrice, PriceMap, PriceSource};

const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";
const USER_AGENT: &str = "LucraLive/1.3 (+https://lucra.local)";

/// Reads the full `ticker/price` snapshot once per call and picks out the
/// requested symbols.
pub struct BinancePriceSource {
    base_url: String,
    http: Client,
}

impl BinancePriceSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn all_prices(&self) -> Result<HashMap<String, f64>> {
        let url = format!("{}{}", self.base_url, TICKER_PRICE_PATH);
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SignalError::PriceSource(format!(
                "Binance HTTP {status}: {}",
                body_excerpt(&body)
            )));
        }

        let tickers: Vec<PriceTicker> =
            serde_json::from_str(&body).map_err(|e| SignalError::Decode(e.to_string()))?;

        let mut prices = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            match ticker.price.parse::<f64>() {
                Ok(price) => {
                    prices.insert(ticker.symbol.to_uppercase(), price);
                }
                Err(e) => {
                    warn!(symbol = %ticker.symbol, error = %e, "Skipping unparseable ticker price");
                }
            }
        }
        Ok(prices)
    }
}

#[async_trait]
impl PriceSource for BinancePriceSource {
    async fn fetch_live_prices(&self, symbols: &[String]) -> Result<PriceMap> {
        let all = self.all_prices().await?;

        let found: PriceMap = symbols
            .iter()
            .filter_map(|symbol| {
                all.get(&symbol.to_uppercase())
                    .map(|&price| (symbol.clone(), LivePrice { price }))
            })
            .collect();

        debug!(
            requested = symbols.len(),
            found = found.len(),
            "Resolved live prices from Binance"
        );
        Ok(found)
    }
}

#[derive(Deserialize)]
struct PriceTicker {
    symbol: String,
    price: String,
}
