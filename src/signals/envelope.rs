//! Signal-envelope construction: watch-list parsing, the fixed price band and
//! the entry/exit window.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone};

use crate::models::signal::{Side, Signal};
use crate::services::market_data::PriceMap;

pub const DEFAULT_WATCHLIST: [&str; 3] = ["BTCUSDT", "ETHUSDT", "SOLUSDT"];
pub const DEFAULT_HORIZON_HOURS: f64 = 24.0;
pub const SIGNAL_WINDOW_HOURS: i64 = 24;

pub const TARGET_FACTOR: f64 = 1.02;
pub const STOP_LOSS_FACTOR: f64 = 0.98;

/// `yyyy-MM-dd HH:mm:ss`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Split a comma-separated watch-list, trimming entries and dropping blanks.
///
/// The default list applies only when the parameter is absent; an explicit
/// but empty parameter yields an empty watch-list.
pub fn parse_watchlist(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
    }
}

/// Hours horizon from the `h` query parameter; anything that is not a finite
/// number falls back to 24.
pub fn parse_horizon_hours(raw: Option<&str>) -> f64 {
    raw.and_then(|h| h.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite())
        .unwrap_or(DEFAULT_HORIZON_HOURS)
}

pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Entry, target and stop-loss for an optional price. A missing or zero price
/// zero-fills all three.
pub fn price_band(price: Option<f64>) -> (f64, f64, f64) {
    match price {
        Some(px) if px != 0.0 => (
            px,
            round6(px * TARGET_FACTOR),
            round6(px * STOP_LOSS_FACTOR),
        ),
        _ => (0.0, 0.0, 0.0),
    }
}

/// Formatted entry/exit timestamps, exactly 24 hours apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalWindow {
    pub entrada: String,
    pub saida: String,
}

impl SignalWindow {
    pub fn starting_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let exit = now.clone() + Duration::hours(SIGNAL_WINDOW_HOURS);
        Self {
            entrada: now.format(DATETIME_FORMAT).to_string(),
            saida: exit.format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// One BUY signal per watch-list symbol, in watch-list order.
pub fn build_signals(
    watchlist: &[String],
    prices: &PriceMap,
    window: &SignalWindow,
) -> Vec<Signal> {
    watchlist
        .iter()
        .map(|symbol| {
            let (entry, target, stop_loss) = price_band(prices.get(symbol).map(|p| p.price));
            Signal {
                symbol: symbol.clone(),
                side: Side::Buy,
                entry,
                target,
                stop_loss,
                entrada_datahora: window.entrada.clone(),
                saida_datahora: window.saida.clone(),
            }
        })
        .collect()
}

/// RFC 3339 with milliseconds and the zone's own offset.
pub fn iso_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.to_rfc3339_opts(SecondsFormat::Millis, false)
}
