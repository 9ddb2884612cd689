//! Environment-driven configuration
//!
//! Everything is read once at startup and injected into the router state;
//! handlers never consult the process environment.

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

/// Interpret a boolean-ish environment string. Only `true` (any case,
/// surrounding whitespace ignored) counts; `1`, `yes` and friends do not.
pub fn is_truthy(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// `LUCRA_ULTIMATE` as read from the environment; unset means off.
pub fn ultimate_flag(raw: Option<&str>) -> bool {
    raw.map(is_truthy).unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Process-wide gate for `/api/ultimate` (`LUCRA_ULTIMATE`)
    pub ultimate_enabled: bool,
    pub binance_base_url: String,
    pub analysis_url: Option<String>,
    pub analysis_api_key: Option<String>,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            ultimate_enabled: false,
            binance_base_url: DEFAULT_BINANCE_BASE_URL.to_string(),
            analysis_url: None,
            analysis_api_key: None,
            environment: "sandbox".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let ultimate_enabled = ultimate_flag(env::var("LUCRA_ULTIMATE").ok().as_deref());

        let binance_base_url = optional_env("BINANCE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BINANCE_BASE_URL.to_string());

        Self {
            port,
            ultimate_enabled,
            binance_base_url,
            analysis_url: optional_env("LUCRA_ANALYSIS_URL"),
            analysis_api_key: optional_env("LUCRA_ANALYSIS_API_KEY"),
            environment: get_environment(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
