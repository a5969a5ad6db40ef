use std::str::FromStr;
use std::time::Duration;

use resellbot_core::constants::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_METHOD_TIMEOUT_SECS, DEFAULT_TARGET_DAYS,
};
use resellbot_market_data::TraderaConfig;

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub tradera_enabled: bool,
    pub tradera_base_url: String,
    pub tradera_api_key: Option<String>,
    pub method_timeout: Duration,
    pub history_limit: usize,
    pub target_days: i64,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tradera_enabled: false,
            tradera_base_url: String::new(),
            tradera_api_key: None,
            method_timeout: Duration::from_secs(DEFAULT_METHOD_TIMEOUT_SECS),
            history_limit: DEFAULT_HISTORY_LIMIT,
            target_days: DEFAULT_TARGET_DAYS,
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Absent or unparsable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let method_timeout = parse_var::<u64, _>(&lookup, "RB_METHOD_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.method_timeout);

        Self {
            tradera_enabled: lookup("RB_TRADERA_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.tradera_enabled),
            tradera_base_url: lookup("RB_TRADERA_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.tradera_base_url),
            tradera_api_key: lookup("RB_TRADERA_API_KEY").filter(|v| !v.trim().is_empty()),
            method_timeout,
            history_limit: parse_var(&lookup, "RB_HISTORY_LIMIT")
                .unwrap_or(defaults.history_limit),
            target_days: parse_var(&lookup, "RB_TARGET_DAYS")
                .filter(|days: &i64| *days > 0)
                .unwrap_or(defaults.target_days),
            log_format: lookup("RB_LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    pub fn tradera_config(&self) -> TraderaConfig {
        TraderaConfig {
            enabled: self.tradera_enabled,
            base_url: self.tradera_base_url.clone(),
            api_key: self.tradera_api_key.clone(),
            timeout: self.method_timeout,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
