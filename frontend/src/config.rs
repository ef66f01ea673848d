//! Build-time configuration
//!
//! A browser bundle has no process environment, so values are baked in
//! when the crate is compiled (`MERQ_API_URL=... trunk build`).

use std::str::FromStr;
use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST backend root, without trailing slash
    pub api_base_url: String,
    /// Maximum level forwarded to the browser console
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("MERQ_API_URL"), option_env!("MERQ_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level
            .and_then(|raw| Level::from_str(raw.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(AppConfig::from_values(None, None), AppConfig::default());
        assert_eq!(
            AppConfig::from_values(Some("  "), Some("loud")),
            AppConfig::default()
        );
    }

    #[test]
    fn explicit_values_are_normalized() {
        let config = AppConfig::from_values(Some("https://api.merq.dev/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.merq.dev");
        assert_eq!(config.log_level, Level::DEBUG);
    }
}
