//! Client configuration.
//!
//! Read from environment variables, with defaults matching a backend running
//! locally on port 5000:
//! - `TRACKER_API_URL` - base URL of the tracker API
//! - `TRACKER_PAGE_SIZE` - tasks per page, fixed for the session
//! - `TRACKER_REQUEST_TIMEOUT_SECS` - per-request timeout
//! - `TRACKER_INSPECTOR` - identity used when claiming tasks

use std::time::Duration;

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Placeholder claim identity until an authentication context exists.
pub const DEFAULT_INSPECTOR: &str = "Current User";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub inspector: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            inspector: DEFAULT_INSPECTOR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = var("TRACKER_API_URL") {
            config.api_base_url =
                Url::parse(&raw).with_context(|| format!("Invalid TRACKER_API_URL: {}", raw))?;
        }

        if let Some(raw) = var("TRACKER_PAGE_SIZE") {
            let page_size: u32 = raw
                .parse()
                .with_context(|| format!("Invalid TRACKER_PAGE_SIZE: {}", raw))?;
            if page_size == 0 {
                bail!("TRACKER_PAGE_SIZE must be at least 1");
            }
            config.page_size = page_size;
        }

        if let Some(raw) = var("TRACKER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("Invalid TRACKER_REQUEST_TIMEOUT_SECS: {}", raw))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(inspector) = var("TRACKER_INSPECTOR").filter(|s| !s.trim().is_empty()) {
            config.inspector = inspector;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:5000/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.inspector, "Current User");
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("TRACKER_API_URL", "https://tracker.example.com/api"),
            ("TRACKER_PAGE_SIZE", "25"),
            ("TRACKER_REQUEST_TIMEOUT_SECS", "5"),
            ("TRACKER_INSPECTOR", "Brad Sisk"),
        ])
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.inspector, "Brad Sisk");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(from_map(&[("TRACKER_PAGE_SIZE", "0")]).is_err());
        assert!(from_map(&[("TRACKER_PAGE_SIZE", "many")]).is_err());
        assert!(from_map(&[("TRACKER_API_URL", "not a url")]).is_err());
    }
}
