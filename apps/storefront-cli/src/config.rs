//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use storefront_core::domain::DEFAULT_PAGE_LIMIT;
use storefront_infra::{FileSessionStore, HttpClientConfig};

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    /// `None` disables the request timeout.
    pub http_timeout: Option<Duration>,
    pub page_limit: u32,
    /// Where the session is persisted. `None` when the platform has no config dir.
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let http_timeout = match lookup("HTTP_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        Self {
            api_url: lookup("API_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout,
            page_limit: lookup("PAGE_LIMIT")
                .and_then(|s| s.trim().parse().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_PAGE_LIMIT),
            session_file: lookup("SESSION_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .or_else(FileSessionStore::default_path),
        }
    }

    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.api_url.clone(),
            timeout: self.http_timeout,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.session_file, FileSessionStore::default_path());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("API_URL", "https://api.example.com"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("PAGE_LIMIT", "25"),
            ("SESSION_FILE", "/tmp/storefront-session.json"),
        ]);
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.page_limit, 25);
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/storefront-session.json"))
        );
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        assert_eq!(config(&[("HTTP_TIMEOUT_SECS", "0")]).http_timeout, None);
    }

    #[test]
    fn test_unusable_values_fall_back() {
        let config = config(&[
            ("API_URL", "  "),
            ("HTTP_TIMEOUT_SECS", "soon"),
            ("PAGE_LIMIT", "0"),
        ]);
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.page_limit, 10);
    }

    #[test]
    fn test_http_client_config_carries_url_and_timeout() {
        let http = config(&[("API_URL", "https://api.example.com"), ("HTTP_TIMEOUT_SECS", "0")])
            .http_client_config();
        assert_eq!(http.base_url, "https://api.example.com");
        assert_eq!(http.timeout, None);
    }
}
