//! Environment-driven configuration for the backend API client.

use std::time::Duration;

/// Base URL used when `FAMLEDGER_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token sent on every request, if any.
    pub access_token: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Loads `.env` (if present) and reads `FAMLEDGER_API_URL`,
    /// `FAMLEDGER_API_TOKEN` and `FAMLEDGER_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FAMLEDGER_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let access_token = lookup("FAMLEDGER_API_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        let timeout_ms: u64 = lookup("FAMLEDGER_REQUEST_TIMEOUT_MS")
            .and_then(|ms| ms.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("FAMLEDGER_API_URL", "https://ledger.example.com/api/"),
            ("FAMLEDGER_API_TOKEN", "abc"),
            ("FAMLEDGER_REQUEST_TIMEOUT_MS", "5000"),
        ]));
        assert_eq!(config.base_url, "https://ledger.example.com/api");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("FAMLEDGER_REQUEST_TIMEOUT_MS", "soon"),
            ("FAMLEDGER_API_TOKEN", "  "),
        ]));
        assert_eq!(config.request_timeout, Duration::from_millis(30_000));
        assert_eq!(config.access_token, None);
    }
}
