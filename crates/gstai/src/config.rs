//! Client configuration: API key, endpoint selection, timeouts

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{GstaiError, Result};

/// Which GSTAI environment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Sandbox,
}

impl Environment {
    /// Default base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.gstai.in/v1",
            Environment::Sandbox => "https://sandbox.gstai.in/v1",
        }
    }
}

/// Configuration for a [`crate::Client`]
///
/// The API key is required and must carry a `sk_live_` or `sk_test_` prefix.
/// Everything else has defaults matching the hosted service: production
/// endpoint, 30 second call timeout, 5 minute upload timeout.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub upload_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Environment::Production.base_url().to_string(),
            timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300),
            user_agent: format!("gstai-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new Config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Build a Config from environment variables
    ///
    /// Reads `GSTAI_API_KEY` (required), `GSTAI_BASE_URL`,
    /// `GSTAI_TIMEOUT_SECS` and `GSTAI_UPLOAD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GSTAI_API_KEY")
            .map_err(|_| GstaiError::Configuration("GSTAI_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(url) = env::var("GSTAI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = env::var("GSTAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env::var("GSTAI_UPLOAD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.upload_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Point the client at an environment's default endpoint
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Override the base URL entirely
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout used for file uploads
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Check that the configuration can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GstaiError::Configuration("API key is empty".to_string()));
        }
        if !self.api_key.starts_with("sk_live_") && !self.api_key.starts_with("sk_test_") {
            return Err(GstaiError::Configuration(
                "API key must start with sk_live_ or sk_test_".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(GstaiError::Configuration("Base URL is empty".to_string()));
        }
        Ok(())
    }

    /// The API key with its secret portion masked, safe for logs
    pub fn redacted_key(&self) -> String {
        redact_key(&self.api_key)
    }
}

// Keys never appear whole in Debug output or logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.redacted_key())
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Mask the secret portion of an API key, keeping the mode prefix and the
/// last four characters for correlation
pub(crate) fn redact_key(key: &str) -> String {
    let prefix = if key.starts_with("sk_live_") {
        "sk_live_"
    } else if key.starts_with("sk_test_") {
        "sk_test_"
    } else {
        ""
    };
    let tail: String = if key.len() > prefix.len() + 4 {
        key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect()
    } else {
        String::new()
    };
    format!("{}***{}", prefix, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.gstai.in/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.upload_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::new("sk_test_abc123")
            .with_environment(Environment::Sandbox)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://sandbox.gstai.in/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = Config::new("");
        assert!(matches!(
            config.validate(),
            Err(GstaiError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_key_rejected() {
        let config = Config::new("hunter2");
        assert!(matches!(
            config.validate(),
            Err(GstaiError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::new("sk_live_0123456789abcdef");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("sk_live_***cdef"));
    }

    #[test]
    fn test_redact_short_key() {
        assert_eq!(redact_key("sk_live_ab"), "sk_live_***");
    }
}
