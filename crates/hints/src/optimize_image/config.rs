use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_ENDPOINT is not set")]
    MissingEndpoint,

    #[error("invalid analysis service endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}

/// Configuration of the optimize-image hint.
///
/// The endpoint is required and validated when the configuration is built.
/// The username is deliberately left optional: its absence is part of the
/// hint's observable contract and surfaces as a reported finding at
/// fetch-start rather than a construction error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeImageConfig {
    pub username: Option<String>,

    pub endpoint: Url,
}

impl OptimizeImageConfig {
    pub fn new(username: Option<String>, endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(Self { username, endpoint })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let username = std::env::var("SERVICE_USERNAME").ok();
        let endpoint = std::env::var("API_ENDPOINT").map_err(|_| ConfigError::MissingEndpoint)?;

        Self::new(username, &endpoint)
    }

    /// The configured credential, treating an empty string as absent.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endpoint() {
        let config =
            OptimizeImageConfig::new(Some("test".to_string()), "https://optimizer.example.com/")
                .unwrap();
        assert_eq!(config.username(), Some("test"));
        assert_eq!(config.endpoint.as_str(), "https://optimizer.example.com/");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = OptimizeImageConfig::new(None, "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_empty_username_counts_as_absent() {
        let config =
            OptimizeImageConfig::new(Some(String::new()), "https://optimizer.example.com/")
                .unwrap();
        assert_eq!(config.username(), None);
    }
}
