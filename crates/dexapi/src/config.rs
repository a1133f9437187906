//! Configuration for the Dex API client.
//!
//! Configuration is environment-only: a single required credential plus
//! optional endpoint overrides (used by tests to aim the client at a mock
//! server). There is no config file discovery.

use thiserror::Error;

/// Environment variable holding the required API key.
pub const API_KEY_VAR: &str = "DEX_API_KEY";
/// Optional override for the GraphQL endpoint.
pub const GRAPHQL_URL_VAR: &str = "DEX_GRAPHQL_URL";
/// Optional override for the REST timeline-items endpoint.
pub const REST_URL_VAR: &str = "DEX_REST_URL";

const DEFAULT_GRAPHQL_URL: &str = "https://api.getdex.com/v1/graphql";
const DEFAULT_REST_URL: &str = "https://api.getdex.com/api/rest/timeline_items";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DEX_API_KEY is not set; a Dex API key is required")]
    MissingApiKey,
}

/// Connection settings for the Dex service.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Value sent in the x-hasura-dex-api-key header.
    pub api_key: String,
    /// GraphQL query/mutation endpoint.
    pub graphql_url: String,
    /// REST endpoint used for note creation.
    pub rest_url: String,
}

impl DexConfig {
    /// Build a config with default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_url: DEFAULT_REST_URL.to_string(),
        }
    }

    /// Load from the environment. Fails when the API key is missing or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match std::env::var(API_KEY_VAR) {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return Err(ConfigError::MissingApiKey),
        };

        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var(GRAPHQL_URL_VAR) {
            config.graphql_url = url;
        }
        if let Ok(url) = std::env::var(REST_URL_VAR) {
            config.rest_url = url;
        }
        Ok(config)
    }

    /// Override the GraphQL endpoint.
    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    /// Override the REST endpoint.
    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_production_endpoints() {
        let config = DexConfig::new("k3y");
        assert_eq!(config.graphql_url, "https://api.getdex.com/v1/graphql");
        assert_eq!(
            config.rest_url,
            "https://api.getdex.com/api/rest/timeline_items"
        );
    }

    #[test]
    fn builders_override_endpoints() {
        let config = DexConfig::new("k3y")
            .with_graphql_url("http://127.0.0.1:9999/graphql")
            .with_rest_url("http://127.0.0.1:9999/rest");
        assert_eq!(config.graphql_url, "http://127.0.0.1:9999/graphql");
        assert_eq!(config.rest_url, "http://127.0.0.1:9999/rest");
    }

    #[test]
    fn missing_key_error_names_the_variable() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("DEX_API_KEY"));
    }
}
