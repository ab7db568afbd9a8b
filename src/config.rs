use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Number of raw upstream items tagged per fetch
    #[serde(default = "default_item_limit")]
    pub item_limit: usize,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_item_limit() -> usize {
    18
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Name of the environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://finnhub.io/api/v1".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_token_env() -> String {
    "FINNHUB_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            category: default_category(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// Read the API token from the configured environment variable.
    pub fn token(&self) -> anyhow::Result<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => anyhow::bail!(
                "environment variable {} must hold the upstream API token",
                self.token_env
            ),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.item_limit == 0 {
            anyhow::bail!("item_limit must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        assert_eq!(default_item_limit(), 18);
        assert_eq!(default_bind_address(), "0.0.0.0:3000");
        assert_eq!(default_timeout_secs(), 30);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            bind_address = "127.0.0.1:8080"
            item_limit = 24

            [upstream]
            base_url = "http://localhost:9999/api"
            category = "forex"
            token_env = "TEST_NEWS_TOKEN"
            timeout_secs = 5
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.item_limit, 24);
        assert_eq!(config.upstream.base_url, "http://localhost:9999/api");
        assert_eq!(config.upstream.category, "forex");
        assert_eq!(config.upstream.token_env, "TEST_NEWS_TOKEN");
        assert_eq!(config.upstream.timeout_secs, 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.item_limit, 18);
        assert_eq!(config.upstream.base_url, "https://finnhub.io/api/v1");
        assert_eq!(config.upstream.category, "general");
        assert_eq!(config.upstream.token_env, "FINNHUB_TOKEN");
    }

    #[test]
    fn test_partial_upstream_section() {
        let content = r#"
            [upstream]
            base_url = "http://mock.local"
        "#;

        let config = Config::from_str(content).unwrap();
        assert_eq!(config.upstream.base_url, "http://mock.local");
        assert_eq!(config.upstream.category, "general"); // Default
        assert_eq!(config.upstream.timeout_secs, 30); // Default
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/trendboard.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_item_limit_rejected() {
        let result = Config::from_str("item_limit = 0");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result = Config::from_str(r#"item_limit = "many""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_read_from_env() {
        let upstream = UpstreamConfig {
            token_env: "TRENDBOARD_TEST_TOKEN_PRESENT".to_string(),
            ..Default::default()
        };
        std::env::set_var("TRENDBOARD_TEST_TOKEN_PRESENT", "secret-token");

        assert_eq!(upstream.token().unwrap(), "secret-token");
    }

    #[test]
    fn test_missing_token_is_error() {
        let upstream = UpstreamConfig {
            token_env: "TRENDBOARD_TEST_TOKEN_ABSENT".to_string(),
            ..Default::default()
        };
        std::env::remove_var("TRENDBOARD_TEST_TOKEN_ABSENT");

        let err = upstream.token().unwrap_err();
        assert!(err.to_string().contains("TRENDBOARD_TEST_TOKEN_ABSENT"));
    }
}
