use std::env;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_name: String,
    pub provider: ProviderConfig,
}

/// Settings for the completion backend. The API key is not part of this:
/// it is looked up from `api_key_var` on the first completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_var: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_var: API_KEY_VAR.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MCP_SERVER_NAME must not be empty")]
    EmptyServerName,
    #[error("OPENAI_BASE_URL must be a valid http or https URL")]
    InvalidBaseUrl,
    #[error("OPENAI_MODEL must not be empty")]
    EmptyModel,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_name = match lookup("MCP_SERVER_NAME") {
            Some(value) => Some(value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::EmptyServerName)?,
            None => env!("CARGO_PKG_NAME").to_string(),
        };

        let base_url = lookup("OPENAI_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&base_url).map_err(|_| ConfigError::InvalidBaseUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl);
        }

        let model = match lookup("OPENAI_MODEL") {
            Some(value) => Some(value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::EmptyModel)?,
            None => DEFAULT_MODEL.to_string(),
        };

        Ok(Self {
            server_name,
            provider: ProviderConfig {
                base_url,
                model,
                api_key_var: API_KEY_VAR.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = config_from(&[]).expect("config should parse");
        assert_eq!(config.server_name, env!("CARGO_PKG_NAME"));
        assert_eq!(config.provider, ProviderConfig::default());
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = config_from(&[
            ("MCP_SERVER_NAME", " mcp-ai-poc "),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("OPENAI_MODEL", " llama3.2 "),
        ])
        .expect("config should parse");

        assert_eq!(config.server_name, "mcp-ai-poc");
        assert_eq!(config.provider.base_url, "http://localhost:11434/v1");
        assert_eq!(config.provider.model, "llama3.2");
        assert_eq!(config.provider.api_key_var, "OPENAI_API_KEY");
    }

    #[test]
    fn invalid_base_url_fails() {
        let err = config_from(&[("OPENAI_BASE_URL", "not a url")])
            .expect_err("expected invalid base url error");
        assert!(matches!(err, ConfigError::InvalidBaseUrl));

        let err = config_from(&[("OPENAI_BASE_URL", "ftp://example.com")])
            .expect_err("expected unsupported scheme error");
        assert!(matches!(err, ConfigError::InvalidBaseUrl));
    }

    #[test]
    fn empty_model_fails() {
        let err = config_from(&[("OPENAI_MODEL", "   ")]).expect_err("expected empty model");
        assert!(matches!(err, ConfigError::EmptyModel));
    }

    #[test]
    fn empty_server_name_fails() {
        let err = config_from(&[("MCP_SERVER_NAME", "")]).expect_err("expected empty name");
        assert!(matches!(err, ConfigError::EmptyServerName));
    }
}
