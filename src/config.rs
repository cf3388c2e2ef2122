//! Runtime configuration for the completion endpoint.
//!
//! Loaded from the environment (a `.env` file is honored when present).
//! Only `API_KEY` is mandatory; everything else has a sensible default.
//!
//! Recognized variables:
//! - `API_KEY`: bearer token for the completion service (required)
//! - `API_URL`: chat-completions endpoint
//! - `MODEL`: model identifier
//! - `REQUEST_TIMEOUT_SECONDS`: transport-level timeout

use crate::error::{TutorError, TutorResult};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub model: String,
    pub api_key: String,
    pub api_url: String,
    pub request_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Checks that the required environment variables are present without
/// building a full [`Config`]. Returns the missing names on failure.
pub fn validate_environment() -> Result<(), String> {
    let required_vars = ["API_KEY"];
    let missing_vars: Vec<&str> = required_vars
        .iter()
        .filter(|var| std::env::var(var).is_err())
        .copied()
        .collect();

    if missing_vars.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        ))
    }
}

pub fn load_config() -> TutorResult<Config> {
    dotenv::dotenv().ok();

    let api_key = std::env::var("API_KEY").map_err(|_| TutorError::MissingVar {
        name: "API_KEY".to_string(),
    })?;
    let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Url::parse(&api_url).map_err(|_| TutorError::InvalidUrl {
        url: api_url.clone(),
    })?;
    let model = std::env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    Ok(Config {
        model,
        api_key,
        api_url,
        request_timeout_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_seconds, 30);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_default_api_url_is_valid() {
        assert!(Url::parse(DEFAULT_API_URL).is_ok());
    }

    #[test]
    fn test_load_config_requires_api_key() {
        // Single test owns the env mutations to keep parallel runs safe.
        std::env::remove_var("API_KEY");
        assert!(matches!(
            load_config(),
            Err(TutorError::MissingVar { .. })
        ));

        std::env::set_var("API_KEY", "test-key");
        let config = load_config().expect("config should load with API_KEY set");
        assert_eq!(config.api_key, "test-key");
        std::env::remove_var("API_KEY");
    }
}
