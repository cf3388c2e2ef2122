use crate::config::{load_config, Config};
use crate::error::{TutorError, TutorResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: WireMessage,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

/// Per-call generation knobs. The visualization surface runs tighter than
/// chat so replies stay inside a single JSON object.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            temperature: 0.7,
        }
    }
}

impl CompletionOptions {
    /// Settings for the JSON-only data prompts.
    pub fn data() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.2,
        }
    }

    /// Settings for the longer structured simulation replies.
    pub fn analysis() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// The transport seam. One outstanding request per call; no retry — a failed
/// call surfaces its error and the user re-triggers the action.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
    ) -> TutorResult<String>;
}

pub struct DeepSeekClient {
    http: Client,
    config: Config,
}

impl DeepSeekClient {
    pub fn new(config: Config) -> TutorResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| TutorError::Network {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> TutorResult<Self> {
        Self::new(load_config()?)
    }
}

#[async_trait]
impl CompletionBackend for DeepSeekClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: CompletionOptions,
    ) -> TutorResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![WireMessage::system(system), WireMessage::user(user)],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!(model = %self.config.model, max_tokens = options.max_tokens, "sending completion request");

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "请求超时，API长时间未响应".to_string()
                } else if e.is_connect() {
                    "无法连接到服务器，请稍后再试".to_string()
                } else {
                    e.to_string()
                };
                TutorError::Network { reason }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TutorError::Network {
            reason: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            warn!(status, "completion endpoint returned an error");
            return Err(error_from_body(status, &body));
        }

        content_from_body(&body)
    }
}

/// Maps a non-2xx response to an error, preferring the service's own
/// `{error:{message}}` envelope over the raw body.
fn error_from_body(status: u16, body: &str) -> TutorError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    TutorError::Api { status, message }
}

/// Pulls the first choice's content out of a success body.
fn content_from_body(body: &str) -> TutorResult<String> {
    let envelope: ChatResponse = serde_json::from_str(body).map_err(|e| TutorError::Envelope {
        reason: e.to_string(),
    })?;

    let content = envelope
        .choices
        .first()
        .map(|choice| choice.message.content.clone())
        .ok_or(TutorError::EmptyResponse)?;

    if content.trim().is_empty() {
        return Err(TutorError::EmptyResponse);
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_well_formed_body() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"供需平衡是指…"}}]}"#;
        assert_eq!(content_from_body(body).unwrap(), "供需平衡是指…");
    }

    #[test]
    fn test_content_from_empty_choices() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(
            content_from_body(body),
            Err(TutorError::EmptyResponse)
        ));
    }

    #[test]
    fn test_content_from_blank_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
        assert!(matches!(
            content_from_body(body),
            Err(TutorError::EmptyResponse)
        ));
    }

    #[test]
    fn test_content_from_malformed_envelope() {
        assert!(matches!(
            content_from_body("not json at all"),
            Err(TutorError::Envelope { .. })
        ));
    }

    #[test]
    fn test_error_from_service_envelope() {
        let body = r#"{"error":{"message":"Insufficient balance"}}"#;
        match error_from_body(402, body) {
            TutorError::Api { status, message } => {
                assert_eq!(status, 402);
                assert_eq!(message, "Insufficient balance");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_from_plain_body() {
        match error_from_body(502, "Bad Gateway") {
            TutorError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = Config {
            api_key: "test".to_string(),
            ..Config::default()
        };
        assert!(DeepSeekClient::new(config).is_ok());
    }
}
