//! HTTP completion client (OpenAI-compatible)

use super::types::{Completion, CompletionError};
use crate::config::CompletionSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Fixed system instruction sent with every prompt.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    /// Base URL for the API
    base_url: String,

    /// Bearer credential
    api_key: String,

    /// Model ID to use
    model: String,

    /// Sampling temperature, kept low for determinism
    temperature: f32,

    /// HTTP client
    client: reqwest::Client,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl HttpCompletionClient {
    /// Create a client from resolved settings and a credential
    pub fn new(settings: &CompletionSettings, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: settings.base_url.clone(),
            api_key: api_key.into(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            client,
        }
    }

    /// Build the chat completion URL
    fn chat_completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// Map a non-success HTTP status to a CompletionError
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> CompletionError {
        let detail = api_error_message(body).unwrap_or_else(|| body.trim().to_string());

        match status.as_u16() {
            401 | 403 => CompletionError::auth(format!("HTTP {}: {}", status, detail)),
            408 | 504 => CompletionError::transport(format!("HTTP {}: {}", status, detail)),
            _ => CompletionError::upstream(format!("HTTP {}: {}", status, detail)),
        }
    }
}

#[async_trait]
impl Completion for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let start = Instant::now();

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::transport(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    CompletionError::transport(format!("connection failed: {}", e))
                } else {
                    CompletionError::transport(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::upstream(format!("failed to parse response: {}", e)))?;

        let text = extract_text(completion)?;

        tracing::info!(
            model = %self.model,
            prompt_bytes = prompt.len(),
            response_bytes = text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completion call finished"
        );

        Ok(text)
    }
}

/// Pull the first choice's text out of a response, trimmed.
///
/// A response with no choices, or whose content trims to nothing, is an
/// upstream error; a blank wiki page is never worth writing.
fn extract_text(completion: ChatCompletionResponse) -> Result<String, CompletionError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::upstream("response contained no choices"))?
        .message
        .content
        .ok_or_else(|| CompletionError::upstream("response choice had no content"))?;

    let text = content.trim();
    if text.is_empty() {
        return Err(CompletionError::upstream("response content was empty"));
    }

    Ok(text.to_string())
}

/// Try to pull `error.message` out of an API error body
fn api_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> CompletionSettings {
        CompletionSettings::default()
    }

    fn response_with(content: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: content.map(str::to_string),
                },
            }],
        }
    }

    #[test]
    fn test_chat_completions_url() {
        let client = HttpCompletionClient::new(&test_settings(), "sk-test");
        assert_eq!(
            client.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let mut settings = test_settings();
        settings.base_url = "https://api.example.com/v1/".into();
        let client = HttpCompletionClient::new(&settings, "sk-test");
        assert_eq!(
            client.chat_completions_url(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_extract_text_trims_whitespace() {
        let text = extract_text(response_with(Some("  hello \n"))).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_extract_text_rejects_empty_responses() {
        let err = extract_text(ChatCompletionResponse { choices: vec![] }).unwrap_err();
        assert!(matches!(err, CompletionError::Upstream { .. }));

        let err = extract_text(response_with(None)).unwrap_err();
        assert!(matches!(err, CompletionError::Upstream { .. }));

        let err = extract_text(response_with(Some("   \n"))).unwrap_err();
        assert!(matches!(err, CompletionError::Upstream { .. }));
    }

    #[test]
    fn test_map_http_error() {
        let err = HttpCompletionClient::map_http_error(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, CompletionError::Auth { .. }));

        let err = HttpCompletionClient::map_http_error(reqwest::StatusCode::FORBIDDEN, "nope");
        assert!(matches!(err, CompletionError::Auth { .. }));

        let err =
            HttpCompletionClient::map_http_error(reqwest::StatusCode::GATEWAY_TIMEOUT, "slow");
        assert!(matches!(err, CompletionError::Transport { .. }));

        let err = HttpCompletionClient::map_http_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "boom",
        );
        assert!(matches!(err, CompletionError::Upstream { .. }));
    }

    #[test]
    fn test_map_http_error_uses_api_error_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided"}}"#;
        let err = HttpCompletionClient::map_http_error(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4".into(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: "describe the codebase".into(),
                },
            ],
            temperature: 0.2,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "describe the codebase");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
