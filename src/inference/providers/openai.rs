//! OpenAI provider using the legacy Completions API.
//!
//! `POST {base_url}/completions` takes a single prompt string and returns
//! `choices[].text`. Any server speaking that shape (LM Studio, vLLM, ...)
//! can reuse [`send_completion`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{Choice, Completion, CompletionClient, CompletionError, CompletionRequest};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-instruct";

// ============================================================================
// Completions API Types
// ============================================================================

/// The request body for the Completions endpoint
#[derive(Serialize, Debug)]
pub(super) struct CompletionsBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    top_p: f32,
}

impl<'a> CompletionsBody<'a> {
    pub(super) fn new(model: &'a str, request: &'a CompletionRequest) -> Self {
        Self {
            model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
            top_p: request.top_p,
        }
    }
}

#[derive(Deserialize, Debug)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// `{"error": {"message": "..."}}` as returned on 4xx/5xx.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

/// Pulls the human-readable message out of an error body, falling back to the raw body.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

pub(super) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, CompletionError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CompletionError::Network(format!("HTTP client setup failed: {e}")))
}

/// Sends one Completions request and turns the response into a [`Completion`].
pub(super) async fn send_completion(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    body: &CompletionsBody<'_>,
) -> Result<Completion, CompletionError> {
    let url = format!("{}/completions", base_url.trim_end_matches('/'));
    let mut builder = client.post(url).json(body);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| CompletionError::Network(e.to_string()))?;

    debug!("Completions response status: {}", response.status());

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let err_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Completions API error: {} - {}", status, err_body);
        return Err(CompletionError::Api {
            status,
            message: upstream_message(&err_body),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| CompletionError::Network(e.to_string()))?;
    let parsed: CompletionsResponse =
        serde_json::from_str(&text).map_err(|e| CompletionError::Parse(e.to_string()))?;

    info!("Completions response: {} choice(s)", parsed.choices.len());
    Completion::new(parsed.choices).ok_or(CompletionError::EmptyResponse)
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI API provider (requires an API key)
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider.
    ///
    /// Fails with [`CompletionError::Authentication`] when `api_key` is missing or blank.
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CompletionError::Authentication(
                    "missing API key (set API_KEY or [openai].api_key)".to_string(),
                )
            })?;

        Ok(Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model,
            client: build_http_client(timeout)?,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        info!(
            "OpenAI completion request: model={}, prompt_len={}, max_tokens={}",
            self.model,
            request.prompt.len(),
            request.max_tokens
        );
        let body = CompletionsBody::new(&self.model, request);
        send_completion(&self.client, &self.base_url, Some(&self.api_key), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Tuning;

    #[test]
    fn test_missing_key_is_authentication_error() {
        let result = OpenAiProvider::new(
            None,
            None,
            DEFAULT_OPENAI_MODEL.to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(CompletionError::Authentication(_))));

        let blank = OpenAiProvider::new(
            Some("  ".to_string()),
            None,
            DEFAULT_OPENAI_MODEL.to_string(),
            Duration::from_secs(5),
        );
        assert!(matches!(blank, Err(CompletionError::Authentication(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let provider = OpenAiProvider::new(
            Some("sk-secret".to_string()),
            None,
            "m".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!format!("{provider:?}").contains("sk-secret"));
    }

    #[test]
    fn test_body_serializes_all_tuning_fields() {
        let request = CompletionRequest::new("list files", Tuning::default());
        let body = CompletionsBody::new("test-model", &request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "test-model");
        assert_eq!(json["prompt"], "list files");
        assert_eq!(json["max_tokens"], 450);
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["top_p"], 1.0);
        assert!(json.get("frequency_penalty").is_some());
        assert!(json.get("presence_penalty").is_some());
    }

    #[test]
    fn test_upstream_message_extraction() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        assert_eq!(upstream_message(body), "Rate limit reached");
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(upstream_message(""), "unknown error");
    }

    #[test]
    fn test_response_without_choices_parses() {
        let parsed: CompletionsResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
