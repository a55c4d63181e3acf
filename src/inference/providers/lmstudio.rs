//! LM Studio provider (local inference server).
//!
//! LM Studio exposes an OpenAI-compatible `/v1/completions` endpoint, so this
//! shares the wire format with the OpenAI provider. No credential is needed.

use std::time::Duration;

use async_trait::async_trait;
use log::info;

use super::openai::{CompletionsBody, build_http_client, send_completion};
use crate::inference::{Completion, CompletionClient, CompletionError, CompletionRequest};

pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug)]
pub struct LmStudioProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl LmStudioProvider {
    pub fn new(
        base_url: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string()),
            model,
            client: build_http_client(timeout)?,
        })
    }
}

#[async_trait]
impl CompletionClient for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        info!(
            "LM Studio completion request: model={}, prompt_len={}",
            self.model,
            request.prompt.len()
        );
        let body = CompletionsBody::new(&self.model, request);
        send_completion(&self.client, &self.base_url, None, &body).await
    }
}
