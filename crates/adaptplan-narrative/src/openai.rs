//! OpenAI-compatible chat-completions client.
//!
//! One request per call. Retries are left to the caller so that a narrative
//! request never silently multiplies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::errors::TransportError;
use crate::transport::{ChatRequest, ChatTransport};

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl OpenAiClient {
    /// Build a client from service settings. Fails when no API key is configured.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, TransportError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .api_key
            .clone()
            .ok_or(TransportError::MissingApiKey)?;

        let timeout = config.timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

/// Request body for the chat-completions endpoint.
pub fn build_request_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|message| {
            serde_json::json!({
                "role": message.role.as_str(),
                "content": message.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "temperature": request.temperature,
        "messages": messages,
    });

    if request.json_object {
        body["response_format"] = serde_json::json!({ "type": "json_object" });
    }

    body
}

#[async_trait]
impl ChatTransport for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError> {
        debug!(model = %request.model, messages = request.messages.len(), "complete: called");
        let body = build_request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "complete: API error");
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CompletionEnvelope = response
            .json()
            .await
            .map_err(|err| self.map_send_error(err))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                TransportError::InvalidResponse("response has no message content".to_string())
            })
    }
}

impl OpenAiClient {
    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_decode() {
            TransportError::InvalidResponse(err.to_string())
        } else {
            TransportError::Network(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}
