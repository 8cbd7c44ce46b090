//! Streaming client for an OpenAI-compatible chat completions endpoint.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use serde_json::{Value, json};
use tracing::debug;

use super::error::ChatError;
use super::protocol::{ChatMessage, ModelEvent, StreamChunk};
use crate::core::config::AiConfig;

/// Stream of parsed model events.
pub type ModelStream = Pin<Box<dyn Stream<Item = Result<ModelEvent, ChatError>> + Send>>;

/// Client for the hosted model's chat completions API.
pub struct ModelClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl ModelClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Start a streaming chat completion.
    ///
    /// Returns an error if the request cannot be made or the API answers
    /// with a non-success status; stream-level failures surface as items
    /// of the returned stream.
    pub async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        tools: &[Value],
    ) -> Result<ModelStream, ChatError> {
        let body = self.request_body(messages, tools);
        debug!(model = %self.config.model, messages = messages.len(), "Requesting chat completion");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api { status, message });
        }

        let stream = response
            .bytes_stream()
            .eventsource()
            .map(|event| {
                let event = event.map_err(|e| ChatError::stream(e.to_string()))?;
                parse_sse_data(&event.data)
            })
            .filter_map(|result| async move {
                match result {
                    Ok(Some(event)) => Some(Ok(event)),
                    Ok(None) => None,
                    Err(err) => Some(Err(err)),
                }
            });

        Ok(Box::pin(stream))
    }

    fn request_body(&self, messages: &[ChatMessage], tools: &[Value]) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": true,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "top_p": self.config.top_p,
            "frequency_penalty": self.config.frequency_penalty,
            "presence_penalty": self.config.presence_penalty,
        });
        if !tools.is_empty() {
            body["tools"] = Value::Array(tools.to_vec());
        }
        if !self.config.stop.is_empty() {
            body["stop"] = json!(self.config.stop);
        }
        body
    }
}

/// Parse one SSE `data:` payload.
///
/// `[DONE]` marks end of stream; empty payloads are skipped; anything else
/// must be a valid chunk.
fn parse_sse_data(data: &str) -> Result<Option<ModelEvent>, ChatError> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed == "[DONE]" {
        return Ok(Some(ModelEvent::Done));
    }

    let chunk: StreamChunk = serde_json::from_str(trimmed)?;
    let Some(choice) = chunk.choices.into_iter().next() else {
        return Ok(None);
    };

    if let Some(tool_calls) = choice.delta.tool_calls
        && !tool_calls.is_empty()
    {
        return Ok(Some(ModelEvent::ToolCallDeltas(tool_calls)));
    }
    if let Some(content) = choice.delta.content
        && !content.is_empty()
    {
        return Ok(Some(ModelEvent::Token(content)));
    }
    Ok(None)
}
