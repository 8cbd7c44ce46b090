//! Chat orchestration.
//!
//! Drives the conversation with the hosted model: prepends the system
//! prompt, trims the transcript to the context budget, streams the model's
//! text to the caller, and runs the tool loop - executing issued tool
//! calls and re-invoking the model with their results until the model
//! answers in plain text or the roundtrip cap is reached.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, instrument, warn};

use super::client::{ModelClient, ModelStream};
use super::error::ChatError;
use super::postprocess::clean_model_response;
use super::prompt::SYSTEM_PROMPT;
use super::protocol::{ChatMessage, ModelEvent, Role, ToolCallAccumulator};
use crate::domains::tools::ToolRegistry;

/// Maximum number of tool roundtrips per conversation turn. Each roundtrip
/// is one batch of tool executions followed by a fresh model invocation.
const MAX_TOOL_ROUNDTRIPS: usize = 5;

/// Approximate context budget for one request, in tokens.
const CONTEXT_TOKEN_BUDGET: usize = 12_000;

/// Rough chars-per-token ratio used for the budget estimate.
const APPROX_CHARS_PER_TOKEN: usize = 4;

/// Stream of text deltas handed to the HTTP layer.
pub type TokenStream = ReceiverStream<Result<String, ChatError>>;

/// Orchestrates model conversations with tool calling.
pub struct ChatOrchestrator {
    client: Arc<ModelClient>,
    registry: Arc<ToolRegistry>,
}

impl ChatOrchestrator {
    pub fn new(client: ModelClient, registry: Arc<ToolRegistry>) -> Self {
        Self {
            client: Arc::new(client),
            registry,
        }
    }

    /// Run one conversation turn.
    ///
    /// The first model invocation is awaited here so that an unreachable or
    /// rejecting API surfaces as an error before any bytes are streamed.
    /// The tool loop then runs in a background task feeding the returned
    /// stream; errors past the first invocation arrive as stream items.
    #[instrument(skip_all, fields(messages = messages.len()))]
    pub async fn handle_chat(&self, messages: Vec<ChatMessage>) -> Result<TokenStream, ChatError> {
        let mut transcript = Vec::with_capacity(messages.len() + 1);
        transcript.push(ChatMessage::system(SYSTEM_PROMPT));
        transcript.extend(messages);
        let transcript = truncate_messages(transcript);

        let tools = ToolRegistry::model_tools();
        let stream = self.client.stream_chat(&transcript, &tools).await?;

        let (tx, rx) = mpsc::channel(32);
        let client = Arc::clone(&self.client);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(run_tool_loop(client, registry, stream, transcript, tools, tx));

        Ok(ReceiverStream::new(rx))
    }
}

/// Consume model turns until one ends without tool calls.
///
/// Text deltas are forwarded raw as they arrive; the cleaned-up
/// transcript copy only matters for follow-up invocations.
async fn run_tool_loop(
    client: Arc<ModelClient>,
    registry: Arc<ToolRegistry>,
    first: ModelStream,
    mut transcript: Vec<ChatMessage>,
    tools: Vec<serde_json::Value>,
    tx: mpsc::Sender<Result<String, ChatError>>,
) {
    let mut stream = first;
    let mut roundtrips = 0;

    loop {
        let mut content = String::new();
        let mut accumulator = ToolCallAccumulator::new();

        loop {
            match stream.next().await {
                Some(Ok(ModelEvent::Token(token))) => {
                    content.push_str(&token);
                    if tx.send(Ok(token)).await.is_err() {
                        // Caller went away; nothing left to do.
                        return;
                    }
                }
                Some(Ok(ModelEvent::ToolCallDeltas(deltas))) => {
                    accumulator.process(&deltas);
                }
                Some(Ok(ModelEvent::Done)) | None => break,
                Some(Err(err)) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            }
        }

        let tool_calls = accumulator.into_tool_calls();
        if tool_calls.is_empty() {
            return;
        }
        if roundtrips >= MAX_TOOL_ROUNDTRIPS {
            warn!(
                roundtrips,
                "Tool roundtrip limit reached, dropping pending tool calls"
            );
            return;
        }
        roundtrips += 1;
        info!(
            roundtrip = roundtrips,
            calls = tool_calls.len(),
            "Executing model tool calls"
        );

        transcript.push(ChatMessage::assistant(
            clean_model_response(&content),
            Some(tool_calls.clone()),
        ));
        for call in &tool_calls {
            debug!(tool = %call.function.name, "Dispatching tool call");
            let outcome = registry.call(&call.function.name, &call.function.arguments);
            transcript.push(ChatMessage::tool(
                call.id.clone(),
                outcome.to_message_content(),
            ));
        }

        transcript = truncate_messages(transcript);
        match client.stream_chat(&transcript, &tools).await {
            Ok(next) => stream = next,
            Err(err) => {
                let _ = tx.send(Err(err)).await;
                return;
            }
        }
    }
}

/// Estimate a message's token footprint from its serialized length.
fn approx_tokens(message: &ChatMessage) -> usize {
    serde_json::to_string(message)
        .map(|s| s.len())
        .unwrap_or(0)
        / APPROX_CHARS_PER_TOKEN
}

/// Trim the transcript to the context budget.
///
/// The leading system message and the final message always survive; the
/// oldest messages in between are dropped first.
fn truncate_messages(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut total: usize = messages.iter().map(approx_tokens).sum();
    if total <= CONTEXT_TOKEN_BUDGET || messages.len() <= 2 {
        return messages;
    }

    let mut messages = messages;
    let protected_head = usize::from(messages.first().is_some_and(|m| m.role == Role::System));

    let mut dropped = 0;
    while total > CONTEXT_TOKEN_BUDGET && messages.len() > protected_head + 1 {
        let removed = messages.remove(protected_head);
        total -= approx_tokens(&removed);
        dropped += 1;
    }
    if dropped > 0 {
        debug!(dropped, "Truncated transcript to fit context budget");
    }
    messages
}
