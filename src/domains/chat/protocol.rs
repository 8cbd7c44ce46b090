//! Wire types for the OpenAI-compatible chat completions protocol.
//!
//! Covers the request side (messages, tool calls) and the streaming
//! response side (per-chunk deltas), plus the accumulator that reassembles
//! tool calls split across chunks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Messages
// ============================================================================

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Assistant turn, optionally carrying the tool calls it issued.
    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Tool result message answering one tool call.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A complete tool call issued by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// The function portion of a tool call; arguments are raw JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

// ============================================================================
// Streaming response chunks
// ============================================================================

/// One parsed chunk of a streaming chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// A fragment of a tool call. Providers may split the id, name, and
/// argument text of one call across many chunks, correlated by `index`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallDelta {
    pub index: u32,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub call_type: Option<String>,
    #[serde(default)]
    pub function: Option<FunctionDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

/// An event produced by the model client while consuming the stream.
#[derive(Debug, Clone)]
pub enum ModelEvent {
    /// A text delta to forward to the client.
    Token(String),
    /// Tool call fragments to feed into the accumulator.
    ToolCallDeltas(Vec<ToolCallDelta>),
    /// The provider signalled end of stream.
    Done,
}

// ============================================================================
// Tool call accumulation
// ============================================================================

/// Accumulates streaming tool call fragments into complete tool calls.
///
/// The first fragment for an index usually carries the metadata (id, type,
/// function name); later fragments carry only argument text. Fragments are
/// collected per index and assembled when the model turn ends.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    calls: HashMap<u32, PartialToolCall>,
}

#[derive(Debug, Default)]
struct PartialToolCall {
    id: Option<String>,
    call_type: Option<String>,
    name: Option<String>,
    arguments: String,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one chunk's fragments into the accumulated state. Fields that
    /// are already set are not overwritten.
    pub fn process(&mut self, deltas: &[ToolCallDelta]) {
        for delta in deltas {
            let entry = self.calls.entry(delta.index).or_default();
            if let Some(id) = &delta.id {
                entry.id.get_or_insert_with(|| id.clone());
            }
            if let Some(call_type) = &delta.call_type {
                entry.call_type.get_or_insert_with(|| call_type.clone());
            }
            if let Some(function) = &delta.function {
                if let Some(name) = &function.name {
                    entry.name.get_or_insert_with(|| name.clone());
                }
                if let Some(arguments) = &function.arguments {
                    entry.arguments.push_str(arguments);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Assemble complete tool calls in index order. Fragments missing an
    /// id or a function name are dropped.
    pub fn into_tool_calls(self) -> Vec<ToolCall> {
        let mut calls: Vec<_> = self.calls.into_iter().collect();
        calls.sort_by_key(|(index, _)| *index);

        calls
            .into_iter()
            .filter_map(|(_, partial)| {
                Some(ToolCall {
                    id: partial.id?,
                    call_type: partial.call_type.unwrap_or_else(|| "function".to_string()),
                    function: FunctionCall {
                        name: partial.name?,
                        arguments: partial.arguments,
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(
        index: u32,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) -> ToolCallDelta {
        ToolCallDelta {
            index,
            id: id.map(String::from),
            call_type: id.map(|_| "function".to_string()),
            function: Some(FunctionDelta {
                name: name.map(String::from),
                arguments: arguments.map(String::from),
            }),
        }
    }

    #[test]
    fn test_accumulator_reassembles_split_arguments() {
        let mut acc = ToolCallAccumulator::new();
        acc.process(&[delta(0, Some("call_1"), Some("getTodos"), Some("{\"filt"))]);
        acc.process(&[delta(0, None, None, Some("er\":\"all\"}"))]);

        let calls = acc.into_tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.name, "getTodos");
        assert_eq!(calls[0].function.arguments, r#"{"filter":"all"}"#);
    }

    #[test]
    fn test_accumulator_orders_by_index() {
        let mut acc = ToolCallAccumulator::new();
        acc.process(&[
            delta(1, Some("call_b"), Some("deleteTodo"), Some("{}")),
            delta(0, Some("call_a"), Some("getTodos"), Some("{}")),
        ]);

        let calls = acc.into_tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_a");
        assert_eq!(calls[1].id, "call_b");
    }

    #[test]
    fn test_accumulator_drops_incomplete_calls() {
        let mut acc = ToolCallAccumulator::new();
        // Arguments without id or name never form a call.
        acc.process(&[delta(0, None, None, Some("{\"x\":1}"))]);
        assert!(acc.into_tool_calls().is_empty());
    }

    #[test]
    fn test_stream_chunk_parses_openai_shape() {
        let raw = r#"{"id":"c1","choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#;
        let chunk: StreamChunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_tool_message_round_trips() {
        let message = ChatMessage::tool("call_1", r#"{"success":true}"#);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert!(value.get("tool_calls").is_none());

        let parsed: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, message);
    }
}
