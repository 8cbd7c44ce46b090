//! Uniform tool result envelope.

use serde::Serialize;

/// The `{success, data|error}` envelope every tool returns to the model.
///
/// Failures carry a structured message instead of an exception: the model
/// reads the envelope back as a tool result and reacts in its next turn.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    /// Whether the invocation was successful.
    pub success: bool,

    /// The result data from the tool.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,

    /// Error message if the invocation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    /// Successful outcome with a data payload.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    /// Failed outcome with an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            error: Some(error.into()),
        }
    }

    /// Outcome with an explicit success flag. Used by bulk operations
    /// that report partial completion in their payload.
    pub fn with_status(success: bool, data: serde_json::Value) -> Self {
        Self {
            success,
            data,
            error: None,
        }
    }

    /// Serialize the envelope for a `tool` role message.
    pub fn to_message_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"unserializable tool result"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let outcome = ToolOutcome::success(json!({"todo": {"id": "t1"}}));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        assert_eq!(value["data"]["todo"]["id"], "t1");
    }

    #[test]
    fn test_failure_envelope_shape() {
        let outcome = ToolOutcome::failure("Todo not found");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Todo not found");
        assert!(value.get("data").is_none());
    }
}
