//! JSON-RPC message helpers and the decoded reply type written to stdout.

use serde_json::{Value, json};
use std::fmt::Display;

/// JSON-RPC protocol version tag.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC "Internal error" code, used for transport-level failures.
pub const INTERNAL_ERROR: i64 = -32603;

/// A decoded reply from the MCP server.
///
/// Almost always `Structured`. `RawText` only appears when a success response
/// carried a body that was neither JSON nor a recognisable event frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    Structured(Value),
    RawText(String),
}

impl ResponseEnvelope {
    /// Build a JSON-RPC error reply. A missing `id` serialises as `null`.
    pub fn error(code: i64, message: impl Into<String>, id: Option<&Value>) -> Self {
        let message: String = message.into();
        Self::Structured(json!({
            "jsonrpc": JSONRPC_VERSION,
            "error": {
                "code": code,
                "message": message,
            },
            "id": id.cloned().unwrap_or(Value::Null),
        }))
    }

    /// Reply for a non-success HTTP status.
    pub fn remote_error(status: u16, body: &str, id: Option<&Value>) -> Self {
        Self::error(i64::from(status), format!("MCP server error: {}", body), id)
    }

    /// Reply for a failure that happened before a usable response existed.
    pub fn internal_error(cause: impl Display, id: Option<&Value>) -> Self {
        Self::error(INTERNAL_ERROR, format!("Internal error: {}", cause), id)
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::RawText(_) => None,
        }
    }

    /// Serialise to a single output line (no trailing newline).
    ///
    /// Raw text is written as a JSON string so the line is always valid JSON
    /// and never contains a literal newline.
    pub fn to_line(&self) -> serde_json::Result<String> {
        match self {
            Self::Structured(value) => serde_json::to_string(value),
            Self::RawText(text) => serde_json::to_string(text),
        }
    }
}

/// The `method` of a message, if it has a string one.
pub fn message_method(message: &Value) -> Option<&str> {
    message.get("method").and_then(Value::as_str)
}

/// The `id` of a message, if present.
pub fn message_id(message: &Value) -> Option<&Value> {
    message.get("id")
}

pub fn is_initialize(message: &Value) -> bool {
    message_method(message) == Some("initialize")
}
