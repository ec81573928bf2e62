//! Automatic `tools/list` after initialization.
//!
//! Right after the first `initialize` exchange the bridge asks the server for
//! its tool list on the client's behalf and writes the reply to stdout like
//! any other. This happens once per process; later `initialize` messages do
//! not trigger it again.

use crate::envelope::{JSONRPC_VERSION, ResponseEnvelope};
use serde_json::{Value, json};
use thiserror::Error;

/// Request id used for the automatic `tools/list` call.
pub const TOOLS_LIST_SENTINEL_ID: i64 = 9999;

/// Why a `tools/list` reply could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("no reply to tools/list")]
    NoReply,

    #[error("tools/list reply was not JSON")]
    NotJson,

    #[error("tools/list returned an error: {0}")]
    ErrorReply(String),

    #[error("tools/list reply has no result.tools array")]
    MissingTools,
}

/// Progress of the automatic `tools/list` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapState {
    /// Not yet triggered.
    #[default]
    Pending,
    /// Ran and the server listed its tools.
    Completed { tool_count: usize },
    /// Ran but the reply could not be read. Not retried.
    Failed,
}

impl BootstrapState {
    pub fn has_run(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// True once a `tools/list` round-trip succeeded.
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// The synthetic request sent after initialization.
pub fn tools_list_request() -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": TOOLS_LIST_SENTINEL_ID,
        "method": "tools/list",
    })
}

/// Count the tools in a `tools/list` reply.
pub fn count_tools(reply: Option<&ResponseEnvelope>) -> Result<usize, BootstrapError> {
    let value = reply
        .ok_or(BootstrapError::NoReply)?
        .as_structured()
        .ok_or(BootstrapError::NotJson)?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| error.to_string());
        return Err(BootstrapError::ErrorReply(message));
    }

    value
        .get("result")
        .and_then(|result| result.get("tools"))
        .and_then(Value::as_array)
        .map(Vec::len)
        .ok_or(BootstrapError::MissingTools)
}
