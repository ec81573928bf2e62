//! Session affinity for the remote MCP server.
//!
//! The server issues an `mcp-session-id` header on its `initialize` reply. The
//! bridge echoes it on every later request for the life of the process. There
//! is no logout, expiry or rotation.

use tracing::{info, warn};

/// Holds the session token issued by the remote server.
///
/// Owned by the bridge loop, which is the only writer; the token is recorded
/// before any later request is dispatched, so no locking is needed.
#[derive(Debug, Default, Clone)]
pub struct SessionManager {
    session_id: Option<String>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session token. Last write wins.
    pub fn record(&mut self, token: impl Into<String>) {
        let token = token.into();
        match self.session_id.as_deref() {
            Some(previous) if previous != token => {
                warn!(
                    previous = %previous,
                    session_id = %token,
                    "Replacing existing MCP session ID"
                );
            }
            Some(_) => return,
            None => info!(session_id = %token, "Obtained MCP session ID"),
        }
        self.session_id = Some(token);
    }

    /// The current session token, if one has been issued.
    pub fn current(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
