//! stdio-to-HTTP bridge loop.
//!
//! Reads one JSON-RPC message per line, forwards it over the transport, and
//! writes the decoded reply as one line. Lines are handled strictly in order:
//! the next line is not read until the current reply has been written.

use crate::bootstrap::{BootstrapState, count_tools, tools_list_request};
use crate::config::BridgeConfig;
use crate::envelope::{ResponseEnvelope, is_initialize, message_id};
use crate::error::Result;
use crate::session::SessionManager;
use crate::transport::McpTransport;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// Characters of a line kept in log previews.
const LOG_PREVIEW_CHARS: usize = 100;

/// Bridges a line-delimited JSON-RPC stream to an [`McpTransport`].
///
/// # Example
///
/// ```rust,no_run
/// use mcp_stdio_bridge::{BridgeConfig, HttpTransport, StdioBridge};
/// use tokio::io::BufReader;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BridgeConfig::from_env()?;
/// let transport = HttpTransport::new(config.url.clone())?;
/// let mut bridge = StdioBridge::new(transport, &config);
///
/// let stdin = BufReader::new(tokio::io::stdin());
/// let mut stdout = tokio::io::stdout();
/// bridge.run(stdin, &mut stdout).await?;
/// # Ok(())
/// # }
/// ```
pub struct StdioBridge<T> {
    transport: T,
    session: SessionManager,
    bootstrap: BootstrapState,
    bootstrap_delay: Duration,
    bootstrap_enabled: bool,
}

impl<T: McpTransport> StdioBridge<T> {
    pub fn new(transport: T, config: &BridgeConfig) -> Self {
        Self {
            transport,
            session: SessionManager::new(),
            bootstrap: BootstrapState::Pending,
            bootstrap_delay: config.bootstrap_delay,
            bootstrap_enabled: config.bootstrap_enabled,
        }
    }

    /// Session token currently attached to outbound requests.
    pub fn session_id(&self) -> Option<&str> {
        self.session.current()
    }

    pub fn bootstrap_state(&self) -> BootstrapState {
        self.bootstrap
    }

    /// True once the automatic `tools/list` succeeded.
    pub fn is_initialized(&self) -> bool {
        self.bootstrap.is_initialized()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Process lines from `reader` until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading from `reader` fails. Per-message
    /// failures are answered on `writer` and never end the loop.
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.handle_line(&line, writer).await,
                Ok(None) => {
                    info!("Input stream closed");
                    return Ok(());
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    /// Handle one input line: parse, forward, write the reply, and run the
    /// bootstrap if this was the first `initialize`.
    pub async fn handle_line<W>(&mut self, line: &str, writer: &mut W)
    where
        W: AsyncWrite + Unpin,
    {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        info!("Received input: {}", preview(line));

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, "Invalid JSON on input: {}", line);
                return;
            }
        };

        if !message.is_object() {
            error!("Ignoring input that is not a JSON-RPC object: {}", preview(line));
            return;
        }

        if let Some(envelope) = self.forward(&message).await {
            self.emit(&envelope, writer).await;
        }

        if self.bootstrap_enabled && is_initialize(&message) && !self.bootstrap.has_run() {
            self.run_bootstrap(writer).await;
        }
    }

    /// Send one message with the current session and decode the reply.
    ///
    /// Transport failures become JSON-RPC internal errors. A session token
    /// issued by an `initialize` reply is recorded before returning.
    pub async fn forward(&mut self, message: &Value) -> Option<ResponseEnvelope> {
        let result = self
            .transport
            .exchange(message, self.session.current())
            .await;

        match result {
            Ok(exchange) => {
                if let Some(session_id) = exchange.session_id {
                    self.session.record(session_id);
                }
                exchange.envelope
            }
            Err(e) => {
                error!("Failed to send MCP message: {}", e);
                Some(ResponseEnvelope::internal_error(&e, message_id(message)))
            }
        }
    }

    async fn emit<W>(&self, envelope: &ResponseEnvelope, writer: &mut W)
    where
        W: AsyncWrite + Unpin,
    {
        let line = match envelope.to_line() {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialise response: {}", e);
                return;
            }
        };

        match write_line(writer, &line).await {
            Ok(()) => info!("Wrote response: {}", preview(&line)),
            Err(e) => error!("Failed to write response: {}", e),
        }
    }

    async fn run_bootstrap<W>(&mut self, writer: &mut W)
    where
        W: AsyncWrite + Unpin,
    {
        info!("Sending automatic tools/list request");
        if !self.bootstrap_delay.is_zero() {
            tokio::time::sleep(self.bootstrap_delay).await;
        }

        let reply = self.forward(&tools_list_request()).await;
        if let Some(envelope) = &reply {
            self.emit(envelope, writer).await;
        }

        self.bootstrap = match count_tools(reply.as_ref()) {
            Ok(tool_count) => {
                info!(tool_count, "Automatically fetched {} MCP tools", tool_count);
                BootstrapState::Completed { tool_count }
            }
            Err(e) => {
                debug!("Could not read tools/list reply: {}", e);
                BootstrapState::Failed
            }
        };

        if !self.bootstrap.is_initialized() {
            warn!("Automatic tools/list did not succeed; it will not be retried");
        }
    }
}

async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// First [`LOG_PREVIEW_CHARS`] characters of `text`, with an ellipsis if cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
