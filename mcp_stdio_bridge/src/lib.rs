//! # MCP stdio bridge
//!
//! Lets a client that only speaks line-delimited JSON-RPC over stdin/stdout
//! talk to an MCP server exposed over Streamable HTTP.
//!
//! ## Architecture
//!
//! *   **Bridge loop** ([`StdioBridge`]): one stdin line in, one HTTP POST out,
//!     one stdout line back. Strictly sequential.
//! *   **Transport** ([`HttpTransport`]): sets the MCP headers, decodes plain
//!     JSON and SSE-framed replies, and turns HTTP errors into JSON-RPC errors.
//! *   **Session affinity** ([`SessionManager`]): the `mcp-session-id` issued on
//!     `initialize` is echoed on every later request.
//! *   **Bootstrap**: after the first `initialize`, the bridge fetches
//!     `tools/list` (id `9999`) on its own and forwards the reply.
//! *   **Heartbeat**: a background task that only logs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mcp_stdio_bridge::{BridgeConfig, HttpTransport, StdioBridge, spawn_heartbeat};
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BridgeConfig::from_env()?;
//!     let heartbeat = spawn_heartbeat(config.heartbeat_interval);
//!
//!     let transport = HttpTransport::new(config.url.clone())?;
//!     let mut bridge = StdioBridge::new(transport, &config);
//!     bridge
//!         .run(BufReader::new(tokio::io::stdin()), &mut tokio::io::stdout())
//!         .await?;
//!
//!     heartbeat.abort();
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod envelope;
pub mod error;
pub mod liveness;
pub mod logging;
pub mod session;
pub mod sse;
pub mod transport;

pub use bootstrap::{BootstrapError, BootstrapState, TOOLS_LIST_SENTINEL_ID};
pub use bridge::StdioBridge;
pub use config::BridgeConfig;
pub use envelope::{INTERNAL_ERROR, ResponseEnvelope};
pub use error::{BridgeError, Result};
pub use liveness::spawn_heartbeat;
pub use session::SessionManager;
pub use transport::{Exchange, HttpTransport, MCP_SESSION_ID_HEADER, McpTransport};
