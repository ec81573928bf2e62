//! HTTP transport for forwarding JSON-RPC messages to an MCP server.
//!
//! Every message becomes one POST. The reply body is either plain JSON or a
//! single `event: message` SSE frame (Streamable HTTP); both are reduced to one
//! [`ResponseEnvelope`]. Non-success statuses and undecodable bodies are turned
//! into JSON-RPC error replies here, so the only `Err` a caller sees is a
//! failure to get a response at all.

use crate::envelope::{ResponseEnvelope, is_initialize, message_id};
use crate::error::Result;
use crate::sse;
use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

/// MCP Session-Id header name (per MCP spec 2025-03-26)
pub const MCP_SESSION_ID_HEADER: &str = "mcp-session-id";

const ACCEPT_JSON_OR_SSE: &str = "application/json, text/event-stream";

/// Outcome of one request/response exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    /// Decoded reply. `None` when the server accepted the message with an
    /// empty body, as it does for notifications.
    pub envelope: Option<ResponseEnvelope>,

    /// Session token issued by a successful `initialize` reply.
    pub session_id: Option<String>,
}

/// Sends one JSON-RPC message and waits for its reply.
#[async_trait]
pub trait McpTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns an error only if no response was received (connection,
    /// timeout). HTTP error statuses and undecodable bodies are reported in
    /// the envelope, alongside any session the response issued.
    async fn exchange(&self, message: &Value, session_id: Option<&str>) -> Result<Exchange>;
}

/// [`McpTransport`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(url: Url) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl McpTransport for HttpTransport {
    async fn exchange(&self, message: &Value, session_id: Option<&str>) -> Result<Exchange> {
        let mut request = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, ACCEPT_JSON_OR_SSE)
            .json(message);

        if let Some(session_id) = session_id {
            request = request.header(MCP_SESSION_ID_HEADER, session_id);
        }

        let response = request.send().await?;
        let status = response.status();

        let issued_session = if status == StatusCode::OK && is_initialize(message) {
            response
                .headers()
                .get(MCP_SESSION_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        } else {
            None
        };

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if let Some(session_id) = &issued_session {
            info!(session_id = %session_id, "initialize reply carried a session ID");
        }

        // The session is kept even if the body cannot be decoded.
        let envelope = match read_body(response, status, &content_type, message).await {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Failed to decode MCP response: {}", e);
                Some(ResponseEnvelope::internal_error(&e, message_id(message)))
            }
        };

        Ok(Exchange {
            envelope,
            session_id: issued_session,
        })
    }
}

async fn read_body(
    response: reqwest::Response,
    status: StatusCode,
    content_type: &str,
    message: &Value,
) -> Result<Option<ResponseEnvelope>> {
    let body = response.text().await?;
    debug!(
        status = status.as_u16(),
        content_type = %content_type,
        body_len = body.len(),
        "Received MCP response"
    );
    decode_response(status, content_type, &body, message)
}

/// Whether a status counts as a successful exchange.
pub fn is_success_status(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::ACCEPTED
}

/// Decode an HTTP response into a reply for `message`.
///
/// - 200/202 with a JSON content type: the body parsed as JSON.
/// - 200/202 otherwise: the first `data: ` payload of an `event: message`
///   frame, or the raw text if the body is not framed that way.
/// - Any other status: a JSON-RPC error carrying the status and body.
///
/// An empty success body yields `None`.
///
/// # Errors
///
/// Returns an error if a body that should hold JSON does not.
pub fn decode_response(
    status: StatusCode,
    content_type: &str,
    body: &str,
    message: &Value,
) -> Result<Option<ResponseEnvelope>> {
    if !is_success_status(status) {
        error!(
            status = status.as_u16(),
            "MCP request failed: {}, error: {}", status, body
        );
        return Ok(Some(ResponseEnvelope::remote_error(
            status.as_u16(),
            body,
            message_id(message),
        )));
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    if content_type.contains("application/json") {
        return Ok(Some(ResponseEnvelope::Structured(serde_json::from_str(
            body,
        )?)));
    }

    if sse::is_message_frame(body)
        && let Some(data) = sse::first_data_payload(body)
    {
        return Ok(Some(ResponseEnvelope::Structured(serde_json::from_str(
            data,
        )?)));
    }

    Ok(Some(ResponseEnvelope::RawText(body.to_string())))
}
