//! Server-sent event decoding for MCP response bodies.
//!
//! Streamable HTTP servers may answer a POST with a `text/event-stream` body
//! instead of plain JSON. The bridge expects exactly one reply per request, so
//! decoding reduces to finding the first `data: ` payload of a `message` event.

/// Marker a framed response body starts with.
pub const MESSAGE_EVENT_MARKER: &str = "event: message";

const DATA_PREFIX: &str = "data: ";

/// Returns true if a response body carries `event: message` framing.
pub fn is_message_frame(body: &str) -> bool {
    body.starts_with(MESSAGE_EVENT_MARKER)
}

/// Extract the payload of the first `data: ` line in a framed body.
///
/// Only lines with the exact `data: ` prefix count; `data:` without the space
/// is not recognised.
pub fn first_data_payload(body: &str) -> Option<&str> {
    body.trim()
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .find_map(|line| line.strip_prefix(DATA_PREFIX))
}
