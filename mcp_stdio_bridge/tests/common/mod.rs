//! Shared helpers for bridge integration tests.
//!
//! The remote MCP server is a `wiremock::MockServer`; the bridge reads from an
//! in-memory byte slice and writes into a `Vec<u8>`, so each test runs the
//! loop to end of input and then inspects the output lines and the requests
//! the mock received.

// Allow dead_code - these are test utilities, and rustc can't see usage across test crates
#![allow(dead_code)]

use mcp_stdio_bridge::{BridgeConfig, HttpTransport, StdioBridge};
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SESSION_ID: &str = "abc123";

/// Config pointing at `server`'s `/mcp` endpoint with no bootstrap delay.
pub fn config_for(server: &MockServer) -> BridgeConfig {
    let url = Url::parse(&format!("{}/mcp", server.uri())).expect("mock server url");
    BridgeConfig {
        bootstrap_delay: Duration::ZERO,
        ..BridgeConfig::new(url)
    }
}

pub fn bridge_for(server: &MockServer) -> StdioBridge<HttpTransport> {
    let config = config_for(server);
    let transport = HttpTransport::new(config.url.clone()).expect("transport");
    StdioBridge::new(transport, &config)
}

/// Run `bridge` over `input` until end of input; return the output lines.
pub async fn run_lines(bridge: &mut StdioBridge<HttpTransport>, input: &str) -> Vec<String> {
    let mut out = Vec::new();
    bridge
        .run(input.as_bytes(), &mut out)
        .await
        .expect("bridge run");
    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(String::from)
        .collect()
}

pub fn parse_lines(lines: &[String]) -> Vec<Value> {
    lines
        .iter()
        .map(|l| serde_json::from_str(l).expect("output line is JSON"))
        .collect()
}

pub fn initialize_line(id: i64) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": "initialize", "params": {}}).to_string()
}

pub fn request_line(id: i64, method: &str) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": method}).to_string()
}

pub fn join_lines(lines: &[String]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}

/// Mount an `initialize` handler that issues `session_id`.
pub async fn mount_initialize(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({"method": "initialize"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("mcp-session-id", session_id)
                .set_body_json(json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": {
                        "protocolVersion": "2025-03-26",
                        "capabilities": {"tools": {}},
                        "serverInfo": {"name": "mock", "version": "1.0"}
                    }
                })),
        )
        .mount(server)
        .await;
}

/// Mount a `tools/list` handler answering with `tool_count` tools.
pub async fn mount_tools_list(server: &MockServer, tool_count: usize) {
    let tools: Vec<Value> = (0..tool_count)
        .map(|i| json!({"name": format!("tool_{i}"), "inputSchema": {"type": "object"}}))
        .collect();
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 9999,
            "result": {"tools": tools}
        })))
        .mount(server)
        .await;
}

/// Mount a handler for `method_name` that echoes a fixed success result.
pub async fn mount_ok(server: &MockServer, method_name: &str, result: Value) {
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({"method": method_name})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": result
        })))
        .mount(server)
        .await;
}

pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
}

pub fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

pub fn body_method(request: &Request) -> Option<String> {
    let body: Value = serde_json::from_slice(&request.body).ok()?;
    body.get("method").and_then(Value::as_str).map(String::from)
}
