//! Bridge configuration.
//!
//! Values come from built-in defaults, then environment variables, then CLI
//! flags (applied by the binary). Numeric environment values that fail to
//! parse fall back to the default.

use crate::error::Result;
use std::time::Duration;
use url::Url;

/// Endpoint used when `MCP_URL` is not set.
pub const DEFAULT_MCP_URL: &str = "http://127.0.0.1:12306/mcp";

/// Environment variable selecting the remote endpoint.
pub const MCP_URL_ENV: &str = "MCP_URL";

pub const BOOTSTRAP_DELAY_ENV: &str = "MCP_BRIDGE_BOOTSTRAP_DELAY_MS";
pub const HEARTBEAT_ENV: &str = "MCP_BRIDGE_HEARTBEAT_SECS";

/// Pause before the automatic `tools/list`, giving the server time to finish
/// post-initialize setup.
pub const DEFAULT_BOOTSTRAP_DELAY_MS: u64 = 500;

pub const DEFAULT_HEARTBEAT_SECS: u64 = 30;

/// Configuration for the stdio bridge.
///
/// # Example
///
/// ```rust
/// use mcp_stdio_bridge::BridgeConfig;
/// use std::time::Duration;
///
/// let config = BridgeConfig {
///     bootstrap_delay: Duration::ZERO,
///     ..BridgeConfig::new("http://localhost:8080/mcp".parse().unwrap())
/// };
/// assert_eq!(config.url.port(), Some(8080));
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// MCP endpoint every message is POSTed to.
    pub url: Url,

    /// Delay between the `initialize` reply and the automatic `tools/list`.
    pub bootstrap_delay: Duration,

    /// Interval of the background liveness heartbeat.
    pub heartbeat_interval: Duration,

    /// Whether the first `initialize` triggers an automatic `tools/list`.
    pub bootstrap_enabled: bool,
}

impl BridgeConfig {
    /// Configuration for `url` with default timings.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            bootstrap_delay: Duration::from_millis(DEFAULT_BOOTSTRAP_DELAY_MS),
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            bootstrap_enabled: true,
        }
    }

    /// Configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `MCP_URL` is set to something that is not a URL.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: Url::parse(&mcp_url())?,
            bootstrap_delay: Duration::from_millis(bootstrap_delay_ms()),
            heartbeat_interval: Duration::from_secs(heartbeat_secs()),
            bootstrap_enabled: true,
        })
    }
}

/// Endpoint URL from `MCP_URL`, or the default.
pub fn mcp_url() -> String {
    url_or_default(std::env::var(MCP_URL_ENV).ok())
}

/// Bootstrap delay in milliseconds from `MCP_BRIDGE_BOOTSTRAP_DELAY_MS`.
/// Defaults to 500.
pub fn bootstrap_delay_ms() -> u64 {
    parse_u64_or(
        std::env::var(BOOTSTRAP_DELAY_ENV).ok().as_deref(),
        DEFAULT_BOOTSTRAP_DELAY_MS,
    )
}

/// Heartbeat interval in seconds from `MCP_BRIDGE_HEARTBEAT_SECS`.
/// Defaults to 30; zero is rejected because the heartbeat would spin.
pub fn heartbeat_secs() -> u64 {
    match parse_u64_or(
        std::env::var(HEARTBEAT_ENV).ok().as_deref(),
        DEFAULT_HEARTBEAT_SECS,
    ) {
        0 => DEFAULT_HEARTBEAT_SECS,
        secs => secs,
    }
}

fn url_or_default(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MCP_URL.to_string())
}

fn parse_u64_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_is_local_mcp_endpoint() {
        assert_eq!(url_or_default(None), "http://127.0.0.1:12306/mcp");
        let url = Url::parse(DEFAULT_MCP_URL).unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(12306));
        assert_eq!(url.path(), "/mcp");
    }

    #[test]
    fn env_url_overrides_default() {
        assert_eq!(
            url_or_default(Some("http://example.com:9000/mcp".to_string())),
            "http://example.com:9000/mcp"
        );
    }

    #[test]
    fn blank_env_url_falls_back_to_default() {
        assert_eq!(url_or_default(Some("   ".to_string())), DEFAULT_MCP_URL);
    }

    #[test]
    fn parse_u64_uses_default_on_missing_or_invalid() {
        assert_eq!(parse_u64_or(None, 500), 500);
        assert_eq!(parse_u64_or(Some("abc"), 500), 500);
        assert_eq!(parse_u64_or(Some("-1"), 500), 500);
        assert_eq!(parse_u64_or(Some(" 250 "), 500), 250);
    }

    #[test]
    fn new_uses_default_timings() {
        let config = BridgeConfig::new(Url::parse(DEFAULT_MCP_URL).unwrap());
        assert_eq!(config.bootstrap_delay, Duration::from_millis(500));
        assert_eq!(config.heartbeat_interval, Duration::from_secs(30));
        assert!(config.bootstrap_enabled);
    }

    #[test]
    fn config_debug_includes_url() {
        let config = BridgeConfig::new(Url::parse("http://localhost:1/mcp").unwrap());
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("BridgeConfig"));
        assert!(debug_str.contains("localhost"));
    }
}
