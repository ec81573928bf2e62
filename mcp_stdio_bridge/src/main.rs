use clap::Parser;
use mcp_stdio_bridge::{
    BridgeConfig, HttpTransport, StdioBridge, logging::init_logging, spawn_heartbeat,
};
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{error, info};
use url::Url;

/// stdio-to-HTTP bridge for MCP servers.
///
/// Reads JSON-RPC messages line by line from stdin, forwards each to an MCP
/// server over HTTP, and writes every reply as one line to stdout.
#[derive(Parser, Debug)]
#[command(name = "mcp_stdio_bridge")]
#[command(version, about)]
struct Args {
    /// MCP endpoint URL. Overrides the MCP_URL environment variable.
    #[arg(long)]
    url: Option<String>,

    /// Delay before the automatic tools/list request, in milliseconds.
    #[arg(long)]
    bootstrap_delay_ms: Option<u64>,

    /// Heartbeat log interval, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    heartbeat_secs: Option<u64>,

    /// Do not send tools/list automatically after initialize.
    #[arg(long)]
    no_bootstrap: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to a rolling file in the cache directory instead of stderr.
    #[arg(long)]
    log_to_file: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_to_file)?;

    let config = build_config(&args)?;
    info!("MCP stdio bridge starting, forwarding to {}", config.url);

    let transport = HttpTransport::new(config.url.clone())?;
    let heartbeat = spawn_heartbeat(config.heartbeat_interval);
    let mut bridge = StdioBridge::new(transport, &config);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let outcome = tokio::select! {
        result = bridge.run(stdin, &mut stdout) => Some(result),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            None
        }
    };

    heartbeat.abort();
    // Releases the HTTP connection pool.
    drop(bridge);

    match outcome {
        Some(Ok(())) => {
            info!("MCP stdio bridge stopped");
            Ok(())
        }
        Some(Err(e)) => {
            error!("Bridge stopped on input error: {}", e);
            Err(e.into())
        }
        // The stdin reader thread cannot be cancelled and would keep the
        // runtime alive on shutdown.
        None => std::process::exit(0),
    }
}

fn build_config(args: &Args) -> anyhow::Result<BridgeConfig> {
    let mut config = BridgeConfig::from_env()?;
    if let Some(url) = &args.url {
        config.url = Url::parse(url)?;
    }
    if let Some(ms) = args.bootstrap_delay_ms {
        config.bootstrap_delay = Duration::from_millis(ms);
    }
    if let Some(secs) = args.heartbeat_secs {
        config.heartbeat_interval = Duration::from_secs(secs);
    }
    if args.no_bootstrap {
        config.bootstrap_enabled = false;
    }
    Ok(config)
}
