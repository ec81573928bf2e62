//! Background heartbeat.
//!
//! Runs next to the bridge loop for the life of the process and only logs at
//! debug level. It shares no state with the bridge.

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn the heartbeat task. Abort the returned handle to stop it.
pub fn spawn_heartbeat(interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut beats: u64 = 0;
        loop {
            tokio::time::sleep(interval).await;
            beats += 1;
            debug!(beats, "MCP stdio bridge running");
        }
    })
}
