// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};

use crate::services::Msg;

/// Periodically asks the watch loop to resync with the server, so a session
/// started or stopped elsewhere (another terminal, the web UI) shows up
/// without user action.
pub async fn run_poller(tx: Sender<Msg>, interval: Duration) {
    tracing::info!("poller started ({}s interval)", interval.as_secs());

    loop {
        sleep(interval).await;

        if tx.send(Msg::Resync).await.is_err() {
            tracing::warn!("poller stopping (receiver dropped)");
            break;
        }
    }
}
