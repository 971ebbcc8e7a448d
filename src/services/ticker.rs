// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};

use crate::services::Msg;

/// The single tick source for the watch loop. One of these runs for the
/// loop's whole lifetime; whether a tick does anything is the state
/// machine's decision, not a timer-handle juggling act here.
pub async fn run_ticker(tx: Sender<Msg>) {
    tracing::info!("ticker started");

    loop {
        sleep(Duration::from_secs(1)).await;

        // If the watch loop is gone, stop.
        if tx.send(Msg::Tick).await.is_err() {
            tracing::warn!("ticker stopping (receiver dropped)");
            break;
        }
    }
}
