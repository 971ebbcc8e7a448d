// Author: Dustin Pilgrim
// License: MIT

use std::io::Write;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;

use crate::api::client::HttpApi;
use crate::config::Config;
use crate::core::action::Action;
use crate::core::events::{ActiveTimer, Event};
use crate::core::live::LiveTicker;
use crate::core::store::Snapshot;
use crate::services::{self, Msg};
use crate::sync::SessionSync;

pub async fn run(cfg: Config) -> eyre::Result<()> {
    let api = HttpApi::new(&cfg.server, cfg.token.clone())
        .map_err(|e| eyre::eyre!("failed to build http client: {e}"))?;
    let mut sync = SessionSync::new(api);
    let mut ticker = LiveTicker::new();
    let mut label = String::from("idle");
    let mut stale = false;

    let (tx, mut rx) = mpsc::channel::<Msg>(64);
    let (shutdown_tx, mut shutdown) = watch::channel(false);

    tokio::spawn(services::ticker::run_ticker(tx.clone()));
    tokio::spawn(services::poller::run_poller(
        tx.clone(),
        Duration::from_secs(cfg.poll_seconds),
    ));

    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(true);
    });

    tracing::info!("watch started against {}", cfg.server);

    // First paint comes from server truth, not from an empty local guess.
    match sync.refresh().await {
        Ok(snap) => apply_snapshot(&mut ticker, &mut label, &snap),
        Err(e) => {
            stale = true;
            eprintln!("tempo: {e}");
        }
    }
    render(&status_line(ticker.display(), &label, stale));

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::info!("watch stopping (ctrl-c)");
                    break;
                }
            }

            maybe = rx.recv() => {
                let Some(msg) = maybe else {
                    tracing::info!("watch stopping (service channel closed)");
                    break;
                };

                match msg {
                    Msg::Tick => {
                        let actions = ticker.handle_event(Event::Tick { now: Utc::now() });
                        run_actions(&label, stale, &actions);
                    }

                    Msg::Resync => {
                        // Snapshot first, then react: the ticker only sees
                        // store state the resync actually applied. A failed
                        // resync leaves the last known state up, marked as
                        // possibly out of date.
                        match sync.refresh().await {
                            Ok(snap) => {
                                stale = false;
                                apply_snapshot(&mut ticker, &mut label, &snap);
                            }
                            Err(_) => {
                                stale = true;
                                render(&status_line(ticker.display(), &label, stale));
                            }
                        }
                    }
                }
            }
        }
    }

    // Teardown cancels the capture; the service tasks die with the channel,
    // taking any not-yet-delivered messages with them.
    ticker.handle_event(Event::Detach { now: Utc::now() });
    println!();

    Ok(())
}

fn apply_snapshot(ticker: &mut LiveTicker, label: &mut String, snap: &Snapshot) {
    if snap.inconsistent {
        tracing::warn!("server reported several open sessions; showing the most recent");
    }

    let active_id = snap.active.as_ref().map(|s| s.id.as_str());
    if ticker.running_session_id() != active_id {
        match active_id {
            Some(id) => tracing::info!("now tracking session {id}"),
            None => tracing::info!("no session running"),
        }
    }

    *label = match &snap.active {
        Some(s) => s.project_title().to_string(),
        None => "idle".to_string(),
    };

    let actions = ticker.handle_event(Event::SnapshotApplied {
        active: snap.active.as_ref().map(ActiveTimer::from),
        now: Utc::now(),
    });
    // Only called on an applied snapshot, so the display is fresh again.
    run_actions(label, false, &actions);
}

fn run_actions(label: &str, stale: bool, actions: &[Action]) {
    for action in actions {
        match action {
            Action::Publish { display } => render(&status_line(display, label, stale)),
        }
    }
}

/// One rendered status line. When the last resync failed the line says so,
/// instead of silently ticking on from a snapshot that may be out of date.
fn status_line(display: &str, label: &str, stale: bool) -> String {
    if stale {
        format!("  {display}  [{label}]  (resync failed; showing last known state)")
    } else {
        format!("  {display}  [{label}]")
    }
}

fn render(line: &str) {
    // Erase-to-end clears leftovers when the previous line was longer,
    // e.g. after the stale marker disappears.
    print!("\r{line}\x1b[K");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::status_line;

    #[test]
    fn status_line_is_plain_when_fresh() {
        assert_eq!(status_line("00:12:07", "Website", false), "  00:12:07  [Website]");
    }

    #[test]
    fn status_line_marks_failed_resync() {
        let line = status_line("00:12:07", "Website", true);
        assert!(line.starts_with("  00:12:07  [Website]"));
        assert!(line.contains("resync failed"));
        assert!(line.contains("last known state"));
    }
}
