// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::action::Action;
use crate::core::events::Event;
use crate::core::timefmt::{self, ZERO_ELAPSED};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunningTimer {
    session_id: String,
    /// Server-issued start instant. Every recomputation goes back to this,
    /// so delayed ticks cannot accumulate drift.
    start: Option<DateTime<Utc>>,
}

/// Live elapsed-time display as an explicit state machine.
///
/// Idle (no capture) or Running (one capture). There is exactly one running
/// slot and the watch loop owns exactly one tick source, so a session swap
/// replaces the capture atomically; there is no interval handle to "clear
/// if exists".
#[derive(Debug)]
pub struct LiveTicker {
    running: Option<RunningTimer>,
    display: String,
}

impl LiveTicker {
    pub fn new() -> Self {
        Self {
            running: None,
            display: ZERO_ELAPSED.to_string(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn running_session_id(&self) -> Option<&str> {
        self.running.as_ref().map(|r| r.session_id.as_str())
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Action> {
        let now = event.now();

        match event {
            Event::Tick { .. } => match &self.running {
                Some(run) => {
                    let display = timefmt::format_elapsed(run.start, None, now);
                    self.publish(display)
                }
                // Ticks while idle publish nothing.
                None => Vec::new(),
            },

            Event::SnapshotApplied { active, .. } => match active {
                Some(timer) => {
                    // Publish immediately; the next tick is up to a second away.
                    let display = timefmt::format_elapsed(timer.start, None, now);

                    self.running = Some(RunningTimer {
                        session_id: timer.session_id,
                        start: timer.start,
                    });

                    self.publish(display)
                }

                None => self.reset(),
            },

            Event::Detach { .. } => self.reset(),
        }
    }

    fn reset(&mut self) -> Vec<Action> {
        let was_running = self.running.take().is_some();

        if was_running || self.display != ZERO_ELAPSED {
            self.publish(ZERO_ELAPSED.to_string())
        } else {
            Vec::new()
        }
    }

    fn publish(&mut self, display: String) -> Vec<Action> {
        self.display = display.clone();
        vec![Action::Publish { display }]
    }
}

impl Default for LiveTicker {
    fn default() -> Self {
        Self::new()
    }
}
