// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::session::Session;

/// The part of an active session the ticker captures: which session it is
/// displaying and the server-issued start it recomputes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTimer {
    pub session_id: String,
    pub start: Option<DateTime<Utc>>,
}

impl From<&Session> for ActiveTimer {
    fn from(s: &Session) -> Self {
        Self {
            session_id: s.id.clone(),
            start: s.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One-second heartbeat while the watch loop is alive.
    Tick {
        now: DateTime<Utc>,
    },

    /// A resync completed and the store applied a fresh snapshot.
    /// `active` is the snapshot's resolved active session, or none.
    SnapshotApplied {
        active: Option<ActiveTimer>,
        now: DateTime<Utc>,
    },

    /// The view is going away; drop the running capture.
    Detach {
        now: DateTime<Utc>,
    },
}

impl Event {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Event::Tick { now }
            | Event::SnapshotApplied { now, .. }
            | Event::Detach { now } => *now,
        }
    }
}
