// Author: Dustin Pilgrim
// License: MIT

use crate::core::session::Session;

/// Read-only projection of the store handed to the app layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Sorted most-recent-first by start instant.
    pub sessions: Vec<Session>,
    pub active: Option<Session>,

    /// True when the server list carried more than one open session.
    /// The active pick above is still deterministic (latest start wins).
    pub inconsistent: bool,
}

/// Local mirror of the remote session list.
///
/// Rebuilt wholesale on every resync; nothing here is ever advanced
/// locally. Overlapping fetches are resolved by token: whichever response
/// applies with the highest token wins, anything older is discarded.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<Session>,
    inconsistent: bool,
    applied_token: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list from a fetch that resolved with `token`.
    /// Returns false (leaving the store untouched) when a newer fetch has
    /// already been applied.
    pub fn replace(&mut self, mut sessions: Vec<Session>, token: u64) -> bool {
        if token <= self.applied_token {
            tracing::debug!(
                "store: discarding stale fetch (token {token} <= {})",
                self.applied_token
            );
            return false;
        }

        // Most recent first; ties broken by id so the active pick below is
        // deterministic for identical input. Sessions with no start sort last.
        sessions.sort_by(|a, b| {
            b.start_time
                .cmp(&a.start_time)
                .then_with(|| b.id.cmp(&a.id))
        });

        let open: Vec<&Session> = sessions.iter().filter(|s| s.is_active()).collect();

        if open.len() > 1 {
            tracing::warn!(
                "store: {} sessions have no end instant; keeping the most recent ({})",
                open.len(),
                open[0].id
            );
        }

        self.active = open.first().map(|s| (*s).clone());
        self.inconsistent = open.len() > 1;
        self.sessions = sessions;
        self.applied_token = token;

        true
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sessions: self.sessions.clone(),
            active: self.active.clone(),
            inconsistent: self.inconsistent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::timefmt::parse_utc;

    fn session(id: &str, start: &str, end: Option<&str>) -> Session {
        Session {
            id: id.to_string(),
            project: None,
            start_time: parse_utc(start),
            end_time: end.and_then(parse_utc),
        }
    }

    #[test]
    fn resolves_single_active_session() {
        let mut store = SessionStore::new();
        store.replace(
            vec![
                session("a", "2024-03-01 08:00:00", Some("2024-03-01 09:00:00")),
                session("b", "2024-03-01 10:00:00", None),
            ],
            1,
        );

        let snap = store.snapshot();
        assert_eq!(snap.active.as_ref().map(|s| s.id.as_str()), Some("b"));
        assert!(!snap.inconsistent);
    }

    #[test]
    fn no_open_session_means_no_active() {
        let mut store = SessionStore::new();
        store.replace(
            vec![session(
                "a",
                "2024-03-01 08:00:00",
                Some("2024-03-01 09:00:00"),
            )],
            1,
        );

        assert!(store.active().is_none());
        assert!(!store.snapshot().inconsistent);
    }

    #[test]
    fn two_open_sessions_pick_latest_start_deterministically() {
        let rows = vec![
            session("old", "2024-03-01 08:00:00", None),
            session("new", "2024-03-01 10:00:00", None),
        ];

        for _ in 0..3 {
            let mut store = SessionStore::new();
            store.replace(rows.clone(), 1);

            let snap = store.snapshot();
            assert_eq!(snap.active.as_ref().map(|s| s.id.as_str()), Some("new"));
            assert!(snap.inconsistent);
        }
    }

    #[test]
    fn sorts_most_recent_first_with_missing_starts_last() {
        let mut store = SessionStore::new();
        store.replace(
            vec![
                session("broken", "", Some("2024-03-01 09:00:00")),
                session("a", "2024-03-01 08:00:00", Some("2024-03-01 09:00:00")),
                session("b", "2024-03-02 08:00:00", Some("2024-03-02 09:00:00")),
            ],
            1,
        );

        let snap = store.snapshot();
        let ids: Vec<&str> = snap
            .sessions
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "broken"]);
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut store = SessionStore::new();

        // The fetch that resolved second applies first.
        assert!(store.replace(vec![session("b", "2024-03-01 10:00:00", None)], 2));

        // The one that resolved first shows up late; its token is older, so it loses.
        assert!(!store.replace(
            vec![session("a", "2024-03-01 08:00:00", None)],
            1
        ));

        assert_eq!(store.active().map(|s| s.id.as_str()), Some("b"));
    }
}
