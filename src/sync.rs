// Author: Dustin Pilgrim
// License: MIT

use crate::api::SessionApi;
use crate::core::error::Error;
use crate::core::session::{Project, Session};
use crate::core::store::{SessionStore, Snapshot};

/// Reconciles the local store with server truth.
///
/// The remote list is the only source of truth: every command ends with a
/// fresh fetch and a wholesale store rebuild, never an optimistic local
/// mutation. Commands take `&mut self`, and the watch loop is the single
/// owner, so a second start/stop cannot even be issued while one is still
/// in flight; that is the double-submission guard.
pub struct SessionSync<A: SessionApi> {
    api: A,
    store: SessionStore,
    fetch_seq: u64,
}

impl<A: SessionApi> SessionSync<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: SessionStore::new(),
            fetch_seq: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub async fn projects(&self) -> Result<Vec<Project>, Error> {
        self.api.list_projects().await
    }

    /// Re-fetches the session list and rebuilds the store from it.
    ///
    /// Fails soft: on any remote failure the previous snapshot stays as it
    /// was (stale-but-present beats blank) and the error goes back to the
    /// caller for display. The token is drawn after the response resolves,
    /// so whichever fetch resolves last wins and late stale applies are
    /// discarded by the store.
    pub async fn refresh(&mut self) -> Result<Snapshot, Error> {
        match self.api.list_sessions().await {
            Ok(list) => {
                self.fetch_seq += 1;
                self.store.replace(list, self.fetch_seq);
                Ok(self.store.snapshot())
            }
            Err(e) => {
                tracing::warn!("resync failed, keeping previous sessions: {e}");
                Err(e)
            }
        }
    }

    /// Starts tracking against `project_id` and resyncs.
    ///
    /// An already-running session is the server's call to reject (it owns
    /// the at-most-one-active invariant); we surface its conflict as-is and
    /// never create a local session ourselves.
    pub async fn start(&mut self, project_id: &str) -> Result<Session, Error> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(Error::Validation("select a project first".to_string()));
        }

        let session = self.api.start_session(project_id).await?;
        let _ = self.refresh().await;

        Ok(session)
    }

    /// Stops the active session as tracked in the store and resyncs.
    ///
    /// With nothing active locally there is no session id to send, so that
    /// is a conflict up front. A server-side "already stopped" conflict is
    /// success for our purposes (idempotent stop) followed by a resync.
    pub async fn stop(&mut self) -> Result<Session, Error> {
        let Some(active) = self.store.active().cloned() else {
            return Err(Error::Conflict("no session is running".to_string()));
        };

        match self.api.stop_session(&active.id).await {
            Ok(session) => {
                let _ = self.refresh().await;
                Ok(session)
            }
            Err(Error::Conflict(msg)) => {
                tracing::info!("stop: server says already stopped ({msg}); resyncing");
                let _ = self.refresh().await;
                Ok(active)
            }
            Err(e) => Err(e),
        }
    }
}
