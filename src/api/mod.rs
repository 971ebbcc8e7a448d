// Author: Dustin Pilgrim
// License: MIT

pub mod client;
pub mod wire;

use async_trait::async_trait;

use crate::core::error::Error;
use crate::core::session::{Project, Session};

/// Remote session endpoints, as a seam so tests can substitute a fake
/// backend for the reqwest client.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;
    async fn list_sessions(&self) -> Result<Vec<Session>, Error>;
    async fn start_session(&self, project_id: &str) -> Result<Session, Error>;
    async fn stop_session(&self, session_id: &str) -> Result<Session, Error>;
}
