// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::core::session::{Project, ProjectRef, Session};
use crate::core::timefmt::parse_utc;

/// Response envelope the backend wraps everything in:
/// `{ "status": "success", "message": ..., "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Ids come back as numbers from some deployments and strings from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Text(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    pub id: WireId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionDto {
    pub id: WireId,
    #[serde(default)]
    pub project: Option<ProjectDto>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartRequest<'a> {
    pub project_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StopRequest<'a> {
    pub session_id: &'a str,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project {
            id: dto.id.into_string(),
            title: dto.title,
            description: dto.description,
            end_date: dto.end_date.as_deref().and_then(parse_utc),
        }
    }
}

impl From<SessionDto> for Session {
    fn from(dto: SessionDto) -> Self {
        Session {
            id: dto.id.into_string(),
            project: dto.project.map(|p| ProjectRef {
                id: p.id.into_string(),
                title: p.title,
                description: p.description,
            }),
            start_time: dto.start_time.as_deref().and_then(parse_utc),
            end_time: dto.end_time.as_deref().and_then(parse_utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_session_with_nested_project() {
        let raw = r#"{
            "id": 42,
            "project": { "id": 7, "title": "Website", "description": "Relaunch" },
            "start_time": "2024-03-01 08:00:00",
            "end_time": null
        }"#;

        let dto: SessionDto = serde_json::from_str(raw).unwrap();
        let session: Session = dto.into();

        assert_eq!(session.id, "42");
        assert_eq!(session.project_title(), "Website");
        assert!(session.start_time.is_some());
        assert!(session.is_active());
    }

    #[test]
    fn string_ids_and_bad_timestamps_survive() {
        let raw = r#"{ "id": "abc-1", "start_time": "not a date" }"#;

        let dto: SessionDto = serde_json::from_str(raw).unwrap();
        let session: Session = dto.into();

        assert_eq!(session.id, "abc-1");
        assert!(session.start_time.is_none());
        assert!(session.project.is_none());
    }

    #[test]
    fn envelope_reports_failure_status() {
        let raw = r#"{ "status": "error", "message": "nope", "data": null }"#;

        let env: Envelope<Vec<SessionDto>> = serde_json::from_str(raw).unwrap();
        assert!(!env.is_success());
        assert_eq!(env.message.as_deref(), Some("nope"));
        assert!(env.data.is_none());
    }
}
