// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

/// Project fields embedded in a session row. The full project list lives
/// server-side; this is only what the history display needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// One tracked interval of work time against one project.
///
/// The server assigns `id` and both instants; the client never fabricates or
/// mutates them, it only re-reads them on resync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub project: Option<ProjectRef>,

    /// Absent when the server returned an unparseable or missing start; rows
    /// like that still render (with a `--` duration) instead of failing.
    pub start_time: Option<DateTime<Utc>>,

    /// Absent while the session is running.
    pub end_time: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Label for display: the project title, falling back to the project id
    /// so an untitled project still identifies itself in tables.
    pub fn project_title(&self) -> &str {
        match &self.project {
            Some(p) => p.title.as_deref().unwrap_or(&p.id),
            None => "(untitled)",
        }
    }

    pub fn project_description(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.description.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_project(id: &str, title: Option<&str>) -> Session {
        Session {
            id: "s1".to_string(),
            project: Some(ProjectRef {
                id: id.to_string(),
                title: title.map(str::to_string),
                description: None,
            }),
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn project_label_prefers_title_then_id() {
        assert_eq!(
            session_with_project("7", Some("Website")).project_title(),
            "Website"
        );
        assert_eq!(session_with_project("7", None).project_title(), "7");
    }

    #[test]
    fn session_without_project_is_untitled() {
        let s = Session {
            id: "s1".to_string(),
            project: None,
            start_time: None,
            end_time: None,
        };
        assert_eq!(s.project_title(), "(untitled)");
        assert_eq!(s.project_description(), "");
    }
}
