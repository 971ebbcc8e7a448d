// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::SessionApi;
use crate::api::wire::{Envelope, ProjectDto, SessionDto, StartRequest, StopRequest};
use crate::core::error::Error;
use crate::core::session::{Project, Session};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed implementation of the backend contract.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        tracing::debug!("GET {path}");
        let resp = self.with_auth(self.http.get(self.url(path))).send().await?;
        decode(resp).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        tracing::debug!("POST {path}");
        let resp = self
            .with_auth(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(map_error(status, &body));
    }

    unwrap_envelope(status, &body)
}

/// Maps a non-2xx status and body to the error taxonomy.
///
/// 409 is a session-state conflict (start while one runs, stop on a stopped
/// session); 400/422 are validation rejections; everything else is a server
/// error. The message comes from the body's envelope when there is one.
fn map_error(status: StatusCode, body: &str) -> Error {
    let message = error_message(body, status);

    match status {
        StatusCode::CONFLICT => Error::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        _ => Error::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// Unwraps a 2xx body. An envelope that says anything but "success" is a
/// server error carrying the envelope message.
fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, Error> {
    let env: Envelope<T> = serde_json::from_str(body).map_err(|e| Error::Server {
        status: status.as_u16(),
        message: format!("malformed response: {e}"),
    })?;

    if !env.is_success() {
        return Err(Error::Server {
            status: status.as_u16(),
            message: env
                .message
                .unwrap_or_else(|| "request failed".to_string()),
        });
    }

    env.data.ok_or_else(|| Error::Server {
        status: status.as_u16(),
        message: "response carried no data".to_string(),
    })
}

fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[async_trait]
impl SessionApi for HttpApi {
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let dtos: Vec<ProjectDto> = self.get_json("/projects/sorted-by-end-date").await?;
        Ok(dtos.into_iter().map(Project::from).collect())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, Error> {
        let dtos: Vec<SessionDto> = self.get_json("/time-sessions").await?;
        Ok(dtos.into_iter().map(Session::from).collect())
    }

    async fn start_session(&self, project_id: &str) -> Result<Session, Error> {
        let dto: SessionDto = self
            .post_json("/time-sessions/start", &StartRequest { project_id })
            .await?;
        Ok(dto.into())
    }

    async fn stop_session(&self, session_id: &str) -> Result<Session, Error> {
        let dto: SessionDto = self
            .post_json("/time-sessions/stop", &StopRequest { session_id })
            .await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAIL_BODY: &str = r#"{ "status": "error", "message": "session already stopped" }"#;

    #[test]
    fn conflict_status_maps_to_conflict() {
        let err = map_error(StatusCode::CONFLICT, FAIL_BODY);
        match err {
            Error::Conflict(msg) => assert_eq!(msg, "session already stopped"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn validation_statuses_map_to_validation() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY] {
            let err = map_error(status, r#"{ "status": "error", "message": "project_id required" }"#);
            match err {
                Error::Validation(msg) => assert_eq!(msg, "project_id required"),
                other => panic!("expected validation for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn other_failures_map_to_server_with_status() {
        let err = map_error(StatusCode::INTERNAL_SERVER_ERROR, "not even json");
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 500);
                // No envelope to pull a message from; the canonical reason stands in.
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn success_envelope_unwraps_data() {
        let body = r#"{ "status": "success", "data": [1, 2, 3] }"#;
        let data: Vec<u32> = unwrap_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn failure_envelope_on_2xx_is_a_server_error_with_its_message() {
        let err = unwrap_envelope::<Vec<u32>>(StatusCode::OK, FAIL_BODY).unwrap_err();
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "session already stopped");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_and_dataless_bodies_are_server_errors() {
        let err = unwrap_envelope::<Vec<u32>>(StatusCode::OK, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Server { .. }));

        let err =
            unwrap_envelope::<Vec<u32>>(StatusCode::OK, r#"{ "status": "success" }"#).unwrap_err();
        match err {
            Error::Server { message, .. } => assert_eq!(message, "response carried no data"),
            other => panic!("expected server error, got {other:?}"),
        }
    }
}
