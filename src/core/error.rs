// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// Failure taxonomy for remote session commands.
///
/// Each variant renders as a distinct user-facing message. `Network` is the
/// only one worth re-triggering by hand; `Validation` and `Conflict` won't
/// change until the user changes something. Multiple-active-session data
/// inconsistencies are deliberately NOT here: the store degrades to a
/// deterministic pick and a warning instead of erroring.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response, or a response envelope that reported failure.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Malformed local input; never sent to the server.
    #[error("{0}")]
    Validation(String),

    /// Start attempted while a session runs, or stop with nothing active.
    #[error("{0}")]
    Conflict(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
