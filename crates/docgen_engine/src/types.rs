use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PollSessionId = u64;

/// Name of the repository field in the Generate request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKey {
    /// `{ "repo_url": ... }`
    #[default]
    SnakeCase,
    /// `{ "repoUrl": ... }`
    CamelCase,
}

impl PayloadKey {
    pub fn field_name(self) -> &'static str {
        match self {
            PayloadKey::SnakeCase => "repo_url",
            PayloadKey::CamelCase => "repoUrl",
        }
    }
}

/// Body of a 2xx Generate response.
///
/// In synchronous mode this is the final result; in asynchronous mode it is
/// only an acknowledgement and usually carries nothing but `status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(alias = "docsUrl")]
    pub docs_url: Option<String>,
    pub status: Option<String>,
    pub spec_path: Option<String>,
    pub routes_found: Option<u64>,
    pub rounds_used: Option<u32>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Option<String>,
    #[serde(rename = "currentStep", alias = "current_step")]
    pub current_step: Option<i64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "docsUrl", alias = "docs_url")]
    pub docs_url: Option<String>,
    pub error: Option<String>,
}

impl StatusResponse {
    /// True when the backend reported either completion or an error.
    pub fn is_terminal(&self) -> bool {
        self.completed || self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerateCompleted(Result<GenerateResponse, BackendError>),
    StatusPolled {
        session: PollSessionId,
        result: Result<StatusResponse, BackendError>,
    },
    /// The poll task for `session` has exited and will not emit again.
    PollingStopped { session: PollSessionId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
