//! Docgen engine: backend HTTP client, status polling and effect execution.
mod client;
mod engine;
mod poll;
mod types;

pub use client::{Backend, BackendSettings, ReqwestBackend};
pub use engine::{EngineError, EngineHandle};
pub use poll::{ChannelEventSink, EventSink, PollSession};
pub use types::{
    BackendError, EngineEvent, FailureKind, GenerateResponse, PayloadKey, PollSessionId,
    StatusResponse,
};
