use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docgen_logging::{docgen_info, docgen_warn};
use thiserror::Error;

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::poll::{ChannelEventSink, EventSink, PollSession};
use crate::{BackendError, EngineEvent, PollSessionId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("backend configuration: {0}")]
    Backend(#[from] BackendError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Generate { repo_url: String },
    StartPolling { session: PollSessionId },
    StopPolling { session: PollSessionId },
}

/// Runs backend calls and the poll timer on a background tokio runtime.
///
/// Dropping the handle shuts the runtime down, which also cancels any poll
/// session still running.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        let poll_interval = settings.poll_interval;
        let backend = Arc::new(ReqwestBackend::new(settings)?);
        Ok(Self::with_backend(backend, poll_interval)?)
    }

    pub fn with_backend(backend: Arc<dyn Backend>, poll_interval: Duration) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("docgen-engine-rt")
            .build()?;
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        thread::Builder::new()
            .name("docgen-engine".to_string())
            .spawn(move || {
                // At most one poll session is live; replacing or clearing it
                // cancels the previous one.
                let mut poll: Option<PollSession> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Generate { repo_url } => {
                            let backend = backend.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                let result = backend.generate(&repo_url).await;
                                if let Err(err) = &result {
                                    docgen_warn!("generate failed for {}: {}", repo_url, err);
                                }
                                sink.emit(EngineEvent::GenerateCompleted(result));
                            });
                        }
                        EngineCommand::StartPolling { session } => {
                            poll = Some(PollSession::start(
                                runtime.handle(),
                                session,
                                backend.clone(),
                                poll_interval,
                                sink.clone(),
                            ));
                        }
                        EngineCommand::StopPolling { session } => {
                            if poll.as_ref().is_some_and(|p| p.session() == session) {
                                poll = None;
                            }
                        }
                    }
                }
                drop(poll);
                docgen_info!("engine command channel closed, shutting down");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, repo_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            repo_url: repo_url.into(),
        });
    }

    pub fn start_polling(&self, session: PollSessionId) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling { session });
    }

    pub fn stop_polling(&self, session: PollSessionId) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling { session });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
