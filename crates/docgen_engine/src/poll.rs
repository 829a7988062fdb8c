use std::sync::Arc;
use std::time::Duration;

use docgen_logging::{docgen_debug, docgen_info, docgen_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{Backend, EngineEvent, PollSessionId};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// A running status poller.
///
/// The timer lives exactly as long as this value: dropping it cancels the
/// task. The task also ends by itself after reporting a terminal response.
pub struct PollSession {
    session: PollSessionId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollSession {
    /// Starts polling on `runtime`. The first request goes out one `period`
    /// after the start, then every `period` after that.
    pub fn start(
        runtime: &Handle,
        session: PollSessionId,
        backend: Arc<dyn Backend>,
        period: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task = runtime.spawn(run_poll_loop(
            session,
            backend,
            period,
            sink,
            cancel.clone(),
        ));
        docgen_info!("poll session {} started, period {:?}", session, period);
        Self {
            session,
            cancel,
            task,
        }
    }

    pub fn session(&self) -> PollSessionId {
        self.session
    }

    /// True once the task has exited, for whatever reason.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        if !self.cancel.is_cancelled() {
            docgen_info!("poll session {} cancelled", self.session);
            self.cancel.cancel();
        }
    }
}

async fn run_poll_loop(
    session: PollSessionId,
    backend: Arc<dyn Backend>,
    period: Duration,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    // `interval_at` panics on a zero period.
    let period = period.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // An in-flight request is allowed to finish; its answer is dropped if
        // the session was cancelled meanwhile.
        let result = backend.status().await;
        if cancel.is_cancelled() {
            break;
        }

        let terminal = match &result {
            Ok(response) => {
                docgen_debug!(
                    "poll session {} step={:?} completed={} error={:?}",
                    session,
                    response.current_step,
                    response.completed,
                    response.error
                );
                response.is_terminal()
            }
            Err(err) => {
                docgen_warn!("poll session {} status fetch failed: {}", session, err);
                false
            }
        };
        sink.emit(EngineEvent::StatusPolled { session, result });
        if terminal {
            break;
        }
    }

    sink.emit(EngineEvent::PollingStopped { session });
}
