use docgen_core::{Effect, Msg, StatusReport, GENERIC_FAILURE_MESSAGE};
use docgen_engine::{EngineEvent, EngineHandle, StatusResponse};
use docgen_logging::{docgen_debug, docgen_error, docgen_info, docgen_warn};

use super::browser;

pub struct EffectRunner {
    engine: EngineHandle,
    open_docs: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, open_docs: bool) -> Self {
        Self { engine, open_docs }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Generate { repo_url } => {
                    docgen_info!("Generate repo_url={}", repo_url);
                    self.engine.generate(repo_url);
                }
                Effect::StartPolling { session } => {
                    docgen_info!("StartPolling session={}", session);
                    self.engine.start_polling(session);
                }
                Effect::StopPolling { session } => {
                    docgen_info!("StopPolling session={}", session);
                    self.engine.stop_polling(session);
                }
                Effect::OpenDocs { url } => self.open(&url),
            }
        }
    }

    pub fn try_recv_event(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }

    fn open(&self, url: &str) {
        if !self.open_docs {
            println!("Documentation: {url}");
            return;
        }
        match browser::open_in_browser(url) {
            Ok(()) => docgen_info!("Opened {}", url),
            Err(err) => {
                docgen_error!("Failed to open {}: {}", url, err);
                println!("Could not launch a viewer. Documentation: {url}");
            }
        }
    }
}

pub fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::GenerateCompleted(Ok(response)) => {
            docgen_info!(
                "Generate ok status={:?} routes_found={:?} spec_path={:?}",
                response.status,
                response.routes_found,
                response.spec_path
            );
            for note in &response.notes {
                docgen_debug!("backend note: {}", note);
            }
            Some(Msg::GenerateResponded {
                docs_url: response.docs_url,
            })
        }
        EngineEvent::GenerateCompleted(Err(err)) => {
            docgen_warn!("Generate failed: {}", err);
            Some(Msg::GenerateFailed {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            })
        }
        EngineEvent::StatusPolled {
            session,
            result: Ok(response),
        } => Some(Msg::StatusReceived {
            session,
            report: to_report(response),
        }),
        EngineEvent::StatusPolled {
            session,
            result: Err(err),
        } => Some(Msg::StatusFetchFailed {
            session,
            message: err.to_string(),
        }),
        EngineEvent::PollingStopped { session } => {
            docgen_debug!("poll session {} ended", session);
            None
        }
    }
}

fn to_report(response: StatusResponse) -> StatusReport {
    StatusReport {
        status: response.status,
        current_step: response.current_step,
        completed: response.completed,
        docs_url: response.docs_url,
        error: response.error,
    }
}
