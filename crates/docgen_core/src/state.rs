use crate::steps::{completed_steps, derive_step_statuses, STEP_COUNT, STEP_LABELS};
use crate::validate::ValidationError;
use crate::view_model::{AppViewModel, Screen, StepRowView};

pub type PollSessionId = u64;

/// Shown for any Generate failure; the transport detail only goes to the log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate documentation. Please try again.";

/// How the backend reports the outcome of a Generate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMode {
    /// The Generate response is the final result.
    Synchronous,
    /// The Generate response only acknowledges the job; progress comes from
    /// polling the status endpoint.
    #[default]
    Asynchronous,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    pub mode: IntegrationMode,
    /// Opened by "view docs" when the backend does not return a location.
    pub default_docs_url: Option<String>,
    /// Keep the URL text when resetting after a failure.
    pub keep_input_on_retry: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Requesting,
    Polling {
        session: PollSessionId,
        current_step: usize,
    },
    Completed {
        docs_url: Option<String>,
    },
    Failed {
        message: String,
        failed_step: Option<usize>,
    },
}

impl ProcessingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProcessingStatus::Completed { .. } | ProcessingStatus::Failed { .. }
        )
    }
}

/// One status endpoint response, already decoded by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusReport {
    pub status: Option<String>,
    pub current_step: Option<i64>,
    pub completed: bool,
    pub docs_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    options: ControllerOptions,
    repo_url: String,
    validation_error: Option<ValidationError>,
    status: ProcessingStatus,
    last_session: PollSessionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ControllerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn mode(&self) -> IntegrationMode {
        self.options.mode
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    pub fn status(&self) -> &ProcessingStatus {
        &self.status
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match &self.status {
            ProcessingStatus::Idle => Screen::Form { submitting: false },
            ProcessingStatus::Requesting => Screen::Form { submitting: true },
            ProcessingStatus::Polling { current_step, .. } => Screen::Progress {
                steps: step_rows(&derive_step_statuses(*current_step, STEP_COUNT, false)),
            },
            ProcessingStatus::Completed { docs_url } => {
                let target = docs_url
                    .clone()
                    .or_else(|| self.options.default_docs_url.clone());
                Screen::Done {
                    can_open: target.is_some(),
                    docs_url: target,
                    steps: step_rows(&completed_steps(STEP_COUNT)),
                }
            }
            ProcessingStatus::Failed {
                message,
                failed_step,
            } => Screen::Error {
                message: message.clone(),
                steps: failed_step
                    .map(|step| step_rows(&derive_step_statuses(step, STEP_COUNT, true))),
            },
        };

        AppViewModel {
            screen,
            repo_url: self.repo_url.clone(),
            validation_error: self.validation_error.map(|err| err.to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.repo_url = text;
        self.validation_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_validation_error(&mut self, error: ValidationError) {
        self.validation_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: ProcessingStatus) {
        self.status = status;
        self.mark_dirty();
    }

    pub(crate) fn clear_validation_error(&mut self) {
        self.validation_error = None;
    }

    pub(crate) fn next_session(&mut self) -> PollSessionId {
        self.last_session += 1;
        self.last_session
    }

    /// Back to the state of a fresh start, keeping options and the session
    /// counter so late events from an old session never match a new one.
    pub(crate) fn reset(&mut self) {
        let repo_url = if self.options.keep_input_on_retry {
            std::mem::take(&mut self.repo_url)
        } else {
            String::new()
        };
        *self = Self {
            options: std::mem::take(&mut self.options),
            repo_url,
            last_session: self.last_session,
            dirty: true,
            ..Self::default()
        };
    }
}

fn step_rows(statuses: &[crate::StepStatus]) -> Vec<StepRowView> {
    STEP_LABELS
        .iter()
        .zip(statuses)
        .enumerate()
        .map(|(index, (label, status))| StepRowView {
            index,
            label: (*label).to_string(),
            status: *status,
        })
        .collect()
}
