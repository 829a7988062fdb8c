//! Docgen core: pure submission/status state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod steps;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ControllerOptions, IntegrationMode, PollSessionId, ProcessingStatus, StatusReport,
    GENERIC_FAILURE_MESSAGE,
};
pub use steps::{
    clamp_step, completed_steps, derive_step_statuses, StepStatus, STEP_COUNT, STEP_LABELS,
};
pub use update::update;
pub use validate::{validate_repo_url, RepoUrl, ValidationError};
pub use view_model::{AppViewModel, Screen, StepRowView};
