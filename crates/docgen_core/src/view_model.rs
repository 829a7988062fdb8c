use crate::StepStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub repo_url: String,
    pub validation_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// URL input form; `submitting` disables it while Generate is in flight.
    Form { submitting: bool },
    Progress { steps: Vec<StepRowView> },
    Done {
        docs_url: Option<String>,
        can_open: bool,
        steps: Vec<StepRowView>,
    },
    Error {
        message: String,
        /// Present when the failure was reported while polling.
        steps: Option<Vec<StepRowView>>,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Form { submitting: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRowView {
    pub index: usize,
    pub label: String,
    pub status: StepStatus,
}
