#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the repository URL input.
    InputChanged(String),
    /// User submitted the current input.
    SubmitClicked,
    /// Generate call returned 2xx. Carries the result location when the
    /// backend included one.
    GenerateResponded { docs_url: Option<String> },
    /// Generate call failed in transport or returned non-2xx.
    GenerateFailed { message: String },
    /// Status endpoint answered for a poll session.
    StatusReceived {
        session: crate::PollSessionId,
        report: crate::StatusReport,
    },
    /// A single status fetch failed; polling goes on.
    StatusFetchFailed {
        session: crate::PollSessionId,
        message: String,
    },
    /// User clicked Try Again.
    RetryClicked,
    /// User asked to open the generated documentation.
    ViewDocsClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
