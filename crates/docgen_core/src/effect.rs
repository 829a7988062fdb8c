#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Generate { repo_url: String },
    StartPolling { session: crate::PollSessionId },
    StopPolling { session: crate::PollSessionId },
    OpenDocs { url: String },
}
