use crate::steps::{clamp_step, STEP_COUNT};
use crate::{
    validate_repo_url, AppState, Effect, IntegrationMode, Msg, ProcessingStatus, StatusReport,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // The form is only editable before a submission.
            if *state.status() == ProcessingStatus::Idle {
                state.set_input(text);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if *state.status() != ProcessingStatus::Idle {
                return (state, Vec::new());
            }
            match validate_repo_url(state.repo_url()) {
                Ok(repo) => {
                    state.clear_validation_error();
                    state.set_status(ProcessingStatus::Requesting);
                    vec![Effect::Generate {
                        repo_url: repo.into_string(),
                    }]
                }
                Err(err) => {
                    state.set_validation_error(err);
                    Vec::new()
                }
            }
        }
        Msg::GenerateResponded { docs_url } => {
            if *state.status() != ProcessingStatus::Requesting {
                return (state, Vec::new());
            }
            match state.mode() {
                IntegrationMode::Synchronous => {
                    state.set_status(ProcessingStatus::Completed { docs_url });
                    Vec::new()
                }
                IntegrationMode::Asynchronous => {
                    let session = state.next_session();
                    state.set_status(ProcessingStatus::Polling {
                        session,
                        current_step: 0,
                    });
                    vec![Effect::StartPolling { session }]
                }
            }
        }
        Msg::GenerateFailed { message } => {
            if *state.status() == ProcessingStatus::Requesting {
                state.set_status(ProcessingStatus::Failed {
                    message,
                    failed_step: None,
                });
            }
            Vec::new()
        }
        Msg::StatusReceived { session, report } => apply_status(&mut state, session, report),
        Msg::StatusFetchFailed { .. } => Vec::new(),
        Msg::RetryClicked => {
            if matches!(state.status(), ProcessingStatus::Failed { .. }) {
                state.reset();
            }
            Vec::new()
        }
        Msg::ViewDocsClicked => match state.status() {
            ProcessingStatus::Completed { docs_url } => docs_url
                .clone()
                .or_else(|| state.options().default_docs_url.clone())
                .map(|url| vec![Effect::OpenDocs { url }])
                .unwrap_or_default(),
            _ => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_status(
    state: &mut AppState,
    session: crate::PollSessionId,
    report: StatusReport,
) -> Vec<Effect> {
    let current_step = match state.status() {
        ProcessingStatus::Polling {
            session: active,
            current_step,
        } if *active == session => *current_step,
        // Late answer from a session that already ended.
        _ => return Vec::new(),
    };

    if let Some(message) = report.error {
        let failed_step = match report.current_step {
            Some(_) => clamp_step(report.current_step, STEP_COUNT),
            None => current_step,
        };
        state.set_status(ProcessingStatus::Failed {
            message,
            failed_step: Some(failed_step),
        });
        return vec![Effect::StopPolling { session }];
    }

    if report.completed {
        state.set_status(ProcessingStatus::Completed {
            docs_url: report.docs_url,
        });
        return vec![Effect::StopPolling { session }];
    }

    let next_step = match report.current_step {
        Some(_) => clamp_step(report.current_step, STEP_COUNT),
        None => current_step,
    };
    if next_step != current_step {
        state.set_status(ProcessingStatus::Polling {
            session,
            current_step: next_step,
        });
    }
    Vec::new()
}
