use std::sync::Once;

use docgen_core::{
    update, AppState, ControllerOptions, Effect, IntegrationMode, Msg, ProcessingStatus, Screen,
    ValidationError, GENERIC_FAILURE_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docgen_logging::initialize_for_tests);
}

fn sync_options() -> ControllerOptions {
    ControllerOptions {
        mode: IntegrationMode::Synchronous,
        ..ControllerOptions::default()
    }
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

#[test]
fn valid_url_issues_exactly_one_generate() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "  https://github.com/octocat/Hello-World \n");

    assert_eq!(*state.status(), ProcessingStatus::Requesting);
    assert_eq!(state.validation_error(), None);
    assert_eq!(
        effects,
        vec![Effect::Generate {
            repo_url: "https://github.com/octocat/Hello-World".to_string(),
        }]
    );
    assert_eq!(state.view().screen, Screen::Form { submitting: true });
    assert!(state.consume_dirty());

    // A second click while the request is in flight is ignored.
    let (mut state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn missing_scheme_is_rejected_without_network_call() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "github.com/octocat/Hello-World");

    assert!(effects.is_empty());
    assert_eq!(*state.status(), ProcessingStatus::Idle);
    assert_eq!(
        state.validation_error(),
        Some(ValidationError::NotGithubRepo)
    );
    assert_eq!(
        state.view().validation_error.as_deref(),
        Some("Please enter a valid GitHub repository URL (https://github.com/owner/repo)")
    );
}

#[test]
fn empty_input_is_rejected() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "   ");
    assert!(effects.is_empty());
    assert_eq!(state.validation_error(), Some(ValidationError::Empty));
}

#[test]
fn editing_clears_validation_error() {
    init_logging();
    let (state, _) = submit(AppState::new(), "not a url");
    assert!(state.validation_error().is_some());

    let (state, _) = update(state, Msg::InputChanged("https://github.com/o/r".to_string()));
    assert_eq!(state.validation_error(), None);
    assert_eq!(state.repo_url(), "https://github.com/o/r");
}

#[test]
fn input_is_frozen_once_submitted() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://github.com/o/r");
    let (state, _) = update(state, Msg::InputChanged("something else".to_string()));
    assert_eq!(state.repo_url(), "https://github.com/o/r");
}

#[test]
fn synchronous_success_completes_without_polling() {
    init_logging();
    let (state, _) = submit(AppState::with_options(sync_options()), "https://github.com/o/r");
    let (state, effects) = update(
        state,
        Msg::GenerateResponded {
            docs_url: Some("https://docs.example.com/r".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        *state.status(),
        ProcessingStatus::Completed {
            docs_url: Some("https://docs.example.com/r".to_string())
        }
    );

    let (_state, effects) = update(state, Msg::ViewDocsClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenDocs {
            url: "https://docs.example.com/r".to_string()
        }]
    );
}

#[test]
fn view_docs_falls_back_to_default_location() {
    init_logging();
    let options = ControllerOptions {
        default_docs_url: Some("http://localhost:3001".to_string()),
        ..sync_options()
    };
    let (state, _) = submit(AppState::with_options(options), "https://github.com/o/r");
    let (state, _) = update(state, Msg::GenerateResponded { docs_url: None });

    match state.view().screen {
        Screen::Done {
            docs_url, can_open, ..
        } => {
            assert_eq!(docs_url.as_deref(), Some("http://localhost:3001"));
            assert!(can_open);
        }
        other => panic!("unexpected screen {other:?}"),
    }

    let (_state, effects) = update(state, Msg::ViewDocsClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenDocs {
            url: "http://localhost:3001".to_string()
        }]
    );
}

#[test]
fn view_docs_without_any_location_is_noop() {
    init_logging();
    let (state, _) = submit(AppState::with_options(sync_options()), "https://github.com/o/r");
    let (state, _) = update(state, Msg::GenerateResponded { docs_url: None });
    let (_state, effects) = update(state, Msg::ViewDocsClicked);
    assert!(effects.is_empty());
}

#[test]
fn generate_failure_fails_without_polling() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://github.com/o/r");
    let (state, effects) = update(
        state,
        Msg::GenerateFailed {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().screen,
        Screen::Error {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            steps: None,
        }
    );
}

#[test]
fn retry_restores_initial_state() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://github.com/o/r");
    let (state, _) = update(
        state,
        Msg::GenerateFailed {
            message: "boom".to_string(),
        },
    );
    let (mut state, effects) = update(state, Msg::RetryClicked);

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(*state.status(), ProcessingStatus::Idle);
    assert_eq!(state.view(), AppState::new().view());
}

#[test]
fn retry_can_keep_input_text() {
    init_logging();
    let options = ControllerOptions {
        keep_input_on_retry: true,
        ..ControllerOptions::default()
    };
    let (state, _) = submit(AppState::with_options(options), "https://github.com/o/r");
    let (state, _) = update(
        state,
        Msg::GenerateFailed {
            message: "boom".to_string(),
        },
    );
    let (state, _) = update(state, Msg::RetryClicked);

    assert_eq!(*state.status(), ProcessingStatus::Idle);
    assert_eq!(state.repo_url(), "https://github.com/o/r");
    assert!(state.options().keep_input_on_retry);
}

#[test]
fn late_generate_response_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::GenerateResponded { docs_url: None });
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (next, effects) = update(
        state.clone(),
        Msg::GenerateFailed {
            message: "x".to_string(),
        },
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
