use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use docgen_core::{update, AppState, AppViewModel, Effect, Msg, ProcessingStatus};
use docgen_engine::EngineHandle;
use docgen_logging::{docgen_error, docgen_info};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::{map_event, EffectRunner};
use super::ui::constants::HELP;
use super::ui::input::{parse_line, UserCommand};
use super::ui::render;

/// How long the loop waits for user input before checking engine events.
const TICK: Duration = Duration::from_millis(75);

enum LoopEvent {
    Command(UserCommand),
    InputClosed,
}

/// Why a `--repo` run stops.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OneShotEnd {
    Completed,
    Failed(String),
    Rejected(String),
}

fn one_shot_end(state: &AppState) -> Option<OneShotEnd> {
    match state.status() {
        ProcessingStatus::Completed { .. } => Some(OneShotEnd::Completed),
        ProcessingStatus::Failed { message, .. } => Some(OneShotEnd::Failed(message.clone())),
        ProcessingStatus::Idle => state
            .validation_error()
            .map(|err| OneShotEnd::Rejected(err.to_string())),
        _ => None,
    }
}

/// Runs `msgs` through `update` in order, collecting their effects.
fn apply_all(
    mut state: AppState,
    msgs: impl IntoIterator<Item = Msg>,
) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    for msg in msgs {
        let (next, more) = update(state, msg);
        state = next;
        effects.extend(more);
    }
    (state, effects)
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::from_args(&args).context("loading configuration")?;
    docgen_logging::initialize(&args.log_destination(), config.log_level()?);
    docgen_info!(
        "docgen starting: backend={} mode={:?}",
        config.backend.base_url,
        config.mode
    );

    let engine = EngineHandle::new(config.backend_settings()).context("starting engine")?;
    let runner = EffectRunner::new(engine, !args.no_open);
    let mut app = App::new(AppState::with_options(config.controller_options()), runner);

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    spawn_stdin_reader(event_tx);

    app.render(&app.state.view());
    // With --repo the run is one-shot: submit right away, stop at the end.
    let one_shot = args.repo.is_some();
    if let Some(repo) = args.repo {
        app.handle_command(UserCommand::Submit(repo));
    }

    // A rejected URL never leaves `Idle`, so check before waiting on input.
    let mut end = if one_shot {
        one_shot_end(&app.state)
    } else {
        None
    };

    while end.is_none() {
        match event_rx.recv_timeout(TICK) {
            Ok(LoopEvent::Command(UserCommand::Quit)) => break,
            // A one-shot run keeps going without stdin until the job ends.
            Ok(LoopEvent::InputClosed) if !one_shot => break,
            Ok(LoopEvent::InputClosed) => {}
            Ok(LoopEvent::Command(command)) => app.handle_command(command),
            Err(mpsc::RecvTimeoutError::Timeout) => app.dispatch(Msg::Tick),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                if !one_shot {
                    break;
                }
                thread::sleep(TICK);
            }
        }

        app.drain_engine_events();
        if one_shot {
            end = one_shot_end(&app.state);
        }
    }

    docgen_info!("docgen exiting in state {:?}", app.state.status());
    match end {
        Some(OneShotEnd::Completed) => {
            app.dispatch(Msg::ViewDocsClicked);
            Ok(())
        }
        Some(OneShotEnd::Failed(message)) => {
            docgen_error!("documentation generation failed: {}", message);
            bail!("documentation generation failed: {message}")
        }
        Some(OneShotEnd::Rejected(message)) => {
            docgen_error!("rejected repository URL: {}", message);
            bail!("rejected repository URL: {message}")
        }
        None => Ok(()),
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn handle_command(&mut self, command: UserCommand) {
        if command == UserCommand::Help {
            print_lines(HELP.iter().map(|line| line.to_string()));
            return;
        }
        self.dispatch_all(command.into_msgs());
    }

    fn drain_engine_events(&mut self) {
        while let Some(event) = self.runner.try_recv_event() {
            if let Some(msg) = map_event(event) {
                self.dispatch(msg);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.dispatch_all([msg]);
    }

    /// Applies a batch of messages and renders at most once for the batch.
    fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = Msg>) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = apply_all(state, msgs);
        if state.consume_dirty() {
            self.render(&state.view());
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn render(&self, view: &AppViewModel) {
        print_lines(render::render(view));
    }
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}

fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(LoopEvent::Command(parse_line(&line))).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use docgen_core::{ControllerOptions, IntegrationMode};

    use super::*;

    fn submit(state: AppState, text: &str) -> AppState {
        let (state, _) = apply_all(state, UserCommand::Submit(text.to_string()).into_msgs());
        state
    }

    #[test]
    fn rejected_url_ends_a_one_shot_run() {
        let state = submit(AppState::new(), "github.com/octocat/Hello-World");
        assert!(matches!(
            one_shot_end(&state),
            Some(OneShotEnd::Rejected(message)) if message.starts_with("Please enter a valid")
        ));

        let state = submit(AppState::new(), "   ");
        assert_eq!(
            one_shot_end(&state),
            Some(OneShotEnd::Rejected(
                "Please enter a GitHub repository URL".to_string()
            ))
        );
    }

    #[test]
    fn in_flight_job_keeps_a_one_shot_run_going() {
        assert_eq!(one_shot_end(&AppState::new()), None);

        let state = submit(AppState::new(), "https://github.com/octocat/Hello-World");
        assert_eq!(state.status(), &ProcessingStatus::Requesting);
        assert_eq!(one_shot_end(&state), None);

        let (state, _) = update(state, Msg::GenerateResponded { docs_url: None });
        assert!(matches!(state.status(), ProcessingStatus::Polling { .. }));
        assert_eq!(one_shot_end(&state), None);
    }

    #[test]
    fn terminal_states_end_a_one_shot_run() {
        let sync = AppState::with_options(ControllerOptions {
            mode: IntegrationMode::Synchronous,
            ..ControllerOptions::default()
        });
        let state = submit(sync, "https://github.com/octocat/Hello-World");
        let (done, _) = update(
            state.clone(),
            Msg::GenerateResponded {
                docs_url: Some("http://docs/r".to_string()),
            },
        );
        assert_eq!(one_shot_end(&done), Some(OneShotEnd::Completed));

        let (failed, _) = update(
            state,
            Msg::GenerateFailed {
                message: "boom".to_string(),
            },
        );
        assert_eq!(
            one_shot_end(&failed),
            Some(OneShotEnd::Failed("boom".to_string()))
        );
    }

    #[test]
    fn submitted_line_marks_dirty_once_for_the_batch() {
        let (mut state, effects) = apply_all(
            AppState::new(),
            UserCommand::Submit("https://github.com/octocat/Hello-World".to_string()).into_msgs(),
        );
        assert_eq!(
            effects,
            vec![Effect::Generate {
                repo_url: "https://github.com/octocat/Hello-World".to_string()
            }]
        );
        assert!(state.consume_dirty());
        assert!(!state.consume_dirty());
    }
}
