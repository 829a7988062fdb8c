use docgen_core::{AppViewModel, Screen, StepRowView, StepStatus};

use super::constants::*;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    match &view.screen {
        Screen::Form { submitting: false } => {
            lines.push(TITLE.to_string());
            if !view.repo_url.trim().is_empty() {
                lines.push(format!("Repository: {}", view.repo_url.trim()));
            }
            if let Some(error) = &view.validation_error {
                lines.push(format!("  ! {error}"));
            }
            lines.push("Enter https://github.com/<owner>/<repo> ('help' for commands)".to_string());
        }
        Screen::Form { submitting: true } => {
            lines.push(format!("Submitting {} ...", view.repo_url.trim()));
        }
        Screen::Progress { steps } => {
            lines.push("Generating documentation".to_string());
            lines.extend(steps.iter().map(format_step_row));
        }
        Screen::Done {
            docs_url,
            can_open,
            steps,
        } => {
            lines.push("Documentation ready".to_string());
            lines.extend(steps.iter().map(format_step_row));
            match docs_url {
                Some(url) if *can_open => {
                    lines.push(format!("View docs: {url} (type 'open')"));
                }
                _ => lines.push("The backend did not return a documentation link.".to_string()),
            }
        }
        Screen::Error { message, steps } => {
            if let Some(steps) = steps {
                lines.extend(steps.iter().map(format_step_row));
            }
            lines.push(format!("Error: {message}"));
            lines.push("Type 'retry' to try again.".to_string());
        }
    }

    lines
}

fn format_step_row(step: &StepRowView) -> String {
    format!(
        "{icon} {number}. {label}",
        icon = status_icon(step.status),
        number = step.index + 1,
        label = step.label
    )
}

fn status_icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => ICON_PENDING,
        StepStatus::Active => ICON_ACTIVE,
        StepStatus::Completed => ICON_COMPLETED,
        StepStatus::Failed => ICON_FAILED,
    }
}
