use docgen_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Anything that is not a keyword is taken as the repository URL.
    Submit(String),
    Open,
    Retry,
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> UserCommand {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "open" | "o" => UserCommand::Open,
        "retry" | "r" => UserCommand::Retry,
        "help" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        _ => UserCommand::Submit(trimmed.to_string()),
    }
}

impl UserCommand {
    /// Controller messages for this command; empty for commands the front end
    /// handles itself.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            UserCommand::Submit(text) => vec![Msg::InputChanged(text), Msg::SubmitClicked],
            UserCommand::Open => vec![Msg::ViewDocsClicked],
            UserCommand::Retry => vec![Msg::RetryClicked],
            UserCommand::Help | UserCommand::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_line(" OPEN \n"), UserCommand::Open);
        assert_eq!(parse_line("r"), UserCommand::Retry);
        assert_eq!(parse_line("?"), UserCommand::Help);
        assert_eq!(parse_line("Exit"), UserCommand::Quit);
    }

    #[test]
    fn other_input_is_submitted_trimmed() {
        assert_eq!(
            parse_line("  https://github.com/o/r \n"),
            UserCommand::Submit("https://github.com/o/r".to_string())
        );
        assert_eq!(parse_line("\n"), UserCommand::Submit(String::new()));
    }

    #[test]
    fn submit_edits_then_clicks() {
        assert_eq!(
            UserCommand::Submit("x".to_string()).into_msgs(),
            vec![Msg::InputChanged("x".to_string()), Msg::SubmitClicked]
        );
        assert!(UserCommand::Quit.into_msgs().is_empty());
    }
}
