pub const ICON_COMPLETED: &str = "[x]";
pub const ICON_ACTIVE: &str = "[>]";
pub const ICON_PENDING: &str = "[ ]";
pub const ICON_FAILED: &str = "[!]";

pub const TITLE: &str = "Generate API docs for a GitHub repository";
pub const RULE: &str = "----------------------------------------";

pub const HELP: &[&str] = &[
    "Commands:",
    "  <url>        submit https://github.com/<owner>/<repo>",
    "  open, o      open the generated documentation",
    "  retry, r     start over after a failure",
    "  help, ?      show this help",
    "  quit, q      exit",
];
