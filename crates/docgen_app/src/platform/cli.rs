use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use docgen_logging::LogDestination;

use super::config::ModeSetting;

#[derive(Parser, Debug)]
#[command(
    name = "docgen",
    version,
    about = "Generate API documentation for a GitHub repository"
)]
pub struct Args {
    /// RON configuration file. Defaults to ./docgen.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, value_enum)]
    pub mode: Option<ModeSetting>,
    /// Documentation location opened when the backend returns none.
    #[arg(long)]
    pub docs_url: Option<String>,
    /// Submit this repository right away and exit once it finishes.
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
    #[arg(long, default_value = "docgen.log")]
    pub log_file: PathBuf,
    /// off, error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
    /// Print the documentation link instead of launching a viewer.
    #[arg(long)]
    pub no_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }
}
