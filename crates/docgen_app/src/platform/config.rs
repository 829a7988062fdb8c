use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docgen_core::{ControllerOptions, IntegrationMode};
use docgen_engine::{BackendSettings, PayloadKey};
use docgen_logging::{docgen_info, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Args;

pub const DEFAULT_CONFIG_FILENAME: &str = "docgen.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Generate returns the final result.
    Sync,
    /// Generate acknowledges; progress is polled from the status endpoint.
    #[default]
    Async,
}

impl From<ModeSetting> for IntegrationMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Sync => IntegrationMode::Synchronous,
            ModeSetting::Async => IntegrationMode::Asynchronous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub generate_path: String,
    pub status_path: String,
    pub payload_key: PayloadKey,
    pub poll_interval_ms: u64,
    pub generate_timeout_secs: u64,
    pub status_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let settings = BackendSettings::default();
        Self {
            base_url: settings.base_url,
            generate_path: settings.generate_path,
            status_path: settings.status_path,
            payload_key: settings.payload_key,
            poll_interval_ms: settings.poll_interval.as_millis() as u64,
            generate_timeout_secs: settings.generate_timeout.as_secs(),
            status_timeout_secs: settings.status_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub mode: ModeSetting,
    pub default_docs_url: Option<String>,
    pub keep_input_on_retry: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            mode: ModeSetting::default(),
            default_docs_url: None,
            keep_input_on_retry: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the file named on the command line, or `./docgen.ron` if it
    /// exists, then applies command line overrides.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let config = match &args.config {
            Some(path) => load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILENAME);
                if path.exists() {
                    load(path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_overrides(args))
    }

    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(base_url) = &args.base_url {
            self.backend.base_url = base_url.clone();
        }
        if let Some(mode) = args.mode {
            self.mode = mode;
        }
        if let Some(docs_url) = &args.docs_url {
            self.default_docs_url = Some(docs_url.clone());
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        self
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend.base_url.clone(),
            generate_path: self.backend.generate_path.clone(),
            status_path: self.backend.status_path.clone(),
            payload_key: self.backend.payload_key,
            generate_timeout: Duration::from_secs(self.backend.generate_timeout_secs),
            status_timeout: Duration::from_secs(self.backend.status_timeout_secs),
            poll_interval: Duration::from_millis(self.backend.poll_interval_ms),
            ..BackendSettings::default()
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            mode: self.mode.into(),
            default_docs_url: self.default_docs_url.clone(),
            keep_input_on_retry: self.keep_input_on_retry,
        }
    }
}

pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    docgen_info!("Loaded config from {:?}", path);
    Ok(config)
}

fn parse(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["docgen"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config = parse(
            r#"(
                backend: (
                    base_url: "http://docs-backend:8080",
                    generate_path: "/api/generate-docs",
                    payload_key: camel_case,
                ),
                mode: sync,
                default_docs_url: Some("http://localhost:3001"),
            )"#,
        )
        .unwrap();

        assert_eq!(config.backend.base_url, "http://docs-backend:8080");
        assert_eq!(config.backend.generate_path, "/api/generate-docs");
        assert_eq!(config.backend.status_path, "/status");
        assert_eq!(config.backend.payload_key, PayloadKey::CamelCase);
        assert_eq!(config.backend.poll_interval_ms, 2000);
        assert_eq!(config.mode, ModeSetting::Sync);
        assert_eq!(
            config.default_docs_url.as_deref(),
            Some("http://localhost:3001")
        );
        assert!(!config.keep_input_on_retry);

        let options = config.controller_options();
        assert_eq!(options.mode, IntegrationMode::Synchronous);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docgen.ron");
        fs::write(&path, "(backend: 42)").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");
        let argv = args(&["--config", path.to_str().unwrap()]);

        let err = AppConfig::from_args(&argv).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "{err}");
    }

    #[test]
    fn command_line_overrides_file_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docgen.ron");
        fs::write(
            &path,
            r#"(backend: (base_url: "http://from-file"), mode: sync, log_level: "warn")"#,
        )
        .unwrap();

        let argv = args(&[
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://from-cli",
            "--mode",
            "async",
            "--docs-url",
            "http://viewer",
        ]);
        let config = AppConfig::from_args(&argv).unwrap();

        assert_eq!(config.backend.base_url, "http://from-cli");
        assert_eq!(config.mode, ModeSetting::Async);
        assert_eq!(config.default_docs_url.as_deref(), Some("http://viewer"));
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn backend_settings_follow_config() {
        let mut config = AppConfig::default();
        config.backend.poll_interval_ms = 500;
        config.backend.status_timeout_secs = 3;

        let settings = config.backend_settings();
        assert_eq!(settings.poll_interval, Duration::from_millis(500));
        assert_eq!(settings.status_timeout, Duration::from_secs(3));
        assert_eq!(settings.base_url, "http://localhost:8000");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.log_level(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "loud"
        ));
    }
}
