use std::time::Duration;

use docgen_logging::{docgen_debug, docgen_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{BackendError, FailureKind, GenerateResponse, PayloadKey, StatusResponse};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub generate_path: String,
    pub status_path: String,
    pub payload_key: PayloadKey,
    pub connect_timeout: Duration,
    /// Generation may block for the whole pipeline in synchronous mode.
    pub generate_timeout: Duration,
    pub status_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            generate_path: "/generate".to_string(),
            status_path: "/status".to_string(),
            payload_key: PayloadKey::SnakeCase,
            connect_timeout: Duration::from_secs(10),
            generate_timeout: Duration::from_secs(600),
            status_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(2000),
        }
    }
}

impl BackendSettings {
    pub fn generate_url(&self) -> Result<Url, BackendError> {
        endpoint_url(&self.base_url, &self.generate_path)
    }

    pub fn status_url(&self) -> Result<Url, BackendError> {
        endpoint_url(&self.base_url, &self.status_path)
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn generate(&self, repo_url: &str) -> Result<GenerateResponse, BackendError>;

    async fn status(&self) -> Result<StatusResponse, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
    generate_url: Url,
    status_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let generate_url = settings.generate_url()?;
        let status_url = settings.status_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            client,
            generate_url,
            status_url,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn generate(&self, repo_url: &str) -> Result<GenerateResponse, BackendError> {
        let mut payload = serde_json::Map::new();
        payload.insert(
            self.settings.payload_key.field_name().to_string(),
            serde_json::Value::String(repo_url.to_string()),
        );
        let body = serde_json::to_vec(&payload)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))?;

        docgen_info!("POST {} repo_url={}", self.generate_url, repo_url);
        let response = self
            .client
            .post(self.generate_url.clone())
            .timeout(self.settings.generate_timeout)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = read_success_body(response).await?;
        // An acknowledgement may come back without a body.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(GenerateResponse::default());
        }
        decode_json(&bytes)
    }

    async fn status(&self) -> Result<StatusResponse, BackendError> {
        docgen_debug!("GET {}", self.status_url);
        let response = self
            .client
            .get(self.status_url.clone())
            .timeout(self.settings.status_timeout)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = read_success_body(response).await?;
        decode_json(&bytes)
    }
}

fn endpoint_url(base_url: &str, path: &str) -> Result<Url, BackendError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    Ok(bytes.to_vec())
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(bytes).map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
