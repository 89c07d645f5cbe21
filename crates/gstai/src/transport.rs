//! HTTP transport shared by every resource handle
//!
//! Builds authenticated requests against the configured base URL and maps
//! every outcome onto the crate error taxonomy. Resources never touch
//! reqwest directly.

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{GstaiError, Result};

/// Error body shape the service uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub(crate) struct Transport {
    http: reqwest::Client,
    config: Config,
}

impl Transport {
    pub(crate) fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GstaiError::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach auth and correlation headers and dispatch
    async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response> {
        let request_id = Uuid::new_v4().to_string();
        debug!(
            method = %method,
            path = %path,
            request_id = %request_id,
            key = %self.config.redacted_key(),
            "dispatching request"
        );

        builder
            .bearer_auth(&self.config.api_key)
            .header("X-Request-Id", request_id)
            .send()
            .await
            .map_err(map_send_error)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        let response = self.execute(method, path, builder).await?;
        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self
            .http
            .get(self.url(path))
            .query(query)
            .timeout(self.config.timeout);
        self.request_json(Method::GET, path, builder).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self
            .http
            .post(self.url(path))
            .json(body)
            .timeout(self.config.timeout);
        self.request_json(Method::POST, path, builder).await
    }

    /// Multipart POST, using the longer upload timeout
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let builder = self
            .http
            .post(self.url(path))
            .multipart(form)
            .timeout(self.config.upload_timeout);
        self.request_json(Method::POST, path, builder).await
    }

    /// GET returning the raw body bytes (report downloads)
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let builder = self
            .http
            .get(self.url(path))
            .timeout(self.config.upload_timeout);
        let response = self.execute(Method::GET, path, builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        let bytes = response.bytes().await.map_err(map_send_error)?;
        Ok(bytes.to_vec())
    }
}

/// Read the body and turn non-2xx statuses into typed errors
async fn check_status(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(map_send_error)?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(status_error(status, &body))
    }
}

fn status_error(status: StatusCode, body: &str) -> GstaiError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| snippet(body, status));
    let code = parsed.and_then(|b| b.code);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GstaiError::Authentication(message),
        StatusCode::NOT_FOUND => GstaiError::NotFound(message),
        _ => GstaiError::RemoteService {
            status: status.as_u16(),
            code,
            message,
        },
    }
}

fn map_send_error(e: reqwest::Error) -> GstaiError {
    if e.is_timeout() {
        GstaiError::Transport("request timed out".to_string())
    } else if e.is_connect() {
        GstaiError::Transport(format!("connection failed: {}", e))
    } else {
        GstaiError::Transport(e.to_string())
    }
}

fn snippet(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
