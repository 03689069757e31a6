//! HTTP client for the career-advice backend.
//!
//! One thin method per endpoint. Backend-signaled errors (`{"error": ...}`
//! bodies) and transport failures both surface as `anyhow` errors; callers
//! render the formatted chain. Requests carry no timeout and are never
//! retried, every call is fire-once.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::CareerCatalog;
use crate::config::Config;

pub mod types;

pub use types::{
    ChatRequest, ChatResponse, ChatTurn, GenerateKind, GenerateRequest, GenerateResponse,
    JobPosting, JobsRequest, JobsResponse, ResumeUpload,
};

/// Client for the backend REST API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CareerApi {
    http: reqwest::Client,
    base_url: String,
}

impl CareerApi {
    /// Creates a client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api.base_url)
    }

    /// The configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the category → roles reference data.
    pub async fn fetch_careers(&self) -> Result<CareerCatalog> {
        let url = self.endpoint("/api/careers");
        debug!(url = %url, "fetching career catalog");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        let value: serde_json::Value = parse_body(&body, status, "careers")?;
        CareerCatalog::from_value(&value)
    }

    /// Runs one of the three generation operations and returns the result text.
    pub async fn generate(
        &self,
        kind: GenerateKind,
        category: Option<&str>,
        subcareer: &str,
    ) -> Result<String> {
        let url = self.endpoint(kind.path());
        debug!(url = %url, kind = kind.name(), subcareer, "requesting generation");

        let request = GenerateRequest {
            category,
            subcareer,
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        match parse_body(&body, status, kind.name())? {
            GenerateResponse::Ok { result } => Ok(result),
            GenerateResponse::Err { error } => anyhow::bail!("{error}"),
        }
    }

    /// Submits resume content for analysis as a multipart request.
    ///
    /// At least one of `resume_text` or `upload` must be provided; the
    /// caller validates that before reaching the network.
    pub async fn analyze_resume(
        &self,
        target_role: &str,
        resume_text: Option<&str>,
        upload: Option<ResumeUpload>,
    ) -> Result<String> {
        use reqwest::multipart::{Form, Part};

        let url = self.endpoint("/api/resume-analysis");
        debug!(url = %url, target_role, has_file = upload.is_some(), "requesting resume analysis");

        let mut form = Form::new().text("target_role", target_role.to_string());
        if let Some(text) = resume_text {
            form = form.text("resume_text", text.to_string());
        }
        if let Some(upload) = upload {
            let part = Part::bytes(upload.bytes).file_name(upload.file_name);
            form = form.part("file", part);
        }

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        match parse_body(&body, status, "resume analysis")? {
            GenerateResponse::Ok { result } => Ok(result),
            GenerateResponse::Err { error } => anyhow::bail!("{error}"),
        }
    }

    /// Sends a chat message with the prior history and returns the answer.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let url = self.endpoint("/api/chat");
        debug!(url = %url, history_len = history.len(), "sending chat message");

        let request = ChatRequest { message, history };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        match parse_body(&body, status, "chat")? {
            ChatResponse::Ok { answer } => Ok(answer),
            ChatResponse::Err { error } => anyhow::bail!("{error}"),
        }
    }

    /// Searches job postings for a role.
    pub async fn search_jobs(&self, role: &str) -> Result<Vec<JobPosting>> {
        let url = self.endpoint("/api/jobs");
        debug!(url = %url, role, "searching jobs");

        let request = JobsRequest { role };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        match parse_body(&body, status, "jobs")? {
            JobsResponse::Ok(jobs) => Ok(jobs),
            JobsResponse::Err { error } => anyhow::bail!("{error}"),
        }
    }
}

/// Parses a response body, folding HTTP failures into the error text.
///
/// A failing status with an unparseable body (proxy HTML, empty 502) becomes
/// a status error; a failing status with a parseable `{"error"}` body is
/// handled by the caller as a backend-signaled error.
fn parse_body<T: DeserializeOwned>(body: &str, status: StatusCode, what: &str) -> Result<T> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => anyhow::bail!("server returned {status}"),
        Err(e) => Err(e).with_context(|| format!("malformed {what} response")),
    }
}

/// Classifies a reqwest error into user-facing text.
fn transport_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow::anyhow!("Request timed out: {e}")
    } else if e.is_connect() {
        anyhow::anyhow!("Connection failed: {e}")
    } else {
        anyhow::anyhow!("Network error: {e}")
    }
}
