//! Wire types for the career-advice backend.

use serde::{Deserialize, Serialize};

/// Which generation endpoint a request targets.
///
/// The three generation views share one request shape and differ only in
/// endpoint and whether a category accompanies the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerateKind {
    Insights,
    Market,
    College,
}

impl GenerateKind {
    /// Endpoint path for this variant.
    pub fn path(self) -> &'static str {
        match self {
            GenerateKind::Insights => "/api/career-insights",
            GenerateKind::Market => "/api/market-analysis",
            GenerateKind::College => "/api/college-recommendations",
        }
    }

    /// Short identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            GenerateKind::Insights => "insights",
            GenerateKind::Market => "market",
            GenerateKind::College => "college",
        }
    }
}

/// Request body for the generation endpoints.
///
/// Only the insights variant sends a category.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    pub subcareer: &'a str,
}

/// Response from a generation endpoint: result text or a backend error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Ok { result: String },
    Err { error: String },
}

/// One chat turn, as kept in history and sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `/api/chat`.
///
/// The full prior history travels with every message; the backend keeps no
/// session state.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [ChatTurn],
}

/// Response from `/api/chat`: answer text or a backend error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Ok { answer: String },
    Err { error: String },
}

/// Request body for `/api/jobs`.
#[derive(Debug, Serialize)]
pub struct JobsRequest<'a> {
    pub role: &'a str,
}

/// One job posting from the search endpoint.
///
/// The provider occasionally omits fields, so everything defaults rather
/// than failing the whole result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub thumbnail: Option<String>,
}

/// Response from `/api/jobs`: a posting list or a backend error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobsResponse {
    Ok(Vec<JobPosting>),
    Err { error: String },
}

/// A resume file staged for multipart upload.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
