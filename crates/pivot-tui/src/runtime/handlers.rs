//! Effect handlers for the TUI runtime.
//!
//! This module contains the implementation of side effects triggered by the
//! reducer. These functions perform I/O and async work. They do NOT mutate
//! state directly.
//!
//! ## Pure Async Pattern
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime uses
//! `spawn_task` to spawn them and send results to the inbox. This keeps
//! handlers focused on the backend conversation while the runtime handles
//! spawning and the task lifecycle.
//!
//! Errors never propagate out of a handler; they are folded into the failure
//! variant of the matching result event so the reducer can show them inline.

use std::path::PathBuf;

use pivot_core::api::CareerApi;
use pivot_core::api::types::{ChatTurn, GenerateKind, ResumeUpload};
use pivot_core::chart::extract_chart_block;

use crate::events::{CareersEvent, ChatEvent, GenerateEvent, JobsEvent, ResumeEvent, UiEvent};

/// Fetches the career taxonomy that seeds the selectors.
pub async fn load_careers(api: CareerApi) -> UiEvent {
    match api.fetch_careers().await {
        Ok(catalog) => UiEvent::Careers(CareersEvent::Loaded { catalog }),
        Err(e) => UiEvent::Careers(CareersEvent::Failed {
            error: format!("{e:#}"),
        }),
    }
}

/// Runs one generation request (insights, market, or college).
///
/// The chart block is extracted here so the reducer only ever sees display
/// text plus an optional parsed chart.
pub async fn generate(
    api: CareerApi,
    kind: GenerateKind,
    category: Option<String>,
    subcareer: String,
) -> UiEvent {
    match api.generate(kind, category.as_deref(), &subcareer).await {
        Ok(raw) => {
            let extraction = extract_chart_block(&raw);
            UiEvent::Generate(GenerateEvent::Completed {
                kind,
                text: extraction.text,
                chart: extraction.chart,
            })
        }
        Err(e) => UiEvent::Generate(GenerateEvent::Failed {
            kind,
            error: format!("{e:#}"),
        }),
    }
}

/// Analyzes a resume, optionally reading a file to attach.
///
/// The file is read on a blocking thread before the request goes out; a read
/// failure fails the task without touching the network.
pub async fn analyze_resume(
    api: CareerApi,
    target_role: String,
    resume_text: String,
    file_path: Option<String>,
) -> UiEvent {
    let upload = match file_path {
        Some(path) => match read_upload(path).await {
            Ok(upload) => Some(upload),
            Err(error) => return UiEvent::Resume(ResumeEvent::Failed { error }),
        },
        None => None,
    };

    let text = (!resume_text.trim().is_empty()).then_some(resume_text);
    match api
        .analyze_resume(&target_role, text.as_deref(), upload)
        .await
    {
        Ok(result) => UiEvent::Resume(ResumeEvent::Completed { text: result }),
        Err(e) => UiEvent::Resume(ResumeEvent::Failed {
            error: format!("{e:#}"),
        }),
    }
}

/// Reads the resume file into an upload part (runs on a blocking thread).
async fn read_upload(path: String) -> Result<ResumeUpload, String> {
    tokio::task::spawn_blocking(move || {
        let path = PathBuf::from(path);
        let file_name = path
            .file_name()
            .map_or_else(|| "resume".to_string(), |n| n.to_string_lossy().into_owned());
        match std::fs::read(&path) {
            Ok(bytes) => Ok(ResumeUpload { file_name, bytes }),
            Err(e) => Err(format!("Failed to read {}: {e}", path.display())),
        }
    })
    .await
    .unwrap_or_else(|e| Err(format!("Task failed: {e}")))
}

/// Sends a chat message with the conversation so far.
pub async fn send_chat(api: CareerApi, message: String, history: Vec<ChatTurn>) -> UiEvent {
    match api.chat(&message, &history).await {
        Ok(answer) => UiEvent::Chat(ChatEvent::Answered { message, answer }),
        Err(e) => UiEvent::Chat(ChatEvent::Failed {
            error: format!("{e:#}"),
        }),
    }
}

/// Searches job postings for a role.
pub async fn search_jobs(api: CareerApi, role: String) -> UiEvent {
    match api.search_jobs(&role).await {
        Ok(jobs) => UiEvent::Jobs(JobsEvent::Found { jobs }),
        Err(e) => UiEvent::Jobs(JobsEvent::Failed {
            error: format!("{e:#}"),
        }),
    }
}
