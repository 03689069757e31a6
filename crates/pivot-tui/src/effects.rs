//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use pivot_core::api::types::{ChatTurn, GenerateKind};

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
///
/// The reducer returns `Vec<UiEffect>` from each update call.
/// The runtime executes these effects after rendering.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the careers taxonomy.
    LoadCareers { task: TaskId },

    /// Request generated advice (insights, market, or college).
    Generate {
        task: TaskId,
        kind: GenerateKind,
        /// Sent only for insights.
        category: Option<String>,
        subcareer: String,
    },

    /// Analyze a resume.
    ///
    /// When `file_path` is set the file is read in the handler before any
    /// request goes out; a read failure fails the task without a request.
    AnalyzeResume {
        task: TaskId,
        target_role: String,
        resume_text: String,
        file_path: Option<String>,
    },

    /// Send a chat message with the conversation so far.
    ///
    /// `history` is the conversation before this message.
    SendChat {
        task: TaskId,
        message: String,
        history: Vec<ChatTurn>,
    },

    /// Search job postings for a role.
    SearchJobs { task: TaskId, role: String },
}
