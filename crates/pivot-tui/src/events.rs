//! UI event types.
//!
//! This module defines the unified event enum for the TUI.
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Events follow the "inbox" pattern where async operations send events
//! directly to the runtime's event inbox. Results arrive as separate events.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`
//!
//! A completion whose task id is no longer the active one for its kind is
//! dropped by the reducer, which is what makes rapid resubmission safe.

use crossterm::event::Event as CrosstermEvent;
use pivot_core::api::types::{GenerateKind, JobPosting};
use pivot_core::catalog::CareerCatalog;
use pivot_core::chart::ChartSpec;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Results of the startup careers load.
#[derive(Debug)]
pub enum CareersEvent {
    /// Taxonomy fetched and parsed.
    Loaded { catalog: CareerCatalog },
    /// Fetch or parse failed.
    Failed { error: String },
}

/// Results of a generation request (insights, market, college).
#[derive(Debug)]
pub enum GenerateEvent {
    /// Backend returned advice text; any chart block is already extracted.
    Completed {
        kind: GenerateKind,
        text: String,
        chart: Option<ChartSpec>,
    },
    /// Request failed.
    Failed { kind: GenerateKind, error: String },
}

/// Results of a resume analysis request.
#[derive(Debug)]
pub enum ResumeEvent {
    Completed { text: String },
    Failed { error: String },
}

/// Results of a chat request.
#[derive(Debug)]
pub enum ChatEvent {
    /// Reply received. `message` is the user message this answers; the
    /// reducer appends both to the wire history only now, so a failed
    /// request never pollutes the conversation.
    Answered { message: String, answer: String },
    Failed { error: String },
}

/// Results of a job search.
#[derive(Debug)]
pub enum JobsEvent {
    Found { jobs: Vec<JobPosting> },
    Failed { error: String },
}

/// Unified event enum for the TUI.
///
/// All inputs to the TUI are converted to this type before processing.
/// The reducer (`update`) pattern-matches on these events to update state.
#[derive(Debug)]
pub enum UiEvent {
    /// Pushed once by the runtime before the first frame; kicks off the
    /// careers load.
    Init,

    /// Timer tick (spinner animation, status reset).
    Tick,

    /// Frame event emitted once per loop iteration with terminal dimensions.
    ///
    /// Emitted before other events are processed so layout-dependent behavior
    /// (sidebar auto-collapse) sees the current size.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime started a task.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Careers taxonomy load results.
    Careers(CareersEvent),

    /// Generation results (insights, market, college).
    Generate(GenerateEvent),

    /// Resume analysis results.
    Resume(ResumeEvent),

    /// Chat results.
    Chat(ChatEvent),

    /// Job search results.
    Jobs(JobsEvent),
}
