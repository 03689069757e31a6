//! Application state composition.
//!
//! This module defines the state hierarchy for the TUI:
//! - `AppState` - top-level state, one instance per session
//! - per-view states (`InsightsState`, `GenerateViewState`, `ResumeState`, ...)
//! - `StatusState` - footer status line with timed reset
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── catalog: Option<CareerCatalog>  (category → roles, fetched once)
//! ├── active_view: View               (which workspace is shown)
//! ├── status: StatusState             (footer message + tone)
//! ├── task_seq / tasks                (async task lifecycle)
//! ├── insights: InsightsState         (cascading selectors + output)
//! ├── market / college                (free-text role + output)
//! ├── resume: ResumeState             (three-field form + analysis)
//! ├── jobs: JobsState                 (job search results)
//! └── chat: ChatState                 (transcript cells + wire history)
//! ```
//!
//! Everything here is plain data mutated by the reducer in `update.rs`.
//! Rendering reads but never mutates, except for scroll bounds which are only
//! known at draw time and use interior mutability.

use std::cell::Cell;
use std::time::{Duration, Instant};

use pivot_core::api::types::{ChatTurn, JobPosting};
use pivot_core::catalog::CareerCatalog;
use pivot_core::chart::ChartSpec;
use pivot_core::config::Config;

use crate::common::{Selector, TaskSeq, Tasks, TextBuffer};

/// Terminal width below which the sidebar auto-collapses.
pub const NARROW_WIDTH: u16 = 80;

/// How long a notification stays before the footer returns to ready.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Idle footer text.
pub const READY_MESSAGE: &str = "System Ready";

// ============================================================================
// View
// ============================================================================

/// Workspaces reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Insights,
    Market,
    College,
    Resume,
    Jobs,
    Chat,
}

impl View {
    /// Sidebar order. Alt+1..6 and Ctrl+N / Ctrl+P follow this order.
    pub const ALL: [View; 6] = [
        View::Insights,
        View::Market,
        View::College,
        View::Resume,
        View::Jobs,
        View::Chat,
    ];

    /// Title shown in the header and sidebar.
    pub fn title(self) -> &'static str {
        match self {
            View::Insights => "Career Insights",
            View::Market => "Market Analysis",
            View::College => "College Recommendations",
            View::Resume => "Resume Analysis",
            View::Jobs => "Job Search",
            View::Chat => "Advisor Chat",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Status line
// ============================================================================

/// Severity of the footer message; controls its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
    Error,
}

/// Footer status line with a timed reset back to the ready message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusState {
    pub message: String,
    pub tone: StatusTone,
    /// When to fall back to the ready message; None keeps the current text.
    pub reset_at: Option<Instant>,
}

impl StatusState {
    pub fn ready() -> Self {
        Self {
            message: READY_MESSAGE.to_string(),
            tone: StatusTone::Info,
            reset_at: None,
        }
    }

    /// Shows a notification that expires after [`NOTICE_DURATION`].
    pub fn notify(&mut self, message: impl Into<String>, tone: StatusTone) {
        self.message = message.into();
        self.tone = tone;
        self.reset_at = Some(Instant::now() + NOTICE_DURATION);
    }

    /// Shows a working message that stays until replaced.
    pub fn loading(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.tone = StatusTone::Info;
        self.reset_at = None;
    }

    /// Resets to the ready message once the notification expired.
    ///
    /// Returns true when the footer changed.
    pub fn maybe_reset(&mut self) -> bool {
        if let Some(at) = self.reset_at
            && Instant::now() >= at
        {
            *self = Self::ready();
            return true;
        }
        false
    }
}

impl Default for StatusState {
    fn default() -> Self {
        Self::ready()
    }
}

// ============================================================================
// Shared view pieces
// ============================================================================

/// Vertical scroll position for an output area.
///
/// The reducer moves `offset`; the upper bound depends on the wrapped content
/// height and is written during render.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// Lines scrolled past the top.
    pub offset: u16,
    /// Highest valid offset (set during render when content height is known).
    pub max: Cell<u16>,
}

impl ScrollState {
    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max.get());
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Lifecycle of a generation view's output area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewOutput {
    /// Nothing requested yet.
    #[default]
    Empty,
    /// Request in flight.
    Loading,
    /// Markdown from the backend, chart block already stripped.
    Ready { text: String },
    /// Request failed; shown as an inline panel.
    Error { message: String },
}

// ============================================================================
// Per-view state
// ============================================================================

/// Focus within the insights form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsightsField {
    #[default]
    Category,
    Role,
}

impl InsightsField {
    pub fn next(self) -> Self {
        match self {
            InsightsField::Category => InsightsField::Role,
            InsightsField::Role => InsightsField::Category,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields: prev is the same toggle
        self.next()
    }
}

/// Career insights view: cascading category → role selectors.
#[derive(Debug, Default)]
pub struct InsightsState {
    pub category: Selector,
    pub role: Selector,
    pub focus: InsightsField,
    pub output: ViewOutput,
    pub chart: Option<ChartSpec>,
    pub scroll: ScrollState,
}

/// Market analysis and college recommendations: one free-text role input.
#[derive(Debug, Default)]
pub struct GenerateViewState {
    pub input: TextBuffer,
    pub output: ViewOutput,
    pub chart: Option<ChartSpec>,
    pub scroll: ScrollState,
}

/// Focus within the resume form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeField {
    #[default]
    TargetRole,
    FilePath,
    ResumeText,
}

impl ResumeField {
    pub fn next(self) -> Self {
        match self {
            ResumeField::TargetRole => ResumeField::FilePath,
            ResumeField::FilePath => ResumeField::ResumeText,
            ResumeField::ResumeText => ResumeField::TargetRole,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ResumeField::TargetRole => ResumeField::ResumeText,
            ResumeField::FilePath => ResumeField::TargetRole,
            ResumeField::ResumeText => ResumeField::FilePath,
        }
    }
}

/// Resume analysis view: target role, optional file path, pasted text.
#[derive(Debug, Default)]
pub struct ResumeState {
    pub target_role: TextBuffer,
    pub file_path: TextBuffer,
    pub resume_text: TextBuffer,
    pub focus: ResumeField,
    pub output: ViewOutput,
    pub scroll: ScrollState,
}

/// Focus within the jobs form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobsField {
    #[default]
    Category,
    Role,
}

impl JobsField {
    pub fn next(self) -> Self {
        match self {
            JobsField::Category => JobsField::Role,
            JobsField::Role => JobsField::Category,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Outcome of a job search.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum JobsOutput {
    /// Nothing searched yet.
    #[default]
    Empty,
    /// Search in flight.
    Loading,
    /// Search succeeded but returned nothing.
    NoResults,
    /// Postings to display.
    Ready { jobs: Vec<JobPosting> },
    /// Search failed.
    Error { message: String },
}

/// Job search view: category → role selectors plus result list.
#[derive(Debug, Default)]
pub struct JobsState {
    pub category: Selector,
    pub role: Selector,
    pub focus: JobsField,
    pub output: JobsOutput,
    pub scroll: ScrollState,
}

/// One rendered cell in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCell {
    /// A question from the user.
    User { text: String },
    /// Advisor reply, rendered as markdown.
    Assistant { text: String },
    /// Placeholder shown while a reply is in flight.
    Typing,
    /// Failed request, shown in place of the reply.
    Error { message: String },
}

/// Advisor chat view.
///
/// `cells` is what the transcript renders; `history` is the wire-format
/// conversation sent with each request. They diverge on failures: an error
/// cell is displayed but never enters the history.
#[derive(Debug, Default)]
pub struct ChatState {
    pub cells: Vec<ChatCell>,
    pub history: Vec<ChatTurn>,
    pub input: TextBuffer,
    pub scroll: ScrollState,
}

// ============================================================================
// AppState
// ============================================================================

/// Top-level TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    /// Career taxonomy, present once `/api/careers` has loaded.
    pub catalog: Option<CareerCatalog>,
    /// Why the taxonomy is missing, for the retry hint.
    pub careers_error: Option<String>,
    /// Which workspace is shown.
    pub active_view: View,
    /// Sidebar visibility; collapses when the terminal gets narrow.
    pub sidebar_visible: bool,
    /// Footer status line.
    pub status: StatusState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter (for running tasks).
    pub spinner_frame: usize,
    /// Terminal size from the latest frame.
    pub last_width: u16,
    pub last_height: u16,

    pub insights: InsightsState,
    pub market: GenerateViewState,
    pub college: GenerateViewState,
    pub resume: ResumeState,
    pub jobs: JobsState,
    pub chat: ChatState,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            catalog: None,
            careers_error: None,
            active_view: View::Insights,
            sidebar_visible: true,
            status: StatusState::ready(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            last_width: 0,
            last_height: 0,
            insights: InsightsState::default(),
            market: GenerateViewState::default(),
            college: GenerateViewState::default(),
            resume: ResumeState::default(),
            jobs: JobsState::default(),
            chat: ChatState::default(),
        }
    }

    /// Installs the taxonomy and seeds every selector from it.
    pub fn apply_catalog(&mut self, catalog: CareerCatalog) {
        let categories: Vec<String> = catalog.category_names().map(String::from).collect();
        let first_roles: Vec<String> = catalog
            .first_category()
            .map(|c| catalog.roles(c).to_vec())
            .unwrap_or_default();

        self.insights.category.set_options(categories.clone());
        self.insights.role.set_options(first_roles.clone());
        self.jobs.category.set_options(categories);
        self.jobs.role.set_options(first_roles);

        if let Some(role) = self.insights.role.selected().map(String::from) {
            self.sync_role_inputs(&role);
        }

        self.catalog = Some(catalog);
        self.careers_error = None;
    }

    /// Copies a role into the market and college free-text inputs.
    ///
    /// The insights role selection seeds the other role-based views so
    /// switching views starts from the same role.
    pub fn sync_role_inputs(&mut self, role: &str) {
        self.market.input.set_text(role);
        self.college.input.set_text(role);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> CareerCatalog {
        CareerCatalog::from_value(&json!({
            "Technology": ["Software Engineer", "Data Scientist"],
            "Business": ["Product Manager"],
        }))
        .unwrap()
    }

    #[test]
    fn test_view_cycle_wraps_both_ways() {
        assert_eq!(View::Insights.prev(), View::Chat);
        assert_eq!(View::Chat.next(), View::Insights);
        assert_eq!(View::Market.next(), View::College);
    }

    #[test]
    fn test_apply_catalog_seeds_selectors_and_role_inputs() {
        let mut app = AppState::new(Config::default());
        app.apply_catalog(catalog());

        assert_eq!(app.insights.category.selected(), Some("Technology"));
        assert_eq!(app.insights.role.selected(), Some("Software Engineer"));
        assert_eq!(app.jobs.category.selected(), Some("Technology"));
        assert_eq!(app.jobs.role.selected(), Some("Software Engineer"));
        assert_eq!(app.market.input.text(), "Software Engineer");
        assert_eq!(app.college.input.text(), "Software Engineer");
        assert!(app.catalog.is_some());
    }

    #[test]
    fn test_status_notify_then_reset_after_expiry() {
        let mut status = StatusState::ready();
        status.notify("Insights generated!", StatusTone::Success);
        assert_eq!(status.message, "Insights generated!");

        // Not yet expired
        assert!(!status.maybe_reset());

        // Force expiry by moving the deadline into the past
        status.reset_at = Some(Instant::now() - Duration::from_millis(1));
        assert!(status.maybe_reset());
        assert_eq!(status.message, READY_MESSAGE);
        assert_eq!(status.tone, StatusTone::Info);
    }

    #[test]
    fn test_status_loading_does_not_expire() {
        let mut status = StatusState::ready();
        status.loading("Searching jobs...");

        assert_eq!(status.tone, StatusTone::Info);
        assert!(status.reset_at.is_none());
        assert!(!status.maybe_reset());
        assert_eq!(status.message, "Searching jobs...");
    }

    #[test]
    fn test_scroll_clamps_to_render_bound() {
        let mut scroll = ScrollState::default();
        scroll.max.set(10);

        scroll.scroll_down(4);
        assert_eq!(scroll.offset, 4);
        scroll.scroll_down(100);
        assert_eq!(scroll.offset, 10);
        scroll.scroll_up(3);
        assert_eq!(scroll.offset, 7);
        scroll.reset();
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_resume_focus_cycles_three_fields() {
        let mut focus = ResumeField::TargetRole;
        focus = focus.next();
        assert_eq!(focus, ResumeField::FilePath);
        focus = focus.next();
        assert_eq!(focus, ResumeField::ResumeText);
        focus = focus.next();
        assert_eq!(focus, ResumeField::TargetRole);
        assert_eq!(ResumeField::TargetRole.prev(), ResumeField::ResumeText);
    }
}
