//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pivot_core::api::types::{ChatTurn, GenerateKind};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{CareersEvent, ChatEvent, GenerateEvent, JobsEvent, ResumeEvent, UiEvent};
use crate::state::{
    AppState, ChatCell, InsightsField, JobsField, JobsOutput, NARROW_WIDTH, ResumeField,
    StatusState, StatusTone, View, ViewOutput,
};

/// Lines moved per PageUp / PageDown press.
const SCROLL_PAGE: u16 = 10;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Init => start_careers_load(app),
        UiEvent::Tick => {
            // Advance spinner animation
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.status.maybe_reset();
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok {
                // A newer submission superseded this task; drop the result
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
        UiEvent::Careers(event) => handle_careers_event(app, event),
        UiEvent::Generate(event) => handle_generate_event(app, event),
        UiEvent::Resume(event) => handle_resume_event(app, event),
        UiEvent::Chat(event) => handle_chat_event(app, event),
        UiEvent::Jobs(event) => handle_jobs_event(app, event),
    }
}

// ============================================================================
// Async result handlers
// ============================================================================

fn start_careers_load(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.state(TaskKind::Careers).is_running() {
        return vec![];
    }
    app.careers_error = None;
    app.status.loading("Loading career data...");
    let task = app.task_seq.next_id();
    vec![UiEffect::LoadCareers { task }]
}

fn handle_careers_event(app: &mut AppState, event: CareersEvent) -> Vec<UiEffect> {
    match event {
        CareersEvent::Loaded { catalog } => {
            app.apply_catalog(catalog);
            app.status = StatusState::ready();
        }
        CareersEvent::Failed { error } => {
            app.careers_error = Some(error);
            app.status
                .notify("Failed to initialize application", StatusTone::Error);
        }
    }
    vec![]
}

fn handle_generate_event(app: &mut AppState, event: GenerateEvent) -> Vec<UiEffect> {
    match event {
        GenerateEvent::Completed { kind, text, chart } => {
            let message = format!("{} generated!", view_for_generate(kind).title());
            let state = generate_state_mut(app, kind);
            *state.0 = ViewOutput::Ready { text };
            *state.1 = chart;
            state.2.reset();
            app.status.notify(message, StatusTone::Success);
        }
        GenerateEvent::Failed { kind, error } => {
            let message = format!("Error: {error}");
            let state = generate_state_mut(app, kind);
            *state.0 = ViewOutput::Error { message: error };
            *state.1 = None;
            state.2.reset();
            app.status.notify(message, StatusTone::Error);
        }
    }
    vec![]
}

/// Output, chart, and scroll slots for a generation kind.
fn generate_state_mut(
    app: &mut AppState,
    kind: GenerateKind,
) -> (
    &mut ViewOutput,
    &mut Option<pivot_core::chart::ChartSpec>,
    &mut crate::state::ScrollState,
) {
    match kind {
        GenerateKind::Insights => (
            &mut app.insights.output,
            &mut app.insights.chart,
            &mut app.insights.scroll,
        ),
        GenerateKind::Market => (
            &mut app.market.output,
            &mut app.market.chart,
            &mut app.market.scroll,
        ),
        GenerateKind::College => (
            &mut app.college.output,
            &mut app.college.chart,
            &mut app.college.scroll,
        ),
    }
}

fn view_for_generate(kind: GenerateKind) -> View {
    match kind {
        GenerateKind::Insights => View::Insights,
        GenerateKind::Market => View::Market,
        GenerateKind::College => View::College,
    }
}

fn handle_resume_event(app: &mut AppState, event: ResumeEvent) -> Vec<UiEffect> {
    match event {
        ResumeEvent::Completed { text } => {
            app.resume.output = ViewOutput::Ready { text };
            app.resume.scroll.reset();
            app.status
                .notify("Resume analysis complete!", StatusTone::Success);
        }
        ResumeEvent::Failed { error } => {
            let message = format!("Error: {error}");
            app.resume.output = ViewOutput::Error { message: error };
            app.resume.scroll.reset();
            app.status.notify(message, StatusTone::Error);
        }
    }
    vec![]
}

fn handle_chat_event(app: &mut AppState, event: ChatEvent) -> Vec<UiEffect> {
    match event {
        ChatEvent::Answered { message, answer } => {
            replace_typing(
                &mut app.chat.cells,
                ChatCell::Assistant {
                    text: answer.clone(),
                },
            );
            // History only grows on success, so a failed request is invisible
            // to the next one
            app.chat.history.push(ChatTurn::user(message));
            app.chat.history.push(ChatTurn::assistant(answer));
            app.chat.scroll.reset();
            app.status = StatusState::ready();
        }
        ChatEvent::Failed { error } => {
            let message = format!("Error: {error}");
            replace_typing(&mut app.chat.cells, ChatCell::Error { message: error });
            app.chat.scroll.reset();
            app.status.notify(message, StatusTone::Error);
        }
    }
    vec![]
}

fn replace_typing(cells: &mut Vec<ChatCell>, replacement: ChatCell) {
    if let Some(slot) = cells
        .iter_mut()
        .rev()
        .find(|c| matches!(c, ChatCell::Typing))
    {
        *slot = replacement;
    } else {
        cells.push(replacement);
    }
}

fn handle_jobs_event(app: &mut AppState, event: JobsEvent) -> Vec<UiEffect> {
    match event {
        JobsEvent::Found { jobs } => {
            if jobs.is_empty() {
                app.jobs.output = JobsOutput::NoResults;
                app.status = StatusState::ready();
            } else {
                let count = jobs.len();
                app.jobs.output = JobsOutput::Ready { jobs };
                app.status
                    .notify(format!("Found {count} jobs!"), StatusTone::Success);
            }
            app.jobs.scroll.reset();
        }
        JobsEvent::Failed { error } => {
            let message = format!("Error: {error}");
            app.jobs.output = JobsOutput::Error { message: error };
            app.jobs.scroll.reset();
            app.status.notify(message, StatusTone::Error);
        }
    }
    vec![]
}

// ============================================================================
// Frame Handler
// ============================================================================

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    let previous_width = app.last_width;
    app.last_width = width;
    app.last_height = height;

    // Collapse the sidebar when the terminal crosses below the threshold,
    // and on the first frame of an already-narrow terminal
    let was_wide = previous_width == 0 || previous_width >= NARROW_WIDTH;
    if width < NARROW_WIDTH && was_wide {
        app.sidebar_visible = false;
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        // Resize is picked up by the next Frame event
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global bindings take precedence over per-view input
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            return vec![UiEffect::Quit];
        }
        KeyCode::Char('b') if ctrl => {
            app.sidebar_visible = !app.sidebar_visible;
            return vec![];
        }
        KeyCode::Char('n') if ctrl => {
            switch_view(app, app.active_view.next());
            return vec![];
        }
        KeyCode::Char('p') if ctrl => {
            switch_view(app, app.active_view.prev());
            return vec![];
        }
        KeyCode::Char(c @ '1'..='6') if alt => {
            let index = (c as usize) - ('1' as usize);
            switch_view(app, View::ALL[index]);
            return vec![];
        }
        _ => {}
    }

    match app.active_view {
        View::Insights => handle_insights_key(app, key),
        View::Market => handle_free_text_key(app, GenerateKind::Market, key),
        View::College => handle_free_text_key(app, GenerateKind::College, key),
        View::Resume => handle_resume_key(app, key),
        View::Jobs => handle_jobs_key(app, key),
        View::Chat => handle_chat_key(app, key),
    }
}

fn switch_view(app: &mut AppState, view: View) {
    app.active_view = view;
    // On a narrow terminal the sidebar is a drawer; close it on navigation
    if app.last_width != 0 && app.last_width < NARROW_WIDTH {
        app.sidebar_visible = false;
    }
}

// ============================================================================
// Insights
// ============================================================================

fn handle_insights_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab => {
            app.insights.focus = app.insights.focus.next();
            vec![]
        }
        KeyCode::BackTab => {
            app.insights.focus = app.insights.focus.prev();
            vec![]
        }
        KeyCode::Left | KeyCode::Up => {
            cycle_insights(app, false);
            vec![]
        }
        KeyCode::Right | KeyCode::Down => {
            cycle_insights(app, true);
            vec![]
        }
        KeyCode::Enter => submit_insights(app),
        KeyCode::PageUp => {
            app.insights.scroll.scroll_up(SCROLL_PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            app.insights.scroll.scroll_down(SCROLL_PAGE);
            vec![]
        }
        KeyCode::Char('r') if app.catalog.is_none() => start_careers_load(app),
        _ => vec![],
    }
}

fn cycle_insights(app: &mut AppState, forward: bool) {
    match app.insights.focus {
        InsightsField::Category => {
            let moved = if forward {
                app.insights.category.next()
            } else {
                app.insights.category.prev()
            };
            if moved {
                on_insights_category_changed(app);
            }
        }
        InsightsField::Role => {
            let moved = if forward {
                app.insights.role.next()
            } else {
                app.insights.role.prev()
            };
            if moved && let Some(role) = app.insights.role.selected().map(String::from) {
                app.sync_role_inputs(&role);
            }
        }
    }
}

/// Repopulates the role selector for the newly selected category and syncs
/// the default role into the free-text views.
fn on_insights_category_changed(app: &mut AppState) {
    let roles = match (&app.catalog, app.insights.category.selected()) {
        (Some(catalog), Some(category)) => catalog.roles(category).to_vec(),
        _ => Vec::new(),
    };
    app.insights.role.set_options(roles);

    if let Some(role) = app.insights.role.selected().map(String::from) {
        app.sync_role_inputs(&role);
    }
}

fn submit_insights(app: &mut AppState) -> Vec<UiEffect> {
    let Some(role) = app.insights.role.selected().map(String::from) else {
        app.status.notify("Please select a role", StatusTone::Warning);
        return vec![];
    };
    let category = app.insights.category.selected().map(String::from);

    app.insights.output = ViewOutput::Loading;
    app.insights.chart = None;
    app.insights.scroll.reset();
    app.status.loading("Generating insights...");

    let task = app.task_seq.next_id();
    vec![UiEffect::Generate {
        task,
        kind: GenerateKind::Insights,
        category,
        subcareer: role,
    }]
}

// ============================================================================
// Market / College (free-text role views)
// ============================================================================

fn handle_free_text_key(app: &mut AppState, kind: GenerateKind, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => submit_free_text(app, kind),
        KeyCode::PageUp => {
            free_text_state_mut(app, kind).scroll.scroll_up(SCROLL_PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            free_text_state_mut(app, kind)
                .scroll
                .scroll_down(SCROLL_PAGE);
            vec![]
        }
        _ => {
            free_text_state_mut(app, kind).input.input(key);
            vec![]
        }
    }
}

fn free_text_state_mut(
    app: &mut AppState,
    kind: GenerateKind,
) -> &mut crate::state::GenerateViewState {
    match kind {
        GenerateKind::College => &mut app.college,
        _ => &mut app.market,
    }
}

fn submit_free_text(app: &mut AppState, kind: GenerateKind) -> Vec<UiEffect> {
    let (empty_notice, loading_notice) = match kind {
        GenerateKind::Market => ("Please enter a target role", "Analyzing the market..."),
        GenerateKind::College => ("Please enter a field of study", "Finding college programs..."),
        // Insights submits through its selectors
        GenerateKind::Insights => return vec![],
    };

    let role = free_text_state_mut(app, kind).input.text().trim().to_string();
    if role.is_empty() {
        app.status.notify(empty_notice, StatusTone::Warning);
        return vec![];
    }

    let state = free_text_state_mut(app, kind);
    state.output = ViewOutput::Loading;
    state.chart = None;
    state.scroll.reset();
    app.status.loading(loading_notice);

    let task = app.task_seq.next_id();
    vec![UiEffect::Generate {
        task,
        kind,
        category: None,
        subcareer: role,
    }]
}

// ============================================================================
// Resume
// ============================================================================

fn handle_resume_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        return submit_resume(app);
    }

    match key.code {
        KeyCode::Tab => {
            app.resume.focus = app.resume.focus.next();
            vec![]
        }
        KeyCode::BackTab => {
            app.resume.focus = app.resume.focus.prev();
            vec![]
        }
        KeyCode::PageUp => {
            app.resume.scroll.scroll_up(SCROLL_PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            app.resume.scroll.scroll_down(SCROLL_PAGE);
            vec![]
        }
        // Enter inserts a newline in the resume textarea and submits from
        // the single-line fields
        KeyCode::Enter => match app.resume.focus {
            ResumeField::ResumeText => {
                app.resume.resume_text.insert_newline();
                vec![]
            }
            ResumeField::TargetRole | ResumeField::FilePath => submit_resume(app),
        },
        _ => {
            let buffer = match app.resume.focus {
                ResumeField::TargetRole => &mut app.resume.target_role,
                ResumeField::FilePath => &mut app.resume.file_path,
                ResumeField::ResumeText => &mut app.resume.resume_text,
            };
            buffer.input(key);
            vec![]
        }
    }
}

fn submit_resume(app: &mut AppState) -> Vec<UiEffect> {
    let has_text = !app.resume.resume_text.is_blank();
    let file_path = app.resume.file_path.text().trim().to_string();

    if !has_text && file_path.is_empty() {
        app.status.notify(
            "Please provide resume text or upload a file",
            StatusTone::Warning,
        );
        return vec![];
    }

    let target = app.resume.target_role.text().trim().to_string();
    let target_role = if target.is_empty() {
        "General".to_string()
    } else {
        target
    };

    app.resume.output = ViewOutput::Loading;
    app.resume.scroll.reset();
    app.status.loading("Analyzing resume...");

    let task = app.task_seq.next_id();
    vec![UiEffect::AnalyzeResume {
        task,
        target_role,
        resume_text: if has_text {
            app.resume.resume_text.text()
        } else {
            String::new()
        },
        file_path: (!file_path.is_empty()).then_some(file_path),
    }]
}

// ============================================================================
// Jobs
// ============================================================================

fn handle_jobs_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab => {
            app.jobs.focus = app.jobs.focus.next();
            vec![]
        }
        KeyCode::BackTab => {
            app.jobs.focus = app.jobs.focus.prev();
            vec![]
        }
        KeyCode::Left | KeyCode::Up => {
            cycle_jobs(app, false);
            vec![]
        }
        KeyCode::Right | KeyCode::Down => {
            cycle_jobs(app, true);
            vec![]
        }
        KeyCode::Enter => submit_jobs(app),
        KeyCode::PageUp => {
            app.jobs.scroll.scroll_up(SCROLL_PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            app.jobs.scroll.scroll_down(SCROLL_PAGE);
            vec![]
        }
        KeyCode::Char('r') if app.catalog.is_none() => start_careers_load(app),
        _ => vec![],
    }
}

fn cycle_jobs(app: &mut AppState, forward: bool) {
    match app.jobs.focus {
        JobsField::Category => {
            let moved = if forward {
                app.jobs.category.next()
            } else {
                app.jobs.category.prev()
            };
            if moved {
                let roles = match (&app.catalog, app.jobs.category.selected()) {
                    (Some(catalog), Some(category)) => catalog.roles(category).to_vec(),
                    _ => Vec::new(),
                };
                app.jobs.role.set_options(roles);
            }
        }
        JobsField::Role => {
            if forward {
                app.jobs.role.next();
            } else {
                app.jobs.role.prev();
            }
        }
    }
}

fn submit_jobs(app: &mut AppState) -> Vec<UiEffect> {
    let Some(role) = app.jobs.role.selected().map(String::from) else {
        app.status
            .notify("Please select a role first", StatusTone::Warning);
        return vec![];
    };

    app.jobs.output = JobsOutput::Loading;
    app.jobs.scroll.reset();
    app.status.loading("Searching jobs...");

    let task = app.task_seq.next_id();
    vec![UiEffect::SearchJobs { task, role }]
}

// ============================================================================
// Chat
// ============================================================================

fn handle_chat_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter => submit_chat(app),
        // Chat scroll counts lines back from the latest message, so paging
        // up raises the offset
        KeyCode::PageUp => {
            app.chat.scroll.scroll_down(SCROLL_PAGE);
            vec![]
        }
        KeyCode::PageDown => {
            app.chat.scroll.scroll_up(SCROLL_PAGE);
            vec![]
        }
        _ => {
            app.chat.input.input(key);
            vec![]
        }
    }
}

fn submit_chat(app: &mut AppState) -> Vec<UiEffect> {
    // One reply at a time; the typed text stays in the input for a resubmit
    if app.tasks.state(TaskKind::Chat).is_running() {
        app.status
            .notify("Still waiting for the advisor's reply", StatusTone::Warning);
        return vec![];
    }

    let message = app.chat.input.text().trim().to_string();
    if message.is_empty() {
        return vec![];
    }

    // Snapshot the history before this exchange; it grows on success only
    let history = app.chat.history.clone();
    app.chat.input.clear();
    app.chat.cells.push(ChatCell::User {
        text: message.clone(),
    });
    app.chat.cells.push(ChatCell::Typing);
    app.chat.scroll.reset();
    app.status.loading("Waiting for the advisor...");

    let task = app.task_seq.next_id();
    vec![UiEffect::SendChat {
        task,
        message,
        history,
    }]
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pivot_core::catalog::CareerCatalog;
    use pivot_core::chart::{ChartKind, ChartSpec};
    use pivot_core::config::Config;
    use serde_json::json;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::state::READY_MESSAGE;

    fn catalog() -> CareerCatalog {
        CareerCatalog::from_value(&json!({
            "Technology": ["Software Engineer", "Data Scientist"],
            "Business": ["Product Manager"],
        }))
        .unwrap()
    }

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn ready_app() -> AppState {
        let mut app = app();
        app.apply_catalog(catalog());
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers)))
    }

    fn start_task(app: &mut AppState, kind: TaskKind, id: TaskId) {
        let effects = update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted { id },
            },
        );
        assert!(effects.is_empty());
    }

    fn complete_task(
        app: &mut AppState,
        kind: TaskKind,
        id: TaskId,
        result: UiEvent,
    ) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        )
    }

    fn generate_task(effects: &[UiEffect]) -> TaskId {
        match effects {
            [UiEffect::Generate { task, .. }] => *task,
            other => panic!("expected a generate effect, got {other:?}"),
        }
    }

    #[test]
    fn test_init_starts_careers_load() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Init);
        assert!(matches!(&effects[..], [UiEffect::LoadCareers { .. }]));
        assert_eq!(app.status.message, "Loading career data...");
    }

    #[test]
    fn test_careers_loaded_seeds_selectors_and_role_inputs() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Init);
        let task = match &effects[..] {
            [UiEffect::LoadCareers { task }] => *task,
            other => panic!("expected careers load, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Careers, task);

        complete_task(
            &mut app,
            TaskKind::Careers,
            task,
            UiEvent::Careers(CareersEvent::Loaded { catalog: catalog() }),
        );

        assert_eq!(app.insights.category.selected(), Some("Technology"));
        assert_eq!(app.insights.role.selected(), Some("Software Engineer"));
        assert_eq!(app.jobs.role.selected(), Some("Software Engineer"));
        assert_eq!(app.market.input.text(), "Software Engineer");
        assert_eq!(app.college.input.text(), "Software Engineer");
        assert_eq!(app.status.message, READY_MESSAGE);
    }

    #[test]
    fn test_careers_failure_notifies_and_keeps_error() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::Init);
        let task = match &effects[..] {
            [UiEffect::LoadCareers { task }] => *task,
            other => panic!("expected careers load, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Careers, task);

        complete_task(
            &mut app,
            TaskKind::Careers,
            task,
            UiEvent::Careers(CareersEvent::Failed {
                error: "connection refused".to_string(),
            }),
        );

        assert_eq!(app.status.message, "Failed to initialize application");
        assert_eq!(app.status.tone, StatusTone::Error);
        assert_eq!(app.careers_error.as_deref(), Some("connection refused"));
        assert!(app.catalog.is_none());
    }

    #[test]
    fn test_retry_key_reloads_careers_only_when_missing() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('r')));
        assert!(matches!(&effects[..], [UiEffect::LoadCareers { .. }]));

        let mut loaded = ready_app();
        let effects = update(&mut loaded, key(KeyCode::Char('r')));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_insights_submit_without_role_warns() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(app.status.message, "Please select a role");
        assert_eq!(app.status.tone, StatusTone::Warning);
    }

    #[test]
    fn test_insights_submit_emits_generate_with_category() {
        let mut app = ready_app();
        let effects = update(&mut app, key(KeyCode::Enter));

        match &effects[..] {
            [UiEffect::Generate {
                kind,
                category,
                subcareer,
                ..
            }] => {
                assert_eq!(*kind, GenerateKind::Insights);
                assert_eq!(category.as_deref(), Some("Technology"));
                assert_eq!(subcareer, "Software Engineer");
            }
            other => panic!("expected a generate effect, got {other:?}"),
        }
        assert_eq!(app.insights.output, ViewOutput::Loading);
        assert_eq!(app.status.message, "Generating insights...");
        assert!(app.status.reset_at.is_none());
    }

    #[test]
    fn test_generation_completion_sets_output_chart_and_notice() {
        let mut app = ready_app();
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = generate_task(&effects);
        start_task(&mut app, TaskKind::Insights, task);

        let chart = ChartSpec {
            kind: ChartKind::Bar,
            labels: vec!["2024".to_string(), "2025".to_string()],
            data: vec![5.0, 9.0],
            label: Some("Openings".to_string()),
            unit: None,
        };
        complete_task(
            &mut app,
            TaskKind::Insights,
            task,
            UiEvent::Generate(GenerateEvent::Completed {
                kind: GenerateKind::Insights,
                text: "## Roadmap".to_string(),
                chart: Some(chart.clone()),
            }),
        );

        assert_eq!(
            app.insights.output,
            ViewOutput::Ready {
                text: "## Roadmap".to_string()
            }
        );
        assert_eq!(app.insights.chart, Some(chart));
        assert_eq!(app.status.message, "Career Insights generated!");
        assert_eq!(app.status.tone, StatusTone::Success);
    }

    #[test]
    fn test_generation_failure_sets_error_panel_and_notice() {
        let mut app = ready_app();
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = generate_task(&effects);
        start_task(&mut app, TaskKind::Insights, task);

        complete_task(
            &mut app,
            TaskKind::Insights,
            task,
            UiEvent::Generate(GenerateEvent::Failed {
                kind: GenerateKind::Insights,
                error: "LLM not initialized".to_string(),
            }),
        );

        assert_eq!(
            app.insights.output,
            ViewOutput::Error {
                message: "LLM not initialized".to_string()
            }
        );
        assert_eq!(app.status.message, "Error: LLM not initialized");
        assert_eq!(app.status.tone, StatusTone::Error);
    }

    #[test]
    fn test_stale_generation_completion_is_dropped() {
        let mut app = ready_app();

        let first = generate_task(&update(&mut app, key(KeyCode::Enter)));
        start_task(&mut app, TaskKind::Insights, first);

        // A second submission supersedes the first
        let second = generate_task(&update(&mut app, key(KeyCode::Enter)));
        start_task(&mut app, TaskKind::Insights, second);

        complete_task(
            &mut app,
            TaskKind::Insights,
            first,
            UiEvent::Generate(GenerateEvent::Completed {
                kind: GenerateKind::Insights,
                text: "stale".to_string(),
                chart: None,
            }),
        );
        assert_eq!(app.insights.output, ViewOutput::Loading);

        complete_task(
            &mut app,
            TaskKind::Insights,
            second,
            UiEvent::Generate(GenerateEvent::Completed {
                kind: GenerateKind::Insights,
                text: "fresh".to_string(),
                chart: None,
            }),
        );
        assert_eq!(
            app.insights.output,
            ViewOutput::Ready {
                text: "fresh".to_string()
            }
        );
    }

    #[test]
    fn test_later_generation_without_chart_clears_previous_chart() {
        let mut app = ready_app();
        app.insights.chart = Some(ChartSpec {
            kind: ChartKind::Radar,
            labels: vec!["Skill".to_string()],
            data: vec![7.0],
            label: None,
            unit: None,
        });

        let task = generate_task(&update(&mut app, key(KeyCode::Enter)));
        start_task(&mut app, TaskKind::Insights, task);
        complete_task(
            &mut app,
            TaskKind::Insights,
            task,
            UiEvent::Generate(GenerateEvent::Completed {
                kind: GenerateKind::Insights,
                text: "plain text".to_string(),
                chart: None,
            }),
        );

        assert!(app.insights.chart.is_none());
    }

    #[test]
    fn test_market_submit_requires_role_text() {
        let mut app = app();
        app.active_view = View::Market;
        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(app.status.message, "Please enter a target role");

        app.active_view = View::College;
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.status.message, "Please enter a field of study");
    }

    #[test]
    fn test_market_submit_uses_synced_role() {
        let mut app = ready_app();
        app.active_view = View::Market;
        let effects = update(&mut app, key(KeyCode::Enter));

        match &effects[..] {
            [UiEffect::Generate {
                kind,
                category,
                subcareer,
                ..
            }] => {
                assert_eq!(*kind, GenerateKind::Market);
                assert!(category.is_none());
                assert_eq!(subcareer, "Software Engineer");
            }
            other => panic!("expected a generate effect, got {other:?}"),
        }
    }

    #[test]
    fn test_role_cycle_syncs_free_text_inputs() {
        let mut app = ready_app();
        update(&mut app, key(KeyCode::Tab)); // focus role
        update(&mut app, key(KeyCode::Right));

        assert_eq!(app.insights.role.selected(), Some("Data Scientist"));
        assert_eq!(app.market.input.text(), "Data Scientist");
        assert_eq!(app.college.input.text(), "Data Scientist");
    }

    #[test]
    fn test_category_cycle_repopulates_roles_and_syncs() {
        let mut app = ready_app();
        update(&mut app, key(KeyCode::Right)); // category: Technology -> Business

        assert_eq!(app.insights.category.selected(), Some("Business"));
        assert_eq!(app.insights.role.selected(), Some("Product Manager"));
        assert_eq!(app.market.input.text(), "Product Manager");
        // Jobs selectors are independent of the insights category
        assert_eq!(app.jobs.category.selected(), Some("Technology"));
    }

    #[test]
    fn test_resume_submit_requires_text_or_file() {
        let mut app = app();
        app.active_view = View::Resume;
        let effects = update(&mut app, key_with(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert!(effects.is_empty());
        assert_eq!(
            app.status.message,
            "Please provide resume text or upload a file"
        );
    }

    #[test]
    fn test_resume_submit_defaults_target_role() {
        let mut app = app();
        app.active_view = View::Resume;
        app.resume.resume_text.set_text("Shipped two ML products.");

        let effects = update(&mut app, key_with(KeyCode::Char('s'), KeyModifiers::CONTROL));
        match &effects[..] {
            [UiEffect::AnalyzeResume {
                target_role,
                resume_text,
                file_path,
                ..
            }] => {
                assert_eq!(target_role, "General");
                assert_eq!(resume_text, "Shipped two ML products.");
                assert!(file_path.is_none());
            }
            other => panic!("expected a resume effect, got {other:?}"),
        }
        assert_eq!(app.resume.output, ViewOutput::Loading);
    }

    #[test]
    fn test_resume_textarea_enter_inserts_newline() {
        let mut app = app();
        app.active_view = View::Resume;
        app.resume.focus = ResumeField::ResumeText;
        app.resume.resume_text.set_text("line one");

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.resume.resume_text.text(), "line one\n");
    }

    #[test]
    fn test_resume_completion_notifies() {
        let mut app = app();
        app.active_view = View::Resume;
        app.resume.resume_text.set_text("resume body");
        let effects = update(&mut app, key_with(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let task = match &effects[..] {
            [UiEffect::AnalyzeResume { task, .. }] => *task,
            other => panic!("expected a resume effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Resume, task);

        complete_task(
            &mut app,
            TaskKind::Resume,
            task,
            UiEvent::Resume(ResumeEvent::Completed {
                text: "### Feedback".to_string(),
            }),
        );

        assert_eq!(
            app.resume.output,
            ViewOutput::Ready {
                text: "### Feedback".to_string()
            }
        );
        assert_eq!(app.status.message, "Resume analysis complete!");
    }

    #[test]
    fn test_chat_submit_snapshots_history_and_pushes_cells() {
        let mut app = app();
        app.active_view = View::Chat;
        app.chat.history.push(ChatTurn::user("earlier question"));
        app.chat.history.push(ChatTurn::assistant("earlier answer"));
        app.chat.input.set_text("What skills do I need?");

        let effects = update(&mut app, key(KeyCode::Enter));
        match &effects[..] {
            [UiEffect::SendChat {
                message, history, ..
            }] => {
                assert_eq!(message, "What skills do I need?");
                // The in-flight message is not part of the history it sends
                assert_eq!(history.len(), 2);
            }
            other => panic!("expected a chat effect, got {other:?}"),
        }

        assert_eq!(app.chat.input.text(), "");
        assert_eq!(
            app.chat.cells,
            vec![
                ChatCell::User {
                    text: "What skills do I need?".to_string()
                },
                ChatCell::Typing,
            ]
        );
    }

    #[test]
    fn test_chat_answer_replaces_typing_and_extends_history() {
        let mut app = app();
        app.active_view = View::Chat;
        app.chat.input.set_text("How do I switch to data science?");
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SendChat { task, .. }] => *task,
            other => panic!("expected a chat effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Chat, task);

        complete_task(
            &mut app,
            TaskKind::Chat,
            task,
            UiEvent::Chat(ChatEvent::Answered {
                message: "How do I switch to data science?".to_string(),
                answer: "Start with statistics and Python.".to_string(),
            }),
        );

        assert_eq!(
            app.chat.cells.last(),
            Some(&ChatCell::Assistant {
                text: "Start with statistics and Python.".to_string()
            })
        );
        assert_eq!(app.chat.history.len(), 2);
        assert_eq!(app.chat.history[0].role, "user");
        assert_eq!(app.chat.history[1].role, "assistant");
        assert_eq!(app.chat.history[1].content, "Start with statistics and Python.");
    }

    #[test]
    fn test_chat_failure_keeps_history_clean() {
        let mut app = app();
        app.active_view = View::Chat;
        app.chat.input.set_text("hello");
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SendChat { task, .. }] => *task,
            other => panic!("expected a chat effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Chat, task);

        complete_task(
            &mut app,
            TaskKind::Chat,
            task,
            UiEvent::Chat(ChatEvent::Failed {
                error: "No response from advisor".to_string(),
            }),
        );

        assert_eq!(
            app.chat.cells.last(),
            Some(&ChatCell::Error {
                message: "No response from advisor".to_string()
            })
        );
        assert!(app.chat.history.is_empty());
        assert_eq!(app.status.message, "Error: No response from advisor");
    }

    #[test]
    fn test_chat_submit_ignored_while_reply_pending() {
        let mut app = app();
        app.active_view = View::Chat;
        app.chat.input.set_text("first");
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SendChat { task, .. }] => *task,
            other => panic!("expected a chat effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Chat, task);

        app.chat.input.set_text("second");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        // Still just the first exchange's cells, and the draft is kept
        assert_eq!(app.chat.cells.len(), 2);
        assert_eq!(app.chat.input.text(), "second");
        assert_eq!(app.status.message, "Still waiting for the advisor's reply");
        assert_eq!(app.status.tone, StatusTone::Warning);
    }

    #[test]
    fn test_jobs_submit_requires_role() {
        let mut app = app();
        app.active_view = View::Jobs;
        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(app.status.message, "Please select a role first");
    }

    #[test]
    fn test_jobs_empty_result_shows_no_results_without_notice() {
        let mut app = ready_app();
        app.active_view = View::Jobs;
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SearchJobs { task, role }] => {
                assert_eq!(role, "Software Engineer");
                *task
            }
            other => panic!("expected a jobs effect, got {other:?}"),
        };
        assert_eq!(app.status.message, "Searching jobs...");
        start_task(&mut app, TaskKind::Jobs, task);

        complete_task(
            &mut app,
            TaskKind::Jobs,
            task,
            UiEvent::Jobs(JobsEvent::Found { jobs: vec![] }),
        );

        assert_eq!(app.jobs.output, JobsOutput::NoResults);
        assert_eq!(app.status.message, READY_MESSAGE);
    }

    #[test]
    fn test_jobs_found_notifies_count() {
        use pivot_core::api::types::JobPosting;

        let mut app = ready_app();
        app.active_view = View::Jobs;
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SearchJobs { task, .. }] => *task,
            other => panic!("expected a jobs effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Jobs, task);

        let jobs = vec![
            JobPosting {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                ..JobPosting::default()
            },
            JobPosting {
                title: "Platform Engineer".to_string(),
                company: "Globex".to_string(),
                ..JobPosting::default()
            },
        ];
        complete_task(
            &mut app,
            TaskKind::Jobs,
            task,
            UiEvent::Jobs(JobsEvent::Found { jobs }),
        );

        assert!(matches!(&app.jobs.output, JobsOutput::Ready { jobs } if jobs.len() == 2));
        assert_eq!(app.status.message, "Found 2 jobs!");
    }

    #[test]
    fn test_jobs_failure_sets_error_and_notice() {
        let mut app = ready_app();
        app.active_view = View::Jobs;
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match &effects[..] {
            [UiEffect::SearchJobs { task, .. }] => *task,
            other => panic!("expected a jobs effect, got {other:?}"),
        };
        start_task(&mut app, TaskKind::Jobs, task);

        complete_task(
            &mut app,
            TaskKind::Jobs,
            task,
            UiEvent::Jobs(JobsEvent::Failed {
                error: "SerpAPI quota exceeded".to_string(),
            }),
        );

        assert_eq!(
            app.jobs.output,
            JobsOutput::Error {
                message: "SerpAPI quota exceeded".to_string()
            }
        );
        assert_eq!(app.status.message, "Error: SerpAPI quota exceeded");
    }

    #[test]
    fn test_ctrl_c_and_ctrl_q_quit() {
        let mut by_ctrl_c = app();
        let effects = update(&mut by_ctrl_c, key_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(&effects[..], [UiEffect::Quit]));
        assert!(by_ctrl_c.should_quit);

        let mut by_ctrl_q = app();
        let effects = update(&mut by_ctrl_q, key_with(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(matches!(&effects[..], [UiEffect::Quit]));
        assert!(by_ctrl_q.should_quit);
    }

    #[test]
    fn test_view_navigation_keys() {
        let mut app = app();

        update(&mut app, key_with(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert_eq!(app.active_view, View::Market);

        update(&mut app, key_with(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert_eq!(app.active_view, View::Insights);

        update(&mut app, key_with(KeyCode::Char('6'), KeyModifiers::ALT));
        assert_eq!(app.active_view, View::Chat);

        update(&mut app, key_with(KeyCode::Char('3'), KeyModifiers::ALT));
        assert_eq!(app.active_view, View::College);
    }

    #[test]
    fn test_sidebar_collapses_when_terminal_narrows() {
        let mut app = app();
        update(&mut app, UiEvent::Frame { width: 120, height: 40 });
        assert!(app.sidebar_visible);

        update(&mut app, UiEvent::Frame { width: 70, height: 40 });
        assert!(!app.sidebar_visible);

        // Manual toggle stays open while the width does not cross again
        update(&mut app, key_with(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert!(app.sidebar_visible);
        update(&mut app, UiEvent::Frame { width: 70, height: 40 });
        assert!(app.sidebar_visible);

        // Widening then narrowing crosses the threshold again
        update(&mut app, UiEvent::Frame { width: 100, height: 40 });
        update(&mut app, UiEvent::Frame { width: 60, height: 40 });
        assert!(!app.sidebar_visible);
    }

    #[test]
    fn test_view_switch_closes_drawer_on_narrow_terminal() {
        let mut app = app();
        update(&mut app, UiEvent::Frame { width: 70, height: 40 });
        update(&mut app, key_with(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert!(app.sidebar_visible);

        update(&mut app, key_with(KeyCode::Char('2'), KeyModifiers::ALT));
        assert_eq!(app.active_view, View::Market);
        assert!(!app.sidebar_visible);
    }

    #[test]
    fn test_tick_resets_status_after_deadline() {
        let mut app = app();
        app.status.notify("Found 2 jobs!", StatusTone::Success);

        update(&mut app, UiEvent::Tick);
        assert_eq!(app.status.message, "Found 2 jobs!");

        app.status.reset_at = Some(Instant::now() - Duration::from_millis(1));
        update(&mut app, UiEvent::Tick);
        assert_eq!(app.status.message, READY_MESSAGE);
    }
}
