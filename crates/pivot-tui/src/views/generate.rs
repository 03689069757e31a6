//! Market analysis and college recommendation workspaces.
//!
//! Both are a single free-text role input over an output panel; only the
//! labels differ.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::state::{AppState, GenerateViewState};

use super::{render_output, render_text_input};

pub fn render_market(app: &AppState, frame: &mut Frame, area: Rect) {
    render_free_text(
        app,
        frame,
        area,
        &app.market,
        "Target Role",
        "e.g. Software Engineer",
        "Analysis",
        "Enter a role and press Enter for a market analysis.",
    );
}

pub fn render_college(app: &AppState, frame: &mut Frame, area: Rect) {
    render_free_text(
        app,
        frame,
        area,
        &app.college,
        "Field of Study",
        "e.g. Data Science",
        "Recommendations",
        "Enter a field and press Enter for college recommendations.",
    );
}

#[allow(clippy::too_many_arguments)]
fn render_free_text(
    app: &AppState,
    frame: &mut Frame,
    area: Rect,
    state: &GenerateViewState,
    input_title: &str,
    placeholder: &str,
    output_title: &str,
    empty_hint: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_text_input(frame, rows[0], input_title, &state.input, true, placeholder);

    render_output(
        app,
        frame,
        rows[1],
        output_title,
        &state.output,
        state.chart.as_ref(),
        &state.scroll,
        empty_hint,
    );
}
