//! Career insights workspace: cascading category/role selectors over a
//! markdown output panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::state::{AppState, InsightsField};

use super::{render_catalog_missing, render_output, render_selector};

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    if app.catalog.is_none() {
        render_catalog_missing(app, frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_selector(
        frame,
        form[0],
        "Category",
        &app.insights.category,
        app.insights.focus == InsightsField::Category,
    );
    render_selector(
        frame,
        form[1],
        "Role",
        &app.insights.role,
        app.insights.focus == InsightsField::Role,
    );

    render_output(
        app,
        frame,
        rows[1],
        "Insights",
        &app.insights.output,
        app.insights.chart.as_ref(),
        &app.insights.scroll,
        "Pick a category and role, then press Enter to generate insights.",
    );
}
