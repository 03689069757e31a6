//! Job search workspace: category/role selectors over a scrollable list of
//! posting cards.

use pivot_core::api::types::JobPosting;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::{AppState, JobsField, JobsOutput, ScrollState};

use super::{
    panel_title, render_catalog_missing, render_error, render_hint, render_loading,
    render_selector, textwrap,
};

/// Wrapped description lines kept per card.
const DESCRIPTION_LINES: usize = 2;

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
        &app.jobs.category,
        app.jobs.focus == JobsField::Category,
    );
    render_selector(
        frame,
        form[1],
        "Role",
        &app.jobs.role,
        app.jobs.focus == JobsField::Role,
    );

    render_results(app, frame, rows[1]);
}

fn render_results(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = match &app.jobs.output {
        JobsOutput::Ready { jobs } => format!("Postings ({})", jobs.len()),
        _ => "Postings".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(panel_title(&title))
        .title_bottom(
            Line::from(Span::styled(
                " PgUp/PgDn scroll ",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    match &app.jobs.output {
        JobsOutput::Empty => {
            render_hint(frame, inner, "Pick a role and press Enter to search.");
        }
        JobsOutput::Loading => {
            render_loading(app, frame, inner, "Searching job postings...");
        }
        JobsOutput::NoResults => {
            render_hint(frame, inner, "No jobs found for this role.");
        }
        JobsOutput::Error { message } => {
            render_error(frame, inner, message);
        }
        JobsOutput::Ready { jobs } => {
            render_cards(frame, inner, jobs, &app.jobs.scroll);
        }
    }
}

/// Renders posting cards with vertical scrolling, updating the scroll bound.
fn render_cards(frame: &mut Frame, area: Rect, jobs: &[JobPosting], scroll: &ScrollState) {
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (i, job) in jobs.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(card_lines(job, width));
    }

    let max = (lines.len() as u16).saturating_sub(area.height);
    scroll.max.set(max);
    let offset = scroll.offset.min(max);

    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

/// Lines for one posting: title, company/location, trimmed description, link.
fn card_lines(job: &JobPosting, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let title = if job.title.is_empty() {
        "(untitled posting)"
    } else {
        job.title.as_str()
    };
    lines.push(Line::from(vec![
        Span::styled("▪ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let mut where_spans = Vec::new();
    if !job.company.is_empty() {
        where_spans.push(Span::styled(
            format!("  {}", job.company),
            Style::default().fg(Color::Gray),
        ));
    }
    if !job.location.is_empty() {
        let sep = if where_spans.is_empty() { "  " } else { ", " };
        where_spans.push(Span::styled(
            format!("{sep}{}", job.location),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !where_spans.is_empty() {
        lines.push(Line::from(where_spans));
    }

    if !job.description.is_empty() {
        let wrapped = textwrap(&job.description, width.saturating_sub(2));
        for (i, text) in wrapped.iter().take(DESCRIPTION_LINES).enumerate() {
            let truncated = i + 1 == DESCRIPTION_LINES && wrapped.len() > DESCRIPTION_LINES;
            let text = if truncated {
                format!("  {text}…")
            } else {
                format!("  {text}")
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if !job.link.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", job.link),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }

    lines
}
