//! Pure view/render functions for the TUI chrome.
//!
//! This module draws the frame skeleton (header, sidebar, status line) and
//! dispatches the active workspace to `views`. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never return effects
//!
//! The one sanctioned "mutation" is writing scroll upper bounds into
//! `ScrollState::max` cells, since content height only exists at draw time.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::markdown::{Style as MdStyle, StyledLine};
use crate::state::{AppState, StatusTone, View};
use crate::views;

/// Height of the header bar.
const HEADER_HEIGHT: u16 = 3;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Width of the sidebar when visible.
const SIDEBAR_WIDTH: u16 = 26;

/// Spinner frames for status line animation.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame; slows the animation to a readable speed.
pub const SPINNER_SPEED_DIVISOR: usize = 6;

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);

    // Body: optional sidebar on the left, active workspace on the right
    let body = chunks[1];
    if app.sidebar_visible && body.width > SIDEBAR_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(body);
        render_sidebar(app, frame, columns[0]);
        views::render_view(app, frame, columns[1]);
    } else {
        views::render_view(app, frame, body);
    }

    render_status_line(app, frame, chunks[2]);
}

/// The spinner glyph for the current animation frame.
pub fn spinner(app: &AppState) -> &'static str {
    let idx = (app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Renders the header bar: app name on the left, active view on the right.
fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Pivot ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("AI Career Advisor", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", app.active_view.title()),
                Style::default().fg(Color::White),
            ))
            .alignment(Alignment::Right),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    // One-line hint strip inside the header
    let hints = Line::from(vec![
        Span::styled("Ctrl+N/P", Style::default().fg(Color::DarkGray)),
        Span::raw(" switch view  "),
        Span::styled("Alt+1-6", Style::default().fg(Color::DarkGray)),
        Span::raw(" jump  "),
        Span::styled("Ctrl+B", Style::default().fg(Color::DarkGray)),
        Span::raw(" sidebar  "),
        Span::styled("Ctrl+Q", Style::default().fg(Color::DarkGray)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), inner);
}

/// Renders the sidebar navigation list.
fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Workspaces ",
            Style::default().fg(Color::DarkGray),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let marker = if *view == app.active_view { "▸" } else { " " };
            let style = if *view == app.active_view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled((i + 1).to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", view.title()), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the status line at the bottom of the screen.
///
/// A running task shows the spinner ahead of the message; the message color
/// follows the status tone.
fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let tone_color = match app.status.tone {
        StatusTone::Info => Color::DarkGray,
        StatusTone::Success => Color::Green,
        StatusTone::Warning => Color::Yellow,
        StatusTone::Error => Color::Red,
    };

    let mut spans = Vec::new();
    if app.tasks.is_any_running() {
        spans.push(Span::styled(
            format!(" {} ", spinner(app)),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        app.status.message.clone(),
        Style::default().fg(tone_color),
    ));

    let status = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(status, area);
}

// ============================================================================
// Style Conversion Helpers
// ============================================================================

/// Converts a markdown `StyledLine` to a ratatui Line.
pub fn convert_styled_line(styled_line: StyledLine) -> Line<'static> {
    let spans: Vec<Span<'static>> = styled_line
        .spans
        .into_iter()
        .map(|s| {
            let style = convert_style(s.style);
            Span::styled(s.text, style)
        })
        .collect();
    Line::from(spans)
}

/// Converts a semantic markdown style to a ratatui Style.
pub fn convert_style(style: MdStyle) -> Style {
    match style {
        MdStyle::Plain => Style::default(),
        MdStyle::Text => Style::default().fg(Color::White),
        MdStyle::Muted => Style::default().fg(Color::DarkGray),
        MdStyle::Error => Style::default().fg(Color::Red),
        MdStyle::UserPrefix => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        MdStyle::User => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::ITALIC),

        // Markdown styles
        MdStyle::CodeInline => Style::default().fg(Color::Cyan),
        MdStyle::CodeBlock => Style::default().fg(Color::Cyan),
        MdStyle::CodeFence => Style::default().fg(Color::DarkGray),
        MdStyle::Emphasis => Style::default().add_modifier(Modifier::ITALIC),
        MdStyle::Strong => Style::default().add_modifier(Modifier::BOLD),
        MdStyle::H1 => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        MdStyle::H2 => Style::default().add_modifier(Modifier::BOLD),
        MdStyle::H3 => Style::default()
            .add_modifier(Modifier::ITALIC)
            .fg(Color::White),
        MdStyle::Link => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
        MdStyle::BlockQuote => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::ITALIC),
        MdStyle::ListBullet => Style::default().fg(Color::Yellow),
        MdStyle::ListNumber => Style::default().fg(Color::Yellow),
    }
}
