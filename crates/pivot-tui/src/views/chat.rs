//! Advisor chat workspace: transcript over a message input.
//!
//! The transcript is bottom-anchored; the scroll offset counts lines back
//! from the latest message so new replies keep the view pinned to the end.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::markdown::{
    Style as MdStyle, StyledSpan, WrapOptions, render_markdown, wrap_styled_spans,
};
use crate::render::{convert_styled_line, spinner};
use crate::state::{AppState, ChatCell};

use super::{panel_title, render_text_input};

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    render_transcript(app, frame, rows[0]);
    render_text_input(
        frame,
        rows[1],
        "Message",
        &app.chat.input,
        true,
        "Ask the advisor anything, press Enter to send",
    );
}

fn render_transcript(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(panel_title("Conversation"));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if app.chat.cells.is_empty() {
        super::render_hint(frame, inner, "Ask the advisor anything about your career.");
        return;
    }

    let lines = transcript_lines(app, inner.width as usize);
    let height = inner.height as usize;
    let total = lines.len();

    let max = (total.saturating_sub(height)) as u16;
    app.chat.scroll.max.set(max);
    let offset = app.chat.scroll.offset.min(max) as usize;

    // Window ends `offset` lines above the latest line
    let end = total - offset;
    let start = end.saturating_sub(height);
    let mut visible: Vec<Line> = lines[start..end].to_vec();

    // Bottom-align short transcripts
    if visible.len() < height {
        let padding = height - visible.len();
        let mut padded = vec![Line::default(); padding];
        padded.append(&mut visible);
        visible = padded;
    }

    frame.render_widget(Paragraph::new(visible), inner);
}

/// Flattens the transcript cells into wrapped, styled lines.
fn transcript_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (i, cell) in app.chat.cells.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        match cell {
            ChatCell::User { text } => {
                let prefix = vec![StyledSpan::new("│ ", MdStyle::UserPrefix)];
                let opts = WrapOptions {
                    width,
                    first_prefix: prefix.clone(),
                    rest_prefix: prefix,
                };
                let spans = [StyledSpan::new(text.clone(), MdStyle::User)];
                lines.extend(
                    wrap_styled_spans(&spans, &opts)
                        .into_iter()
                        .map(convert_styled_line),
                );
            }
            ChatCell::Assistant { text } => {
                lines.extend(
                    render_markdown(text, width)
                        .into_iter()
                        .map(convert_styled_line),
                );
            }
            ChatCell::Typing => {
                lines.push(Line::from(vec![
                    Span::styled(spinner(app), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        " Advisor is typing...",
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            ChatCell::Error { message } => {
                let opts = WrapOptions {
                    width,
                    first_prefix: vec![StyledSpan::new("✗ ", MdStyle::Error)],
                    rest_prefix: vec![StyledSpan::new("  ", MdStyle::Plain)],
                };
                let spans = [StyledSpan::new(message.clone(), MdStyle::Error)];
                lines.extend(
                    wrap_styled_spans(&spans, &opts)
                        .into_iter()
                        .map(convert_styled_line),
                );
            }
        }
    }

    lines
}
