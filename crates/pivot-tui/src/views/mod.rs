//! Per-workspace rendering.
//!
//! Each view file draws one workspace into the body area; this module holds
//! the dispatch plus the form widgets every workspace shares (text inputs,
//! option selectors, markdown output panels).

mod chart;
mod chat;
mod generate;
mod insights;
mod jobs;
mod resume;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{Selector, TextBuffer};
use crate::markdown::render_markdown;
use crate::render::{convert_styled_line, spinner};
use crate::state::{AppState, ScrollState, View, ViewOutput};

/// Renders the active workspace into `area`.
pub fn render_view(app: &AppState, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match app.active_view {
        View::Insights => insights::render(app, frame, area),
        View::Market => generate::render_market(app, frame, area),
        View::College => generate::render_college(app, frame, area),
        View::Resume => resume::render(app, frame, area),
        View::Jobs => jobs::render(app, frame, area),
        View::Chat => chat::render(app, frame, area),
    }
}

/// Border color for a form element depending on focus.
fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn panel_title(text: &str) -> Span<'static> {
    Span::styled(format!(" {text} "), Style::default().fg(Color::Gray))
}

/// Renders a bordered single-line text input.
///
/// When focused, the terminal cursor is placed at the edit position and long
/// text scrolls horizontally so the cursor stays visible.
fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    buffer: &TextBuffer,
    focused: bool,
    placeholder: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(panel_title(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let text = buffer.text();
    if text.is_empty() {
        let hint = Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, inner);
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let (_, col) = buffer.cursor();
    let first_line = buffer.lines().first().cloned().unwrap_or_default();
    let cursor_width = prefix_width(&first_line, col);

    // Horizontal scroll keeps the cursor inside the box
    let skip = cursor_width.saturating_sub(inner.width.saturating_sub(1));
    let paragraph = Paragraph::new(text).scroll((0, skip));
    frame.render_widget(paragraph, inner);

    if focused {
        frame.set_cursor_position((inner.x + cursor_width - skip, inner.y));
    }
}

/// Display width of the first `col` characters of `line`.
fn prefix_width(line: &str, col: usize) -> u16 {
    let prefix: String = line.chars().take(col).collect();
    prefix.width() as u16
}

/// Renders a bordered option selector showing the current choice.
fn render_selector(frame: &mut Frame, area: Rect, title: &str, selector: &Selector, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(panel_title(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let line = match selector.selected() {
        Some(value) => {
            let arrows = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled("◂ ", arrows),
                Span::styled(value.to_string(), Style::default().fg(Color::White)),
                Span::styled(" ▸", arrows),
            ])
        }
        None => Line::from(Span::styled(
            "(no options)",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
}

/// Renders a markdown output panel for a generation-style view.
///
/// Handles all four output phases and, for `Ready` output with a chart, gives
/// the chart a fixed band under the text. The scroll bound is written back
/// through the `ScrollState` cell.
#[allow(clippy::too_many_arguments)]
fn render_output(
    app: &AppState,
    frame: &mut Frame,
    area: Rect,
    title: &str,
    output: &ViewOutput,
    chart: Option<&pivot_core::chart::ChartSpec>,
    scroll: &ScrollState,
    empty_hint: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(panel_title(title))
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

    match output {
        ViewOutput::Empty => {
            render_hint(frame, inner, empty_hint);
        }
        ViewOutput::Loading => {
            render_loading(app, frame, inner, "Working on it...");
        }
        ViewOutput::Error { message } => {
            render_error(frame, inner, message);
        }
        ViewOutput::Ready { text } => {
            // Reserve a band for the chart when there is room for both
            let (text_area, chart_area) = match chart {
                Some(spec) if !spec.is_empty() && inner.height >= 18 => {
                    let chart_height = chart::CHART_HEIGHT.min(inner.height / 2);
                    let text_area = Rect {
                        height: inner.height - chart_height,
                        ..inner
                    };
                    let chart_area = Rect {
                        y: inner.y + text_area.height,
                        height: chart_height,
                        ..inner
                    };
                    (text_area, Some(chart_area))
                }
                _ => (inner, None),
            };

            render_markdown_text(frame, text_area, text, scroll);
            if let (Some(chart_area), Some(spec)) = (chart_area, chart) {
                chart::render_chart(frame, chart_area, spec);
            }
        }
    }
}

/// Renders markdown text with vertical scrolling, updating the scroll bound.
fn render_markdown_text(frame: &mut Frame, area: Rect, text: &str, scroll: &ScrollState) {
    let lines: Vec<Line> = render_markdown(text, area.width as usize)
        .into_iter()
        .map(convert_styled_line)
        .collect();

    let max = (lines.len() as u16).saturating_sub(area.height);
    scroll.max.set(max);
    let offset = scroll.offset.min(max);

    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

/// Centered dimmed hint for empty output areas.
fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    let y = area.y + area.height / 2;
    let hint_area = Rect {
        y,
        height: 1,
        ..area
    };
    let paragraph = Paragraph::new(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, hint_area);
}

/// Centered spinner row shown while a request is in flight.
fn render_loading(app: &AppState, frame: &mut Frame, area: Rect, message: &str) {
    let y = area.y + area.height / 2;
    let row = Rect {
        y,
        height: 1,
        ..area
    };
    let line = Line::from(vec![
        Span::styled(spinner(app), Style::default().fg(Color::Cyan)),
        Span::styled(format!(" {message}"), Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

/// Inline error panel shown in place of output.
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let mut lines = vec![Line::from(Span::styled(
        "Request failed",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::default());
    for wrapped in textwrap(message, area.width as usize) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Shown in catalog-backed views before `/api/careers` has loaded.
fn render_catalog_missing(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let lines: Vec<Line> = if let Some(error) = &app.careers_error {
        vec![
            Line::from(Span::styled(
                "Career data unavailable",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::White)),
                Span::styled(" to retry.", Style::default().fg(Color::DarkGray)),
            ]),
        ]
    } else {
        vec![Line::from(vec![
            Span::styled(spinner(app), Style::default().fg(Color::Cyan)),
            Span::styled(
                " Loading career data...",
                Style::default().fg(Color::Gray),
            ),
        ])]
    };

    let y = inner.y + (inner.height / 2).saturating_sub(lines.len() as u16 / 2);
    let text_area = Rect {
        y,
        height: (lines.len() as u16).min(inner.height),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );
}

/// Greedy word wrap for plain (unstyled) text.
fn textwrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut out = Vec::new();
    for raw in text.lines() {
        if raw.width() <= width {
            out.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.width() + 1 + word.width() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                out.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textwrap_splits_long_lines_on_words() {
        let wrapped = textwrap("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn textwrap_keeps_short_lines_intact() {
        assert_eq!(textwrap("hello", 20), vec!["hello"]);
        assert_eq!(textwrap("", 20), vec![""]);
    }

    #[test]
    fn prefix_width_counts_chars_up_to_cursor() {
        assert_eq!(prefix_width("hello", 3), 3);
        assert_eq!(prefix_width("héllo", 2), 2);
        assert_eq!(prefix_width("", 0), 0);
    }
}
