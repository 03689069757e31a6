//! Resume analysis workspace: target role, optional file path, pasted resume
//! text, and the analysis output.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::TextBuffer;
use crate::state::{AppState, ResumeField};

use super::{border_style, panel_title, prefix_width, render_output, render_text_input};

/// Rows given to the resume textarea.
const TEXTAREA_HEIGHT: u16 = 8;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(TEXTAREA_HEIGHT),
            Constraint::Min(1),
        ])
        .split(area);

    render_text_input(
        frame,
        rows[0],
        "Target Role",
        &app.resume.target_role,
        app.resume.focus == ResumeField::TargetRole,
        "defaults to General",
    );
    render_text_input(
        frame,
        rows[1],
        "Resume File",
        &app.resume.file_path,
        app.resume.focus == ResumeField::FilePath,
        "path to a PDF or text file (optional)",
    );
    render_textarea(
        frame,
        rows[2],
        &app.resume.resume_text,
        app.resume.focus == ResumeField::ResumeText,
    );

    render_output(
        app,
        frame,
        rows[3],
        "Analysis",
        &app.resume.output,
        None,
        &app.resume.scroll,
        "Paste resume text or give a file path, then press Ctrl+S.",
    );
}

/// Multi-line resume text editor with a cursor-following viewport.
fn render_textarea(frame: &mut Frame, area: Rect, buffer: &TextBuffer, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(panel_title("Resume Text"))
        .title_bottom(
            Line::from(Span::styled(
                " Ctrl+S analyze ",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if buffer.text().is_empty() {
        let hint = Paragraph::new(Span::styled(
            "Paste your resume here...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, inner);
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let (row, col) = buffer.cursor();
    let cursor_line = buffer.lines().get(row).cloned().unwrap_or_default();
    let cursor_width = prefix_width(&cursor_line, col);

    // Keep the cursor inside the viewport on both axes
    let row_skip = (row as u16).saturating_sub(inner.height - 1);
    let col_skip = cursor_width.saturating_sub(inner.width.saturating_sub(1));

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .map(|l| Line::from(l.clone()))
        .collect();
    frame.render_widget(Paragraph::new(lines).scroll((row_skip, col_skip)), inner);

    if focused {
        frame.set_cursor_position((
            inner.x + cursor_width - col_skip,
            inner.y + row as u16 - row_skip,
        ));
    }
}
