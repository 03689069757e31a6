//! Minimal text buffer for input editing.
//!
//! Backs every editable field in the app: the single-line role and file
//! inputs, the chat box, and the multi-line resume textarea. It supports the
//! subset of editing operations the views need; callers decide whether Enter
//! inserts a newline or submits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    Head,
    End,
}

/// Simple text buffer with line storage and a (row, col) cursor.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }
}

impl TextBuffer {
    /// Returns all lines in the buffer.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the buffer contents joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if the buffer holds no non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Returns the current cursor position as (row, col) in char units.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Replaces the buffer contents, placing the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
    }

    /// Clears the buffer and resets the cursor.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(String::new());
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Inserts a string at the cursor, advancing the cursor.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.ensure_line();
        let row = self.cursor_row;

        if !text.contains('\n') {
            let line = &mut self.lines[row];
            let byte_idx = char_to_byte_index(line, self.cursor_col);
            line.insert_str(byte_idx, text);
            self.cursor_col += text.chars().count();
            return;
        }

        let current_line = self.lines[row].clone();
        let byte_idx = char_to_byte_index(&current_line, self.cursor_col);
        let (prefix, suffix) = current_line.split_at(byte_idx);

        let parts: Vec<&str> = text.split('\n').collect();

        let mut new_lines: Vec<String> = Vec::with_capacity(parts.len());
        new_lines.push(format!("{prefix}{}", parts[0]));
        if parts.len() > 2 {
            for part in &parts[1..parts.len() - 1] {
                new_lines.push((*part).to_string());
            }
        }
        new_lines.push(format!("{}{suffix}", parts[parts.len() - 1]));

        self.lines.splice(row..=row, new_lines);
        self.cursor_row = row + parts.len() - 1;
        self.cursor_col = parts[parts.len() - 1].chars().count();
    }

    /// Inserts a single character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Inserts a newline at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// Deletes the character at the cursor (Delete key semantics).
    pub fn delete_next_char(&mut self) {
        self.ensure_line();

        let row = self.cursor_row;
        let col = self.cursor_col;
        let line_len = line_char_len(&self.lines[row]);

        if col >= line_len {
            if row + 1 < self.lines.len() {
                let next = self.lines.remove(row + 1);
                self.lines[row].push_str(&next);
            }
            return;
        }

        let line = &mut self.lines[row];
        let start = char_to_byte_index(line, col);
        let end = char_to_byte_index(line, col + 1);
        line.replace_range(start..end, "");
    }

    /// Deletes the character before the cursor (Backspace semantics).
    pub fn delete_prev_char(&mut self) {
        self.ensure_line();

        if self.cursor_col > 0 {
            let row = self.cursor_row;
            let col = self.cursor_col - 1;
            let line = &mut self.lines[row];
            let start = char_to_byte_index(line, col);
            let end = char_to_byte_index(line, col + 1);
            line.replace_range(start..end, "");
            self.cursor_col = col;
            return;
        }

        if self.cursor_row == 0 {
            return;
        }

        let row = self.cursor_row;
        let prev_len = line_char_len(&self.lines[row - 1]);
        let current = self.lines.remove(row);
        self.lines[row - 1].push_str(&current);
        self.cursor_row -= 1;
        self.cursor_col = prev_len;
    }

    /// Deletes the word immediately to the left of the cursor.
    pub fn delete_word_left(&mut self) {
        self.ensure_line();
        if self.cursor_row == 0 && self.cursor_col == 0 {
            return;
        }

        let (start_row, start_col) = self.word_left_target();
        let end_row = self.cursor_row;
        let end_col = self.cursor_col;

        self.delete_range(start_row, start_col, end_row, end_col);
        self.cursor_row = start_row;
        self.cursor_col = start_col;
    }

    /// Moves the cursor according to a movement command.
    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.ensure_line();
        match movement {
            CursorMove::Up => {
                if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    let len = line_char_len(&self.lines[self.cursor_row]);
                    self.cursor_col = self.cursor_col.min(len);
                }
            }
            CursorMove::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    let len = line_char_len(&self.lines[self.cursor_row]);
                    self.cursor_col = self.cursor_col.min(len);
                }
            }
            CursorMove::Forward => {
                let len = line_char_len(&self.lines[self.cursor_row]);
                if self.cursor_col < len {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            CursorMove::Back => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
                }
            }
            CursorMove::Head => {
                self.cursor_col = 0;
            }
            CursorMove::End => {
                self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
            }
        }
    }

    /// Handles a key input for basic editing.
    ///
    /// Enter is intentionally not handled: single-line fields submit on it
    /// and the resume textarea inserts a newline, so the caller routes it.
    pub fn input(&mut self, key: KeyEvent) {
        if matches!(key.kind, KeyEventKind::Release) {
            return;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
                self.delete_word_left();
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => {}
        }
    }

    fn ensure_line(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
            self.cursor_row = 0;
            self.cursor_col = 0;
            return;
        }

        if self.cursor_row >= self.lines.len() {
            self.cursor_row = self.lines.len() - 1;
        }
        let len = line_char_len(&self.lines[self.cursor_row]);
        self.cursor_col = self.cursor_col.min(len);
    }

    fn word_left_target(&self) -> (usize, usize) {
        let mut row = self.cursor_row;
        let mut col = self.cursor_col;

        while row > 0 && col == 0 {
            row -= 1;
            col = line_char_len(&self.lines[row]);
        }

        if col == 0 {
            return (row, 0);
        }

        let line = &self.lines[row];
        let chars: Vec<char> = line.chars().collect();
        let mut idx = col.min(chars.len());

        if idx == 0 {
            return (row, 0);
        }

        idx = scan_left_segment(&chars, idx);

        (row, idx)
    }

    fn delete_range(&mut self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) {
        if start_row > end_row || (start_row == end_row && start_col >= end_col) {
            return;
        }

        if start_row == end_row {
            let line = &mut self.lines[start_row];
            let start = char_to_byte_index(line, start_col);
            let end = char_to_byte_index(line, end_col);
            line.replace_range(start..end, "");
            return;
        }

        let start_line = self.lines[start_row].clone();
        let end_line = self.lines[end_row].clone();
        let start_byte = char_to_byte_index(&start_line, start_col);
        let end_byte = char_to_byte_index(&end_line, end_col);

        let prefix = &start_line[..start_byte];
        let suffix = &end_line[end_byte..];
        let merged = format!("{prefix}{suffix}");

        self.lines.splice(start_row..=end_row, [merged]);
    }
}

fn line_char_len(line: &str) -> usize {
    line.chars().count()
}

/// Word characters are alphanumerics and underscore; punctuation and
/// whitespace are separate segments, so deleting inside a path or URL
/// removes one segment at a time.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_word_char(c) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

fn scan_left_segment(chars: &[char], mut idx: usize) -> usize {
    if idx == 0 {
        return 0;
    }
    let class = char_class(chars[idx - 1]);
    while idx > 0 && char_class(chars[idx - 1]) == class {
        idx -= 1;
    }
    idx
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_text_roundtrip() {
        let mut buf = TextBuffer::default();
        buf.insert_str("Data Scientist");
        assert_eq!(buf.text(), "Data Scientist");
        assert_eq!(buf.cursor(), (0, 14));
    }

    #[test]
    fn set_text_places_cursor_at_end() {
        let mut buf = TextBuffer::default();
        buf.set_text("Software Engineer");
        assert_eq!(buf.cursor(), (0, 17));
        buf.insert_char('!');
        assert_eq!(buf.text(), "Software Engineer!");
    }

    #[test]
    fn multiline_insert_splits_lines() {
        let mut buf = TextBuffer::default();
        buf.insert_str("first\nsecond\nthird");
        assert_eq!(buf.lines().len(), 3);
        assert_eq!(buf.cursor(), (2, 5));
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = TextBuffer::default();
        buf.insert_str("ab\ncd");
        buf.move_cursor(CursorMove::Head);
        buf.delete_prev_char();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn is_blank_ignores_whitespace() {
        let mut buf = TextBuffer::default();
        assert!(buf.is_blank());
        buf.insert_str("  \n\t ");
        assert!(buf.is_blank());
        buf.insert_char('x');
        assert!(!buf.is_blank());
    }

    #[test]
    fn delete_word_left_path_segments() {
        let mut buf = TextBuffer::default();
        buf.insert_str("~/resumes/cv_2025.pdf");

        buf.delete_word_left(); // "pdf"
        assert_eq!(buf.text(), "~/resumes/cv_2025.");

        buf.delete_word_left(); // "."
        assert_eq!(buf.text(), "~/resumes/cv_2025");

        buf.delete_word_left(); // "cv_2025"
        assert_eq!(buf.text(), "~/resumes/");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut buf = TextBuffer::default();
        buf.insert_str("one\ntwo");
        buf.clear();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), (0, 0));
    }
}
