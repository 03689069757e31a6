use comfy_table::{ContentArrangement, Table};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::style::{Style, StyledLine, StyledSpan};
use super::wrap::{WrapOptions, wrap_styled_spans};
use crate::common::text::sanitize_for_display;

/// Renders markdown text into styled lines.
///
/// This is the main entry point for markdown rendering:
/// - Parses markdown using pulldown-cmark
/// - Converts events to styled spans
/// - Wraps at the given width
pub fn render_markdown(text: &str, width: usize) -> Vec<StyledLine> {
    if text.is_empty() {
        return vec![StyledLine { spans: vec![] }];
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(text, options);
    let mut renderer = MarkdownRenderer::new(width);

    for event in parser {
        renderer.process_event(event);
    }

    renderer.finish()
}

/// Plain-text table accumulator rendered through comfy-table.
#[derive(Debug, Clone, Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Row being built from cells.
    current_row: Vec<String>,
    /// Cell text being collected.
    current_cell: String,
}

impl TableBuffer {
    fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.header.clear();
        self.rows.clear();
        self.current_row.clear();
        self.current_cell.clear();
    }

    fn push_cell_text(&mut self, text: &str) {
        self.current_cell.push_str(text);
    }

    fn finish_cell(&mut self) {
        let cell = std::mem::take(&mut self.current_cell);
        self.current_row.push(cell);
    }

    fn finish_row(&mut self, is_header: bool) {
        let row = std::mem::take(&mut self.current_row);
        if is_header {
            self.header = row;
        } else {
            self.rows.push(row);
        }
    }

    /// Renders the collected cells and returns the table as text lines.
    fn render(&self, max_width: usize) -> Vec<String> {
        let mut table = Table::new();
        table.set_width(max_width as u16);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        if !self.header.is_empty() {
            table.set_header(&self.header);
        }
        for row in &self.rows {
            table.add_row(row);
        }

        table.to_string().lines().map(String::from).collect()
    }
}

/// Internal state for markdown rendering.
struct MarkdownRenderer {
    width: usize,
    lines: Vec<StyledLine>,
    /// Spans collected for the current paragraph or block.
    current_spans: Vec<StyledSpan>,
    /// Stack of nested inline styles.
    style_stack: Vec<Style>,
    in_code_block: bool,
    /// Language tag of the current fenced block, if any.
    code_block_lang: Option<String>,
    /// List nesting; one entry per open list.
    list_stack: Vec<ListState>,
    in_table: bool,
    in_table_head: bool,
    table_buffer: TableBuffer,
}

#[derive(Debug, Clone)]
struct ListState {
    /// None for unordered, Some(n) for ordered starting at n.
    ordered: Option<u64>,
    /// Current item number (for ordered lists).
    current_item: u64,
}

impl MarkdownRenderer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current_spans: Vec::new(),
            style_stack: vec![Style::Text],
            in_code_block: false,
            code_block_lang: None,
            list_stack: Vec::new(),
            in_table: false,
            in_table_head: false,
            table_buffer: TableBuffer::new(),
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or(Style::Text)
    }

    fn push_style(&mut self, style: Style) {
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        // The base style stays on the stack
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_inline_code(&code),
            Event::SoftBreak => self.add_soft_break(),
            Event::HardBreak => self.add_hard_break(),
            Event::Html(_) | Event::InlineHtml(_) => {
                // Skip HTML to avoid terminal injection
            }
            Event::FootnoteReference(_) => {}
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.current_spans.push(StyledSpan {
                    text: marker.to_string(),
                    style: Style::ListBullet,
                });
            }
            Event::Rule => {
                self.flush_paragraph();
                self.lines.push(StyledLine {
                    spans: vec![StyledSpan {
                        text: "─".repeat(self.width.min(40)),
                        style: Style::Plain,
                    }],
                });
            }
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Math not supported, drop silently
            }
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs are implicit containers
            }
            Tag::Heading { level, .. } => {
                let style = match level {
                    HeadingLevel::H1 => Style::H1,
                    HeadingLevel::H2 => Style::H2,
                    _ => Style::H3,
                };
                self.push_style(style);
            }
            Tag::CodeBlock(kind) => {
                self.flush_paragraph();
                self.in_code_block = true;
                self.code_block_lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.push_style(Style::CodeBlock);
            }
            Tag::List(start) => {
                self.flush_paragraph();
                self.list_stack.push(ListState {
                    ordered: start,
                    current_item: start.unwrap_or(1),
                });
            }
            Tag::Item => {
                self.flush_paragraph();
            }
            Tag::BlockQuote(_) => {
                self.flush_paragraph();
                self.push_style(Style::BlockQuote);
            }
            Tag::Emphasis => {
                self.push_style(Style::Emphasis);
            }
            Tag::Strong => {
                self.push_style(Style::Strong);
            }
            Tag::Strikethrough => {
                // Terminal strikethrough support varies, render plain
                self.push_style(Style::Plain);
            }
            Tag::Link { .. } => {
                self.push_style(Style::Link);
            }
            Tag::Image { .. } => {
                // Images not representable in a terminal
            }
            Tag::Table(_) => {
                self.flush_paragraph();
                self.in_table = true;
                self.table_buffer.clear();
            }
            Tag::TableHead => {
                self.in_table_head = true;
            }
            Tag::TableRow => {
                // Row is built via cell events
            }
            Tag::TableCell => {
                self.table_buffer.current_cell.clear();
            }
            Tag::FootnoteDefinition(_) => {}
            Tag::MetadataBlock(_) => {}
            Tag::HtmlBlock => {}
            Tag::DefinitionList | Tag::DefinitionListTitle | Tag::DefinitionListDefinition => {}
            Tag::Superscript | Tag::Subscript => {
                self.push_style(Style::Plain);
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_paragraph();
                // Blank line after paragraph, but not inside list items
                if self.list_stack.is_empty() {
                    self.lines.push(StyledLine::empty());
                }
            }
            TagEnd::Heading(_) => {
                self.flush_paragraph();
                self.pop_style();
                self.lines.push(StyledLine::empty());
            }
            TagEnd::CodeBlock => {
                self.flush_code_block();
                self.in_code_block = false;
                self.pop_style();
                self.lines.push(StyledLine::empty());
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.lines.push(StyledLine::empty());
                }
            }
            TagEnd::Item => {
                self.flush_list_item();
                if let Some(list) = self.list_stack.last_mut() {
                    list.current_item += 1;
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_paragraph();
                self.pop_style();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style();
            }
            TagEnd::Table => {
                self.flush_table();
                self.in_table = false;
                self.lines.push(StyledLine::empty());
            }
            TagEnd::TableHead => {
                self.table_buffer.finish_row(true);
                self.in_table_head = false;
            }
            TagEnd::TableRow => {
                if !self.in_table_head {
                    self.table_buffer.finish_row(false);
                }
            }
            TagEnd::TableCell => {
                self.table_buffer.finish_cell();
            }
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = sanitize_for_display(text);

        // Inside a table, collect plain text for the current cell
        if self.in_table {
            let text = text.replace('\n', " ");
            self.table_buffer.push_cell_text(&text);
            return;
        }

        self.current_spans.push(StyledSpan {
            text: text.into_owned(),
            style: self.current_style(),
        });
    }

    fn add_inline_code(&mut self, code: &str) {
        if self.in_table {
            let code = code.replace('\n', " ");
            self.table_buffer.push_cell_text(&format!("`{code}`"));
            return;
        }

        self.current_spans.push(StyledSpan {
            text: code.to_string(),
            style: Style::CodeInline,
        });
    }

    fn add_soft_break(&mut self) {
        if self.in_table {
            self.table_buffer.push_cell_text(" ");
            return;
        }

        // Soft break becomes a space
        self.current_spans.push(StyledSpan {
            text: " ".to_string(),
            style: self.current_style(),
        });
    }

    fn add_hard_break(&mut self) {
        if self.in_table {
            self.table_buffer.push_cell_text(" ");
            return;
        }

        // Hard break forces a new line within the current block
        self.current_spans.push(StyledSpan {
            text: "\n".to_string(),
            style: self.current_style(),
        });
    }

    fn flush_paragraph(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }

        let spans = std::mem::take(&mut self.current_spans);
        let opts = WrapOptions::new(self.width);
        let wrapped = wrap_styled_spans(&spans, &opts);
        self.lines.extend(wrapped);
    }

    fn flush_code_block(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }

        // Code blocks: emit each line as-is, no wrapping
        let spans = std::mem::take(&mut self.current_spans);
        let full_text: String = spans.iter().map(|s| s.text.as_str()).collect();

        let fence_text = match &self.code_block_lang {
            Some(lang) => format!("```{lang}"),
            None => "```".to_string(),
        };
        self.lines.push(StyledLine {
            spans: vec![StyledSpan {
                text: fence_text,
                style: Style::CodeFence,
            }],
        });

        // Trim trailing newline to avoid an empty line before the closing fence
        let trimmed = full_text.trim_end_matches('\n');

        for line in trimmed.split('\n') {
            self.lines.push(StyledLine {
                spans: vec![
                    StyledSpan {
                        text: "  ".to_string(),
                        style: Style::Plain,
                    },
                    StyledSpan {
                        text: line.to_string(),
                        style: Style::CodeBlock,
                    },
                ],
            });
        }

        self.lines.push(StyledLine {
            spans: vec![StyledSpan {
                text: "```".to_string(),
                style: Style::CodeFence,
            }],
        });

        self.code_block_lang = None;
    }

    fn flush_list_item(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }

        let spans = std::mem::take(&mut self.current_spans);

        let (marker, marker_style) = if let Some(list) = self.list_stack.last() {
            if list.ordered.is_some() {
                (format!("{}. ", list.current_item), Style::ListNumber)
            } else {
                ("• ".to_string(), Style::ListBullet)
            }
        } else {
            ("• ".to_string(), Style::ListBullet)
        };

        let indent_level = self.list_stack.len().saturating_sub(1);
        let base_indent = "  ".repeat(indent_level);
        let marker_width = marker.width();

        let opts = WrapOptions {
            width: self.width,
            first_prefix: vec![
                StyledSpan {
                    text: base_indent.clone(),
                    style: Style::Plain,
                },
                StyledSpan {
                    text: marker,
                    style: marker_style,
                },
            ],
            rest_prefix: vec![StyledSpan {
                text: format!("{base_indent}{}", " ".repeat(marker_width)),
                style: Style::Plain,
            }],
        };

        let wrapped = wrap_styled_spans(&spans, &opts);
        self.lines.extend(wrapped);
    }

    fn flush_table(&mut self) {
        let table_lines = self.table_buffer.render(self.width);

        for line in table_lines {
            self.lines.push(StyledLine {
                spans: vec![StyledSpan {
                    text: line,
                    style: Style::Plain,
                }],
            });
        }

        self.table_buffer.clear();
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if !self.current_spans.is_empty() {
            if self.in_code_block {
                self.flush_code_block();
            } else {
                self.flush_paragraph();
            }
        }

        // Drop trailing blank lines
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }

        if self.lines.is_empty() {
            self.lines.push(StyledLine { spans: vec![] });
        }

        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code() {
        let lines = render_markdown("Learn `SQL` early on", 80);

        let has_code_inline = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::CodeInline));
        assert!(has_code_inline);
    }

    #[test]
    fn test_inline_code_preserves_surrounding_spaces() {
        let lines = render_markdown("master `pandas` quickly", 80);

        let combined: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.text.as_str()))
            .collect();

        assert!(
            combined.contains("master ") && combined.contains(" quickly"),
            "expected spaces around inline code, got: {combined:?}"
        );
    }

    #[test]
    fn test_bold_italic() {
        let lines = render_markdown("**Python** and *statistics* matter most", 80);

        let has_strong = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::Strong));
        let has_emphasis = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::Emphasis));

        assert!(has_strong, "should have Strong style");
        assert!(has_emphasis, "should have Emphasis style");
    }

    #[test]
    fn test_code_block_no_wrap() {
        let md = "```\nSELECT role, salary\n    FROM postings;\n```";
        let lines = render_markdown(md, 20);

        let code_lines: Vec<_> = lines
            .iter()
            .filter(|l| l.spans.iter().any(|s| s.style == Style::CodeBlock))
            .collect();

        assert!(!code_lines.is_empty());
        let has_indent = code_lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.text.contains("    ")));
        assert!(has_indent, "code block should preserve indentation");
    }

    #[test]
    fn test_code_block_tabs_expand_to_spaces() {
        let md = "```\n\tindented line\n```";
        let lines = render_markdown(md, 80);

        let combined: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.text.as_str()))
            .collect();

        assert!(combined.contains("    indented line"));
        assert!(!combined.contains('\t'), "tabs must not reach the terminal");
    }

    #[test]
    fn test_code_fence_carries_language() {
        let md = "```python\nprint('hi')\n```";
        let lines = render_markdown(md, 80);

        let has_lang_fence = lines.iter().any(|l| {
            l.spans
                .iter()
                .any(|s| s.style == Style::CodeFence && s.text == "```python")
        });
        assert!(has_lang_fence);
    }

    #[test]
    fn test_heading_styles() {
        let lines = render_markdown("# Overview\n\n## Key Skills\n\n### Outlook", 80);

        let has_h1 = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::H1));
        let has_h2 = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::H2));
        let has_h3 = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::H3));

        assert!(has_h1, "should have H1 style");
        assert!(has_h2, "should have H2 style");
        assert!(has_h3, "should have H3 style");
    }

    #[test]
    fn test_list_indent() {
        let lines = render_markdown("- Python\n- SQL\n- Communication", 80);

        let has_bullet = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::ListBullet));
        assert!(has_bullet, "should have list bullets");
    }

    #[test]
    fn test_ordered_list() {
        let lines = render_markdown("1. Learn the basics\n2. Build projects", 80);

        let has_number = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::ListNumber));
        assert!(has_number, "should have list numbers");
    }

    #[test]
    fn test_plain_text_uses_base_style() {
        let lines = render_markdown("Just plain advice without any markdown", 80);

        assert!(!lines.is_empty());
        let has_text = lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.style == Style::Text));
        assert!(has_text);
    }

    #[test]
    fn test_empty_input() {
        let lines = render_markdown("", 80);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_table_renders() {
        let md = "| Skill | Demand |\n|---|---|\n| Python | High |";
        let lines = render_markdown(md, 80);

        assert!(lines.len() >= 3, "table should render multiple lines");

        let combined: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.text.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        assert!(combined.contains("Skill"), "table should contain header");
        assert!(combined.contains("Python"), "table should contain cell");
        assert!(combined.contains("High"), "table should contain cell");
    }
}
