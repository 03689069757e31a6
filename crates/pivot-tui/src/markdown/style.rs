/// A styled span of text (UI-agnostic).
///
/// This is a minimal representation that can be converted to
/// ratatui Span/Line types at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        StyledSpan {
            text: text.into(),
            style,
        }
    }
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Creates an empty line.
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    /// Single-span convenience constructor.
    pub fn from_span(text: impl Into<String>, style: Style) -> Self {
        StyledLine {
            spans: vec![StyledSpan::new(text, style)],
        }
    }
}

/// Semantic style identifiers (UI-agnostic).
///
/// These are translated to actual terminal styles by the renderer.
/// This keeps document rendering free of terminal dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No styling.
    Plain,
    /// Body text of a rendered document.
    Text,
    /// Dimmed hint/empty-state text.
    Muted,
    /// Error text (inline failure panels).
    Error,
    /// User chat message prefix ("│ ").
    UserPrefix,
    /// User chat message content.
    User,

    // Markdown styles
    /// Inline code (`code`).
    CodeInline,
    /// Fenced code block content.
    CodeBlock,
    /// Code fence markers (rendered subtly).
    CodeFence,
    /// Emphasized text (*italic*).
    Emphasis,
    /// Strong text (**bold**).
    Strong,
    /// Heading level 1 (# Heading).
    H1,
    /// Heading level 2 (## Heading).
    H2,
    /// Heading level 3+ (`### Heading`).
    H3,
    /// Link text.
    Link,
    /// Blockquote content.
    BlockQuote,
    /// List bullet marker.
    ListBullet,
    /// List number marker.
    ListNumber,
}
