//! Markdown parsing and rendering for advisor responses.
//!
//! This module provides:
//! - `render_markdown()`: Parse markdown text into styled lines
//! - `wrap_styled_spans()`: Wrap styled spans while preserving styles across line breaks
//! - UI-agnostic [`Style`] and span types converted to terminal colors at draw time
//!
//! Uses pulldown-cmark for parsing.

mod parse;
mod style;
mod wrap;

pub use parse::render_markdown;
pub use style::{Style, StyledLine, StyledSpan};
pub use wrap::{WrapOptions, wrap_styled_spans};
