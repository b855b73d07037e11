//! # Markdown boundary
//!
//! The weave core never looks inside markdown. It needs exactly three things
//! from a parser: parse a text span, ask whether the last top-level block is
//! still open, and render each top-level block to HTML.
//!
//! ## Modules
//!
//! - **`cmark`**: `CmarkEngine`, the pulldown-cmark implementation
//! - **`blocks`**: groups pulldown-cmark events into top-level blocks
//! - **`fence`**: fenced code open/close detection
//!
//! ## Contract
//!
//! Implementations must be total (any text parses) and deterministic. The
//! open signal must be stable under re-parsing a growing prefix: the
//! accumulator re-parses its whole buffer on every append and trusts the
//! answer.

pub mod blocks;
pub mod cmark;
pub mod fence;

pub use cmark::{CmarkDocument, CmarkEngine, Extensions};

/// Parses text spans into [`MarkdownDocument`]s.
pub trait MarkdownEngine {
    type Document<'a>: MarkdownDocument
    where
        Self: 'a;

    fn parse<'a>(&'a self, text: &'a str) -> Self::Document<'a>;
}

/// A parsed text span.
pub trait MarkdownDocument {
    /// Whether the last top-level block is unterminated, i.e. more text could
    /// still extend it.
    fn is_open(&self) -> bool;

    /// One HTML fragment per top-level block, in document order.
    fn render_blocks(&self) -> Vec<String>;
}
