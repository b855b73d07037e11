use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

use super::blocks::{self, TopLevelBlock};
use super::{MarkdownDocument, MarkdownEngine};

/// Markdown extensions beyond CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub smart_punctuation: bool,
    /// `""title""` renders as `<cite>title</cite>`.
    pub citations: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: false,
            tasklists: false,
            smart_punctuation: false,
            citations: true,
        }
    }
}

impl Extensions {
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// [`MarkdownEngine`] backed by pulldown-cmark.
#[derive(Debug, Clone)]
pub struct CmarkEngine {
    options: Options,
    citations: bool,
}

impl CmarkEngine {
    pub fn new(extensions: Extensions) -> Self {
        Self {
            options: extensions.options(),
            citations: extensions.citations,
        }
    }
}

impl Default for CmarkEngine {
    fn default() -> Self {
        Self::new(Extensions::default())
    }
}

impl MarkdownEngine for CmarkEngine {
    type Document<'a>
        = CmarkDocument<'a>
    where
        Self: 'a;

    fn parse<'a>(&'a self, text: &'a str) -> Self::Document<'a> {
        let events = Parser::new_ext(text, self.options).into_offset_iter();
        CmarkDocument {
            source: text,
            blocks: blocks::split(events),
            citations: self.citations,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmarkDocument<'a> {
    source: &'a str,
    blocks: Vec<TopLevelBlock<'a>>,
    citations: bool,
}

impl<'a> CmarkDocument<'a> {
    pub fn blocks(&self) -> &[TopLevelBlock<'a>] {
        &self.blocks
    }
}

impl MarkdownDocument for CmarkDocument<'_> {
    fn is_open(&self) -> bool {
        self.blocks
            .last()
            .is_some_and(|block| block.is_open(self.source))
    }

    fn render_blocks(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| block.to_html(self.citations))
            .collect()
    }
}
