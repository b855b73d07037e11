use markdown_weave_engine::markdown::blocks::ends_with_blank_line;
use markdown_weave_engine::{MarkdownDocument, MarkdownEngine};

/// Renders its input unchanged, one block per parse. Open until the text
/// ends in a blank line.
pub struct EchoEngine;

pub struct EchoDocument<'a>(&'a str);

impl MarkdownEngine for EchoEngine {
    type Document<'a>
        = EchoDocument<'a>
    where
        Self: 'a;

    fn parse<'a>(&'a self, text: &'a str) -> Self::Document<'a> {
        EchoDocument(text)
    }
}

impl MarkdownDocument for EchoDocument<'_> {
    fn is_open(&self) -> bool {
        !self.0.trim().is_empty() && !ends_with_blank_line(self.0)
    }

    fn render_blocks(&self) -> Vec<String> {
        if self.0.trim().is_empty() {
            Vec::new()
        } else {
            vec![self.0.to_owned()]
        }
    }
}
