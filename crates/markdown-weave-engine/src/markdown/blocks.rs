use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

use super::fence;

/// The kind of a top-level block, as far as open/closed detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Rule,
    FencedCode,
    IndentedCode,
    Table,
    List,
    BlockQuote,
    Html,
    FootnoteDefinition,
    Other,
}

impl BlockKind {
    fn of(tag: &Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => Self::Paragraph,
            Tag::Heading { .. } => Self::Heading,
            Tag::CodeBlock(CodeBlockKind::Fenced(_)) => Self::FencedCode,
            Tag::CodeBlock(CodeBlockKind::Indented) => Self::IndentedCode,
            Tag::Table(_) => Self::Table,
            Tag::List(_) => Self::List,
            Tag::BlockQuote(_) => Self::BlockQuote,
            Tag::HtmlBlock => Self::Html,
            Tag::FootnoteDefinition(_) => Self::FootnoteDefinition,
            _ => Self::Other,
        }
    }
}

/// One top-level block: its kind, byte range in the source, and the events
/// that render it.
#[derive(Debug, Clone)]
pub struct TopLevelBlock<'a> {
    pub kind: BlockKind,
    pub range: Range<usize>,
    /// Range of a fenced code block nested inside this block when it is the
    /// last leaf opened there.
    pub trailing_fence: Option<Range<usize>>,
    events: Vec<Event<'a>>,
}

impl<'a> TopLevelBlock<'a> {
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Whether this block, if it is the last one in `source`, could still be
    /// extended by more text.
    pub fn is_open(&self, source: &str) -> bool {
        match self.kind {
            BlockKind::Heading | BlockKind::Rule => false,
            BlockKind::FencedCode => !fence::is_closed_at(source, self.range.clone()),
            BlockKind::List | BlockKind::BlockQuote | BlockKind::FootnoteDefinition
                if self
                    .trailing_fence
                    .clone()
                    .is_some_and(|range| !fence::is_closed_at(source, range)) =>
            {
                true
            }
            BlockKind::Paragraph
            | BlockKind::IndentedCode
            | BlockKind::Table
            | BlockKind::List
            | BlockKind::BlockQuote
            | BlockKind::Html
            | BlockKind::FootnoteDefinition
            | BlockKind::Other => !ends_with_blank_line(source),
        }
    }

    /// Renders this block alone, with `""title""` citations when `citations`
    /// is set.
    pub fn to_html(&self, citations: bool) -> String {
        let mut html = String::new();
        let events = self.events.iter().cloned();
        if citations {
            pulldown_cmark::html::push_html(&mut html, cite(events).into_iter());
        } else {
            pulldown_cmark::html::push_html(&mut html, events);
        }
        html
    }
}

const CITE: &str = "\"\"";

/// Rewrites `""title""` in running text into `<cite>title</cite>`. Adjacent
/// text events are merged first, since the parser may split a run at quotes.
/// Code blocks and code spans are left alone.
pub fn cite<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut pending = String::new();
    let mut in_code = false;

    for event in events {
        if let Event::Text(text) = &event {
            if !in_code {
                pending.push_str(text);
                continue;
            }
        }
        push_cited(&mut out, &mut pending);
        match &event {
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            _ => {}
        }
        out.push(event);
    }

    push_cited(&mut out, &mut pending);
    out
}

fn push_cited<'a>(out: &mut Vec<Event<'a>>, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    let mut rest = text.as_str();

    while let Some(open) = rest.find(CITE) {
        let inner = open + CITE.len();
        let Some(len) = rest[inner..].find(CITE).filter(|&len| len > 0) else {
            break;
        };
        if open > 0 {
            out.push(Event::Text(rest[..open].to_string().into()));
        }
        out.push(Event::InlineHtml("<cite>".into()));
        out.push(Event::Text(rest[inner..inner + len].to_string().into()));
        out.push(Event::InlineHtml("</cite>".into()));
        rest = &rest[inner + len + CITE.len()..];
    }

    if !rest.is_empty() {
        out.push(Event::Text(rest.to_string().into()));
    }
}

/// Whether the whitespace after the last non-whitespace character contains a
/// blank line.
pub fn ends_with_blank_line(source: &str) -> bool {
    let tail = &source[source.trim_end().len()..];
    tail.matches('\n').count() >= 2
}

/// Groups an offset event stream into top-level blocks by nesting depth.
pub fn split<'a>(events: impl Iterator<Item = (Event<'a>, Range<usize>)>) -> Vec<TopLevelBlock<'a>> {
    let mut blocks = Vec::new();
    let mut current: Option<TopLevelBlock<'a>> = None;
    let mut depth = 0usize;

    for (event, range) in events {
        if current.is_none() {
            let kind = match &event {
                Event::Start(tag) => BlockKind::of(tag),
                Event::Rule => BlockKind::Rule,
                _ => BlockKind::Other,
            };
            current = Some(TopLevelBlock {
                kind,
                range: range.clone(),
                trailing_fence: None,
                events: Vec::new(),
            });
        } else if let (Event::Start(tag), Some(block)) = (&event, current.as_mut()) {
            block.trailing_fence = match tag {
                Tag::CodeBlock(CodeBlockKind::Fenced(_)) => Some(range.clone()),
                _ => None,
            };
        }

        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        if let Some(block) = current.as_mut() {
            block.events.push(event);
        }
        if depth == 0 {
            blocks.extend(current.take());
        }
    }

    blocks.extend(current);
    blocks
}
