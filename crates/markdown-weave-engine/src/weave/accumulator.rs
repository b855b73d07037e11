use crate::frames::Position;
use crate::markdown::{MarkdownDocument, MarkdownEngine};

/// Rendered HTML for a run of top-level blocks, and the position it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub anchor: Position,
    pub blocks: Vec<String>,
}

/// Holds markdown whose last block is still open, until a later fragment
/// closes it.
///
/// There is no per-construct state: every append re-parses the whole buffer
/// and asks the engine whether the last block is still open.
#[derive(Debug, Default)]
pub struct OpenBlock {
    buffer: String,
    start: Position,
    active: bool,
    pending_close: bool,
}

enum Verdict {
    Open,
    Held,
    Closed(Vec<String>),
}

fn judge<E: MarkdownEngine>(engine: &E, text: &str, hold: bool) -> Verdict {
    let document = engine.parse(text);
    if document.is_open() {
        Verdict::Open
    } else if hold {
        Verdict::Held
    } else {
        Verdict::Closed(document.render_blocks())
    }
}

fn render<E: MarkdownEngine>(engine: &E, text: &str) -> Vec<String> {
    engine.parse(text).render_blocks()
}

impl OpenBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&self) -> Option<Position> {
        self.active.then_some(self.start)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Raw access for serialized structural frames. Only meaningful while
    /// active.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Feeds one normalized markup fragment.
    ///
    /// Returns the rendered blocks when the fragment is closed on its own
    /// (anchored at `position`) or when it closes the active block (anchored
    /// at the block's start). `hold` defers a close while an element is half
    /// written into the buffer; [`OpenBlock::release`] picks it up later.
    pub fn append<E: MarkdownEngine>(
        &mut self,
        engine: &E,
        text: &str,
        position: Position,
        hold: bool,
    ) -> Option<Rendered> {
        if !self.active {
            return match judge(engine, text, false) {
                Verdict::Open => {
                    log::debug!("markdown block opened at position {position}");
                    self.active = true;
                    self.start = position;
                    self.pending_close = false;
                    self.buffer.clear();
                    self.buffer.push_str(text);
                    self.trim_from(0);
                    None
                }
                Verdict::Closed(blocks) if !blocks.is_empty() => Some(Rendered {
                    anchor: position,
                    blocks,
                }),
                Verdict::Held | Verdict::Closed(_) => None,
            };
        }

        let appended_at = self.buffer.len();
        self.buffer.push_str(text);

        match judge(engine, &self.buffer, hold) {
            Verdict::Open => {
                log::trace!(
                    "markdown block at {} absorbed {} bytes",
                    self.start,
                    text.len()
                );
                self.pending_close = false;
                self.trim_from(appended_at);
                None
            }
            Verdict::Held => {
                log::trace!("markdown block at {} closed inside an element, holding", self.start);
                self.pending_close = true;
                None
            }
            Verdict::Closed(blocks) => Some(self.take(blocks)),
        }
    }

    /// Flushes a close that was held back by [`OpenBlock::append`].
    pub fn release<E: MarkdownEngine>(&mut self, engine: &E) -> Option<Rendered> {
        if !self.active || !self.pending_close {
            return None;
        }
        let blocks = render(engine, &self.buffer);
        Some(self.take(blocks))
    }

    /// Renders whatever is buffered, closed or not.
    pub fn flush<E: MarkdownEngine>(&mut self, engine: &E) -> Option<Rendered> {
        if !self.active {
            return None;
        }
        log::debug!(
            "force-flushing markdown block at {} ({} bytes)",
            self.start,
            self.buffer.len()
        );
        let blocks = render(engine, &self.buffer);
        Some(self.take(blocks))
    }

    fn take(&mut self, blocks: Vec<String>) -> Rendered {
        log::debug!(
            "markdown block at {} flushed as {} block(s)",
            self.start,
            blocks.len()
        );
        self.active = false;
        self.pending_close = false;
        self.buffer.clear();
        Rendered {
            anchor: self.start,
            blocks,
        }
    }

    /// Drops the trailing tab/newline/carriage-return run of the text
    /// appended at `from`, so template whitespace cannot end the block. Spaces
    /// are kept.
    fn trim_from(&mut self, from: usize) {
        let keep = self.buffer[from..]
            .trim_end_matches(['\t', '\n', '\r'])
            .len();
        self.buffer.truncate(from + keep);
    }
}
