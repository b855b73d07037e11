//! # Weaving
//!
//! Folds the markup fragments of a frame tree into rendered HTML while
//! passing everything else through to the output.
//!
//! ## Modules
//!
//! - **`indent`**: `IndentNormalizer` strips inherited template indentation
//! - **`serialize`**: writes structural frames into the buffer as literal markup
//! - **`accumulator`**: `OpenBlock` buffers a markdown block until it closes
//! - **`sequencer`**: `Sequencer` assigns strictly increasing output positions
//! - **`walker`**: the single pass over the frames
//!
//! ## Key Invariants
//!
//! - At most one open block exists at a time
//! - Output positions are strictly increasing in pre-order
//! - Every element closes the way it was opened (emitted or serialized)

pub mod accumulator;
pub mod indent;
pub mod sequencer;
pub mod serialize;
pub mod walker;

pub use accumulator::{OpenBlock, Rendered};
pub use indent::IndentNormalizer;
pub use sequencer::Sequencer;
pub use walker::walk;

use crate::frames::Frames;
use crate::markdown::MarkdownEngine;
use crate::output::{OutputBuilder, OutputFragment};

/// State threaded through one traversal. Nothing here outlives a render.
#[derive(Debug, Default)]
pub struct TraversalContext {
    pub(crate) block: OpenBlock,
    pub(crate) indent: IndentNormalizer,
    pub(crate) sequencer: Sequencer,
    pub(crate) output: OutputBuilder,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions for output written around the walk, such as a wrapping
    /// container.
    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    pub fn output_mut(&mut self) -> &mut OutputBuilder {
        &mut self.output
    }

    pub fn finish(self) -> Vec<OutputFragment> {
        self.output.finish()
    }
}

/// Walks `frames` with a fresh context and returns the output fragments.
///
/// ```
/// use markdown_weave_engine::frames::{Frame, Frames};
/// use markdown_weave_engine::markdown::CmarkEngine;
/// use markdown_weave_engine::weave::weave;
///
/// let frames = Frames::new(vec![
///     Frame::markup(0, "| a | b |"),
///     Frame::markup(1, "\n|---|---|"),
///     Frame::markup(2, "\n| 1 | 2 |\n\n"),
/// ])
/// .unwrap();
///
/// let out = weave(&CmarkEngine::default(), &frames);
/// assert_eq!(out.len(), 1);
/// assert!(out[0].markup().unwrap().starts_with("<table>"));
/// ```
pub fn weave<E: MarkdownEngine>(engine: &E, frames: &Frames) -> Vec<OutputFragment> {
    let mut cx = TraversalContext::new();
    walk(engine, frames, &mut cx);
    cx.finish()
}
