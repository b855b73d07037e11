//! # markdown-weave engine
//!
//! Renders markdown that is split across the fragments of a component tree.
//! Templates interleave literal markdown with generated content (loop bodies,
//! nested components, computed cells), so a single table may arrive as a
//! header fragment, a generated row and a closing fragment. The engine walks
//! the flattened tree once, buffers markdown until its last block closes,
//! folds generated elements into that buffer as literal markup, and emits one
//! HTML fragment per top-level block.
//!
//! ## Modules
//!
//! - **`frames`**: the input tree (`Frames`, `FrameBuilder`, serde `Node`)
//! - **`markdown`**: the parser boundary and its pulldown-cmark implementation
//! - **`weave`**: indentation, accumulation, sequencing and the walk itself
//! - **`output`**: the positioned output tree and its HTML serialization
//! - **`component`**: `MarkdownComponent`, the container wrapper hosts use

pub mod component;
pub mod frames;
pub mod markdown;
pub mod output;
pub mod weave;

pub use component::{ComponentOptions, MarkdownComponent};
pub use frames::{Frame, FrameError, FrameKind, Frames, Position};
pub use markdown::{CmarkEngine, Extensions, MarkdownDocument, MarkdownEngine};
pub use output::{OutputFragment, Payload};
pub use weave::weave;
