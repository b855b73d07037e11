//! # Frames
//!
//! The host's component tree, flattened into a pre-order sequence.
//!
//! Elements and regions do not have explicit close frames: each one records how
//! many of the following frames belong to its subtree, and the subtree ends when
//! that many frames have been consumed. Attributes sit directly after their
//! element, before any other descendant.
//!
//! ## Modules
//!
//! - **`builder`**: `FrameBuilder`, an open/close style API that computes extents
//! - **`tree`**: `Node`, a nested (serde) form of the same tree
//!
//! A [`Frames`] value is validated once on construction, so everything that
//! walks it can rely on well-formed nesting.

pub mod builder;
pub mod tree;

pub use builder::FrameBuilder;
pub use tree::Node;

/// Host-supplied identifier used to reconcile fragments across renders.
pub type Position = u32;

/// One node of the flattened input tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position assigned by the host. Not reused verbatim in output.
    pub position: Position,
    pub kind: FrameKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// A plain text leaf. Escaped wherever it ends up.
    Text(String),
    /// Raw markdown source, possibly spanning many lines.
    Markup(String),
    /// An element whose subtree is the next `descendants` frames.
    Element { name: String, descendants: usize },
    /// An attribute of the enclosing element.
    Attribute { name: String, value: String },
    /// A transparent grouping (nested component, loop body). Produces no
    /// output of its own.
    Region { descendants: usize },
}

impl Frame {
    pub fn text(position: Position, content: impl Into<String>) -> Self {
        Self {
            position,
            kind: FrameKind::Text(content.into()),
        }
    }

    pub fn markup(position: Position, content: impl Into<String>) -> Self {
        Self {
            position,
            kind: FrameKind::Markup(content.into()),
        }
    }

    pub fn element(position: Position, name: impl Into<String>, descendants: usize) -> Self {
        Self {
            position,
            kind: FrameKind::Element {
                name: name.into(),
                descendants,
            },
        }
    }

    pub fn attribute(position: Position, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            position,
            kind: FrameKind::Attribute {
                name: name.into(),
                value: value.into(),
            },
        }
    }

    pub fn region(position: Position, descendants: usize) -> Self {
        Self {
            position,
            kind: FrameKind::Region { descendants },
        }
    }

    /// Number of frames after this one that belong to its subtree.
    pub fn descendants(&self) -> usize {
        match self.kind {
            FrameKind::Element { descendants, .. } | FrameKind::Region { descendants } => descendants,
            FrameKind::Text(_) | FrameKind::Markup(_) | FrameKind::Attribute { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame {index}: subtree of {descendants} frames runs past its parent, which ends at {limit}")]
    ExtentOverrun {
        index: usize,
        descendants: usize,
        limit: usize,
    },

    #[error("frame {index}: attribute is not part of an element's attribute list")]
    MisplacedAttribute { index: usize },

    #[error("frame {index}: element name is empty")]
    EmptyElementName { index: usize },

    #[error("close() called with no open element or region")]
    UnbalancedClose,

    #[error("{open} element(s) or region(s) were never closed")]
    UnclosedScopes { open: usize },
}

/// A validated frame sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frames(Vec<Frame>);

impl Frames {
    /// Validates nesting and attribute placement.
    pub fn new(frames: Vec<Frame>) -> Result<Self, FrameError> {
        validate(&frames)?;
        Ok(Self(frames))
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Frame> {
        self.0
    }
}

impl TryFrom<Vec<Frame>> for Frames {
    type Error = FrameError;

    fn try_from(frames: Vec<Frame>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl<'a> IntoIterator for &'a Frames {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct OpenScope {
    end: usize,
    accepts_attributes: bool,
}

fn validate(frames: &[Frame]) -> Result<(), FrameError> {
    let mut stack: Vec<OpenScope> = Vec::new();

    for (index, frame) in frames.iter().enumerate() {
        while stack.last().is_some_and(|open| open.end <= index) {
            stack.pop();
        }

        if let FrameKind::Attribute { .. } = frame.kind {
            match stack.last() {
                Some(open) if open.accepts_attributes => continue,
                _ => return Err(FrameError::MisplacedAttribute { index }),
            }
        }

        // Anything other than an attribute ends the parent's attribute list.
        if let Some(open) = stack.last_mut() {
            open.accepts_attributes = false;
        }

        let limit = stack.last().map_or(frames.len(), |open| open.end);
        let accepts_attributes = match &frame.kind {
            FrameKind::Element { name, .. } => {
                if name.trim().is_empty() {
                    return Err(FrameError::EmptyElementName { index });
                }
                true
            }
            FrameKind::Region { .. } => false,
            FrameKind::Text(_) | FrameKind::Markup(_) | FrameKind::Attribute { .. } => continue,
        };

        let descendants = frame.descendants();
        let end = index + 1 + descendants;
        if end > limit {
            return Err(FrameError::ExtentOverrun {
                index,
                descendants,
                limit,
            });
        }
        stack.push(OpenScope {
            end,
            accepts_attributes,
        });
    }

    Ok(())
}
