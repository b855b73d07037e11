use super::{Frame, FrameError, FrameKind, Frames, Position};

/// Builds a [`Frames`] sequence with open/close calls, filling in subtree
/// extents as scopes close.
///
/// ```
/// use markdown_weave_engine::frames::FrameBuilder;
///
/// let mut builder = FrameBuilder::new();
/// builder.add_markup(0, "| a | b |\n|---|---|\n");
/// builder.open_element(1, "span").add_attribute(2, "class", "cell");
/// builder.add_text(3, "x");
/// builder.close().unwrap();
/// let frames = builder.build().unwrap();
/// assert_eq!(frames.len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct FrameBuilder {
    frames: Vec<Frame>,
    open: Vec<usize>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, position: Position, content: impl Into<String>) -> &mut Self {
        self.frames.push(Frame::text(position, content));
        self
    }

    pub fn add_markup(&mut self, position: Position, content: impl Into<String>) -> &mut Self {
        self.frames.push(Frame::markup(position, content));
        self
    }

    pub fn add_attribute(
        &mut self,
        position: Position,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.frames.push(Frame::attribute(position, name, value));
        self
    }

    pub fn open_element(&mut self, position: Position, name: impl Into<String>) -> &mut Self {
        self.open.push(self.frames.len());
        self.frames.push(Frame::element(position, name, 0));
        self
    }

    pub fn open_region(&mut self, position: Position) -> &mut Self {
        self.open.push(self.frames.len());
        self.frames.push(Frame::region(position, 0));
        self
    }

    /// Closes the innermost open element or region.
    pub fn close(&mut self) -> Result<&mut Self, FrameError> {
        let index = self.open.pop().ok_or(FrameError::UnbalancedClose)?;
        let count = self.frames.len() - index - 1;
        if let Some(frame) = self.frames.get_mut(index) {
            match &mut frame.kind {
                FrameKind::Element { descendants, .. } | FrameKind::Region { descendants } => {
                    *descendants = count;
                }
                FrameKind::Text(_) | FrameKind::Markup(_) | FrameKind::Attribute { .. } => {}
            }
        }
        Ok(self)
    }

    /// Number of elements and regions currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn build(self) -> Result<Frames, FrameError> {
        if !self.open.is_empty() {
            return Err(FrameError::UnclosedScopes {
                open: self.open.len(),
            });
        }
        Frames::new(self.frames)
    }
}
