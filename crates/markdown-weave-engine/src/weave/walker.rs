use crate::frames::{Frame, FrameKind, Frames, Position};
use crate::markdown::MarkdownEngine;

use super::TraversalContext;
use super::accumulator::Rendered;
use super::serialize;

/// An element or region whose subtree is still being walked.
#[derive(Debug)]
enum Scope<'f> {
    /// Opened in the output tree.
    Emitted { end: usize },
    /// Written into the open block's buffer as literal markup.
    Serialized {
        name: &'f str,
        end: usize,
        has_children: bool,
    },
    Region { end: usize },
}

impl Scope<'_> {
    /// Index one past the last frame of the subtree.
    fn end(&self) -> usize {
        match self {
            Scope::Emitted { end } | Scope::Serialized { end, .. } | Scope::Region { end } => *end,
        }
    }
}

struct Walker<'w, 'f, E> {
    engine: &'w E,
    cx: &'w mut TraversalContext,
    scopes: Vec<Scope<'f>>,
    serializing: usize,
}

/// Walks `frames` once, writing output into `cx`.
///
/// Scopes are tracked on an explicit stack keyed by end index, so nesting
/// depth costs heap rather than call stack. Each scope closes the way it was
/// opened regardless of what the open block did in between.
pub fn walk<E: MarkdownEngine>(engine: &E, frames: &Frames, cx: &mut TraversalContext) {
    let mut walker = Walker {
        engine,
        cx,
        scopes: Vec::new(),
        serializing: 0,
    };

    for (index, frame) in frames.iter().enumerate() {
        walker.close_scopes(index);
        walker.visit(index, frame);
    }
    walker.close_scopes(frames.len());
    walker.finish();
}

impl<'f, E: MarkdownEngine> Walker<'_, 'f, E> {
    fn visit(&mut self, index: usize, frame: &'f Frame) {
        if !matches!(frame.kind, FrameKind::Attribute { .. }) {
            self.end_start_tag();
        }

        match &frame.kind {
            FrameKind::Text(content) => self.text(frame.position, content),
            FrameKind::Markup(content) => self.markup(frame.position, content),
            FrameKind::Element { name, descendants } => {
                self.open_element(frame.position, name, index + 1 + descendants);
            }
            FrameKind::Attribute { name, value } => self.attribute(frame.position, name, value),
            FrameKind::Region { descendants } => self.scopes.push(Scope::Region {
                end: index + 1 + descendants,
            }),
        }
    }

    fn text(&mut self, position: Position, content: &str) {
        if self.cx.block.is_active() {
            serialize::text(self.cx.block.buffer_mut(), content);
        } else {
            let position = self.cx.sequencer.next(position);
            self.cx.output.add_text(position, content);
        }
    }

    fn markup(&mut self, position: Position, content: &str) {
        let text = self.cx.indent.normalize(content);
        let hold = self.serializing > 0;
        if let Some(rendered) = self.cx.block.append(self.engine, &text, position, hold) {
            self.emit(rendered);
        }
    }

    fn open_element(&mut self, position: Position, name: &'f str, end: usize) {
        if self.cx.block.is_active() {
            log::trace!("serializing <{name}> into the open block");
            serialize::open_tag(self.cx.block.buffer_mut(), name);
            self.scopes.push(Scope::Serialized {
                name,
                end,
                has_children: false,
            });
            self.serializing += 1;
        } else {
            let position = self.cx.sequencer.next(position);
            self.cx.output.open_element(position, name);
            self.scopes.push(Scope::Emitted { end });
        }
    }

    fn attribute(&mut self, position: Position, name: &str, value: &str) {
        match self.scopes.last() {
            Some(Scope::Serialized { .. }) => {
                serialize::attribute(self.cx.block.buffer_mut(), name, value);
            }
            Some(Scope::Emitted { .. }) => {
                let position = self.cx.sequencer.next(position);
                self.cx.output.add_attribute(position, name, value);
            }
            Some(Scope::Region { .. }) | None => {
                unreachable!("validated frames only place attributes inside elements")
            }
        }
    }

    /// Writes the `>` of a serialized start tag once its first non-attribute
    /// child is reached.
    fn end_start_tag(&mut self) {
        if let Some(Scope::Serialized { has_children, .. }) = self.scopes.last_mut()
            && !*has_children
        {
            *has_children = true;
            serialize::end_start_tag(self.cx.block.buffer_mut());
        }
    }

    fn close_scopes(&mut self, index: usize) {
        while self.scopes.last().is_some_and(|scope| scope.end() <= index) {
            if let Some(scope) = self.scopes.pop() {
                self.close(scope);
            }
        }
    }

    fn close(&mut self, scope: Scope<'f>) {
        match scope {
            Scope::Serialized {
                name, has_children, ..
            } => {
                serialize::close_tag(self.cx.block.buffer_mut(), name, has_children);
                self.serializing -= 1;
                if self.serializing == 0
                    && let Some(rendered) = self.cx.block.release(self.engine)
                {
                    self.emit(rendered);
                }
            }
            Scope::Emitted { .. } => {
                // A block opened inside this element must land inside it.
                if let Some(rendered) = self.cx.block.flush(self.engine) {
                    self.emit(rendered);
                }
                self.cx.output.close_element();
            }
            Scope::Region { .. } => {}
        }
    }

    fn finish(&mut self) {
        debug_assert!(self.scopes.is_empty());
        debug_assert_eq!(self.serializing, 0);
        if let Some(rendered) = self.cx.block.flush(self.engine) {
            self.emit(rendered);
        }
    }

    fn emit(&mut self, rendered: Rendered) {
        for html in rendered.blocks {
            let position = self.cx.sequencer.next(rendered.anchor);
            self.cx.output.add_markup(position, html);
        }
    }
}
