//! Output tree handed back to the host.
//!
//! Every fragment and every attribute carries a position; visited in
//! pre-order (element, its attributes, its children) the positions are
//! strictly increasing.

pub mod html;

use serde::Serialize;

use crate::frames::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFragment {
    pub position: Position,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Payload {
    /// Rendered HTML, inserted verbatim.
    Markup(String),
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<OutputAttribute>,
    pub children: Vec<OutputFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputAttribute {
    pub position: Position,
    pub name: String,
    pub value: String,
}

impl OutputFragment {
    pub fn markup(&self) -> Option<&str> {
        match &self.payload {
            Payload::Markup(html) => Some(html),
            Payload::Text(_) | Payload::Element(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(content) => Some(content),
            Payload::Markup(_) | Payload::Element(_) => None,
        }
    }

    pub fn element(&self) -> Option<&Element> {
        match &self.payload {
            Payload::Element(element) => Some(element),
            Payload::Markup(_) | Payload::Text(_) => None,
        }
    }
}

/// All positions in `fragments`, in pre-order.
pub fn positions(fragments: &[OutputFragment]) -> Vec<Position> {
    let mut out = Vec::new();
    collect_positions(fragments, &mut out);
    out
}

fn collect_positions(fragments: &[OutputFragment], out: &mut Vec<Position>) {
    for fragment in fragments {
        out.push(fragment.position);
        if let Payload::Element(element) = &fragment.payload {
            out.extend(element.attributes.iter().map(|attribute| attribute.position));
            collect_positions(&element.children, out);
        }
    }
}

/// Assembles an output tree from a flat stream of open/attribute/leaf/close
/// calls.
#[derive(Debug, Default)]
pub struct OutputBuilder {
    roots: Vec<OutputFragment>,
    open: Vec<(Position, Element)>,
}

impl OutputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_element(&mut self, position: Position, name: impl Into<String>) {
        self.open.push((
            position,
            Element {
                name: name.into(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
        ));
    }

    /// Attaches an attribute to the innermost open element. Ignored at the
    /// root, where there is nothing to attach to.
    pub fn add_attribute(
        &mut self,
        position: Position,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some((_, element)) = self.open.last_mut() {
            element.attributes.push(OutputAttribute {
                position,
                name: name.into(),
                value: value.into(),
            });
        }
    }

    pub fn add_text(&mut self, position: Position, content: impl Into<String>) {
        self.push(OutputFragment {
            position,
            payload: Payload::Text(content.into()),
        });
    }

    pub fn add_markup(&mut self, position: Position, html: impl Into<String>) {
        self.push(OutputFragment {
            position,
            payload: Payload::Markup(html.into()),
        });
    }

    pub fn close_element(&mut self) {
        if let Some((position, element)) = self.open.pop() {
            self.push(OutputFragment {
                position,
                payload: Payload::Element(element),
            });
        }
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Closes anything still open and returns the root fragments.
    pub fn finish(mut self) -> Vec<OutputFragment> {
        while !self.open.is_empty() {
            self.close_element();
        }
        self.roots
    }

    fn push(&mut self, fragment: OutputFragment) {
        match self.open.last_mut() {
            Some((_, element)) => element.children.push(fragment),
            None => self.roots.push(fragment),
        }
    }
}
