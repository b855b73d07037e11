use serde::Deserialize;

use super::{FrameBuilder, FrameError, Frames, Position};

/// A nested host tree, the form hosts without their own frame builder (and
/// the CLI) hand over.
///
/// In JSON:
///
/// ```json
/// [
///   { "markup": "| Name | Qty |\n|------|-----|\n" },
///   { "element": { "name": "span", "attributes": [["class", "sku"]], "children": [{ "text": "A-1" }] } },
///   { "region": { "children": [{ "markup": "| 3 |" }] } }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Text(String),
    Markup(String),
    Element {
        name: String,
        #[serde(default)]
        attributes: Vec<(String, String)>,
        #[serde(default)]
        children: Vec<Node>,
    },
    Region {
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    /// Flattens `nodes` into frames, numbering positions in pre-order from 0.
    pub fn into_frames(nodes: Vec<Node>) -> Result<Frames, FrameError> {
        let mut builder = FrameBuilder::new();
        let mut next: Position = 0;
        for node in nodes {
            node.push_into(&mut builder, &mut next)?;
        }
        builder.build()
    }

    fn push_into(self, builder: &mut FrameBuilder, next: &mut Position) -> Result<(), FrameError> {
        let position = *next;
        *next += 1;

        match self {
            Node::Text(content) => {
                builder.add_text(position, content);
            }
            Node::Markup(content) => {
                builder.add_markup(position, content);
            }
            Node::Element {
                name,
                attributes,
                children,
            } => {
                builder.open_element(position, name);
                for (name, value) in attributes {
                    builder.add_attribute(*next, name, value);
                    *next += 1;
                }
                for child in children {
                    child.push_into(builder, next)?;
                }
                builder.close()?;
            }
            Node::Region { children } => {
                builder.open_region(position);
                for child in children {
                    child.push_into(builder, next)?;
                }
                builder.close()?;
            }
        }

        Ok(())
    }
}
