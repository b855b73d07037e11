//! Literal markup for structural frames that land inside an open block.
//!
//! The parser only sees a flat character stream, so an element generated in
//! the middle of, say, a table row is written back out as `<name attr="v">`
//! text and becomes part of the row.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

pub fn open_tag(buffer: &mut String, name: &str) {
    buffer.push('<');
    buffer.push_str(name);
}

pub fn attribute(buffer: &mut String, name: &str, value: &str) {
    buffer.push(' ');
    buffer.push_str(name);
    buffer.push_str("=\"");
    buffer.push_str(&escape(value));
    buffer.push('"');
}

/// Ends the start tag once the first non-attribute child shows up.
pub fn end_start_tag(buffer: &mut String) {
    buffer.push('>');
}

/// Writes `</name>`, or self-closes a start tag that never got children.
pub fn close_tag(buffer: &mut String, name: &str, has_children: bool) {
    if has_children {
        buffer.push_str("</");
        buffer.push_str(name);
        buffer.push('>');
    } else {
        buffer.push_str(" />");
    }
}

pub fn text(buffer: &mut String, content: &str) {
    buffer.push_str(&escape(content));
}
