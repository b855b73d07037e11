use super::{Element, OutputFragment, Payload};

/// Serializes an output tree to an HTML string.
///
/// Markup is copied verbatim, text and attribute values are escaped, and
/// childless elements are written self-closed.
pub fn to_html(fragments: &[OutputFragment]) -> String {
    let mut out = String::new();
    write_fragments(&mut out, fragments);
    out
}

fn write_fragments(out: &mut String, fragments: &[OutputFragment]) {
    for fragment in fragments {
        match &fragment.payload {
            Payload::Markup(html) => out.push_str(html),
            Payload::Text(content) => out.push_str(&html_escape::encode_text(content)),
            Payload::Element(element) => write_element(out, element),
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for attribute in &element.attributes {
        out.push(' ');
        out.push_str(&attribute.name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&attribute.value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    write_fragments(out, &element.children);
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}
