/// Strips the template indentation that markup fragments inherit from the
/// surrounding source, keeping relative indentation intact.
///
/// The indentation width is learned from the first fragment that has a
/// non-blank line and then stays fixed for the rest of the traversal, so a
/// block indented 12 columns in its template renders as if it had none while
/// nested list items keep their offsets.
#[derive(Debug, Clone, Default)]
pub struct IndentNormalizer {
    min_indent: Option<usize>,
}

impl IndentNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer whose width is already fixed.
    pub fn with_min_indent(min_indent: usize) -> Self {
        Self {
            min_indent: Some(min_indent),
        }
    }

    /// The learned width; 0 until learned.
    pub fn min_indent(&self) -> usize {
        self.min_indent.unwrap_or(0)
    }

    pub fn normalize(&mut self, text: &str) -> String {
        if self.min_indent.is_none() {
            self.min_indent = lines(text)
                .filter(|line| !is_blank(line))
                .map(indent_width)
                .min();
        }
        let min_indent = self.min_indent();

        let mut out = String::with_capacity(text.len());
        for (i, line) in lines(text).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if is_blank(line) {
                continue;
            }
            let strip = indent_width(line).min(min_indent);
            out.push_str(&line[strip..]);
        }
        out
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
