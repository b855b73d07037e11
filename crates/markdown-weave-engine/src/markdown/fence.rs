use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// The delimiter of a fence line: which character, and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;
    pub const MAX_INDENT: usize = 3;

    pub fn sig(line: &str) -> Option<FenceSig> {
        let line = line.trim_end_matches(['\r', '\n']);
        let body = line.trim_start_matches(' ');
        if line.len() - body.len() > Self::MAX_INDENT {
            return None;
        }

        let kind = match body.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let marker = Self::marker(kind);
        let len = body.bytes().take_while(|&b| b == marker).count();
        if len < Self::MIN_LEN {
            return None;
        }
        // Backtick info strings may not contain backticks.
        if kind == FenceKind::Backticks && body[len..].contains('`') {
            return None;
        }

        Some(FenceSig { kind, len })
    }

    /// Whether `line` closes a fence opened with `open`.
    pub fn closes(open: FenceSig, line: &str) -> bool {
        let Some(sig) = Self::sig(line) else {
            return false;
        };
        let rest = line.trim_start_matches(' ').trim_start_matches(Self::marker(sig.kind) as char);
        sig.kind == open.kind && sig.len >= open.len && rest.trim().is_empty()
    }

    fn marker(kind: FenceKind) -> u8 {
        match kind {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// Whether the fenced code block spanning `source` has its closing fence.
pub fn is_closed(source: &str) -> bool {
    let mut lines = source.lines();
    let Some(open) = lines.next().and_then(CodeFence::sig) else {
        return false;
    };
    lines
        .rev()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| CodeFence::closes(open, line))
}

/// Like [`is_closed`] for the fenced code block at `range` in `source`, which
/// may sit inside a list item or block quote. Each line loses the container
/// prefix (indentation and `>` markers) up to the opening fence's column.
pub fn is_closed_at(source: &str, range: Range<usize>) -> bool {
    let Some(block) = source.get(range.clone()) else {
        return false;
    };
    let mut lines = block.lines();
    let Some(first) = lines.next() else {
        return false;
    };
    let Some(marker) = first.find(['`', '~']) else {
        return false;
    };
    let Some(open) = CodeFence::sig(&first[marker..]) else {
        return false;
    };
    let line_start = source[..range.start].rfind('\n').map_or(0, |i| i + 1);
    let column = source[line_start..range.start + marker].chars().count();

    lines
        .map(|line| strip_container_prefix(line, column))
        .rev()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| CodeFence::closes(open, line))
}

fn strip_container_prefix(line: &str, column: usize) -> &str {
    let prefix = line
        .char_indices()
        .take(column)
        .take_while(|(_, c)| matches!(c, ' ' | '\t' | '>'))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[prefix..]
}
