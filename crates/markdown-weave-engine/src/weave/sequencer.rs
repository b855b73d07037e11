use crate::frames::Position;

/// Hands out strictly increasing output positions.
///
/// Each emission bumps a running offset and lands at `anchor + offset`. The
/// anchor is the frame's own position for pass-through output and the
/// block's start position for flushed blocks, so a rendered block keeps the
/// position where its content began. Host positions may repeat (loop bodies
/// reuse them); when `anchor + offset` would not move forward, the offset is
/// raised just enough that it does.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    offset: Position,
    last: Option<Position>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, anchor: Position) -> Position {
        self.offset = self.offset.saturating_add(1);
        let mut position = anchor.saturating_add(self.offset);

        if let Some(last) = self.last
            && position <= last
        {
            let bump = last - position + 1;
            self.offset = self.offset.saturating_add(bump);
            position = position.saturating_add(bump);
        }

        self.last = Some(position);
        position
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn last(&self) -> Option<Position> {
        self.last
    }
}
