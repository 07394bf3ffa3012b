//! Move log - bounded history of successful movements.
//!
//! T-Spin classification only ever looks at the last two entries (the final
//! rotation into the slot, and the rotation before it for TST twists), so
//! the log is a fixed two-slot window rather than a growing list.

use crate::types::{Movement, Rotation};

/// Details of a successful rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationRecord {
    pub from: Rotation,
    pub to: Rotation,
    /// Index of the wall kick that was applied, `None` if unkicked.
    pub kick: Option<usize>,
}

/// One successful movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub movement: Movement,
    /// Present only for rotation movements.
    pub rotation: Option<RotationRecord>,
}

impl MoveRecord {
    /// A non-rotation movement entry.
    pub fn movement(movement: Movement) -> Self {
        Self {
            movement,
            rotation: None,
        }
    }

    /// A rotation entry with its transition and kick.
    pub fn rotation(movement: Movement, record: RotationRecord) -> Self {
        Self {
            movement,
            rotation: Some(record),
        }
    }
}

/// Sliding window over the last two successful movements.
#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    slots: [Option<MoveRecord>; 2],
}

impl MoveLog {
    pub const fn new() -> Self {
        Self { slots: [None, None] }
    }

    /// Append an entry, evicting the oldest.
    pub fn push(&mut self, record: MoveRecord) {
        self.slots[0] = self.slots[1].take();
        self.slots[1] = Some(record);
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&MoveRecord> {
        self.slots[1].as_ref()
    }

    /// The last two entries, oldest first.
    pub fn last_two(&self) -> [Option<&MoveRecord>; 2] {
        [self.slots[0].as_ref(), self.slots[1].as_ref()]
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }
}
