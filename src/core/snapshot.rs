//! Snapshot module - flat, copyable observation of a game session.
//!
//! Render and driver layers read game state through snapshots instead of
//! poking at live structures. `snapshot_into` fills a caller-owned buffer so
//! per-frame observation allocates nothing.

use crate::core::ghost::GhostPiece;
use crate::core::piece::Piece;
use crate::types::{BlockType, Rotation, COLUMNS, PREVIEW_SIZE, VISIBLE_ROWS};

/// Position and orientation of the active piece.
///
/// `y` is an absolute row in the 40-row field; subtract
/// [`HIDDEN_ROWS`](crate::types::HIDDEN_ROWS) to map into the visible
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: BlockType,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            x: piece.x(),
            y: piece.y(),
        }
    }
}

impl From<&GhostPiece> for ActiveSnapshot {
    fn from(ghost: &GhostPiece) -> Self {
        Self {
            kind: ghost.kind(),
            rotation: ghost.rotation(),
            x: ghost.x(),
            y: ghost.y(),
        }
    }
}

/// Timer readouts in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub lock_ms: u32,
    pub spawn_ms: u32,
}

/// One frame's view of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Visible window, row-major: 0 for empty, `kind as u8 + 1` otherwise.
    pub board: [[u8; COLUMNS as usize]; VISIBLE_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece's bounding box, absolute.
    pub ghost_y: Option<i8>,
    pub hold: Option<BlockType>,
    pub preview: [BlockType; PREVIEW_SIZE],
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub line_progress: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the session currently accepts movements.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLUMNS as usize]; VISIBLE_ROWS as usize],
            active: None,
            ghost_y: None,
            hold: None,
            preview: [BlockType::I; PREVIEW_SIZE],
            can_hold: true,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            combo: 1,
            line_progress: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
