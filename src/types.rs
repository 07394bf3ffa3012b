//! Shared types and tunable constants.
//!
//! Pure data structures with no dependencies, usable from the core rules
//! engine and from any render/input layer sitting on top of it.
//!
//! # Playfield Dimensions
//!
//! The playfield is 10 columns by 40 rows, of which only the bottom 20 rows
//! are visible. The hidden upper half gives pieces room to overflow above the
//! visible window before the game ends.
//!
//! - **Columns**: 10 (x indexed 0-9, left to right)
//! - **Rows**: 40 total (y indexed 0-39, top to bottom), 20 visible
//! - **Spawn position**: (3, 19), the row just above the visible window
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Grace period once a piece is grounded |
//! | `NEW_BLOCK_DELAY_MS` | 200 | Delay between a lock and the next spawn |
//! | `BASE_FALL_INTERVAL_MS` | 1000 | Gravity interval at level 1 |
//!
//! The per-level gravity curve is computed in [`crate::core::scoring`]:
//! `1000 * (0.8 - 0.007 * (level - 1)) ^ (level - 1)` milliseconds per row.

/// Playfield width in cells.
pub const COLUMNS: u8 = 10;

/// Total playfield height in cells, including the hidden upper half.
pub const ROWS: u8 = 40;

/// Number of rows exposed for rendering (the bottom of the playfield).
pub const VISIBLE_ROWS: u8 = 20;

/// Rows hidden above the visible window.
pub const HIDDEN_ROWS: u8 = ROWS - VISIBLE_ROWS;

/// Position (x, y) where new pieces spawn.
pub const SPAWN_POSITION: (i8, i8) = (3, 19);

/// Grace period in milliseconds before a grounded piece locks.
pub const LOCK_DELAY_MS: u32 = 500;

/// Delay in milliseconds between a piece locking and the next spawn.
pub const NEW_BLOCK_DELAY_MS: u32 = 200;

/// Gravity interval at level 1 (1000ms = one row per second).
pub const BASE_FALL_INTERVAL_MS: f64 = 1000.0;

/// Number of upcoming pieces exposed in the preview.
pub const PREVIEW_SIZE: usize = 3;

/// Adjusted line count needed per level is `level * LINE_GOAL_MULTIPLIER`.
pub const LINE_GOAL_MULTIPLIER: u32 = 5;

/// Base points per adjusted line, multiplied by level on a clearing lock.
pub const LINE_SCORE_BASE: u32 = 100;

/// Combo bonus is `COMBO_STEP_SCORE * (combo - 1) * level`.
pub const COMBO_STEP_SCORE: u32 = 50;

/// The seven tetromino types.
///
/// Each type has a fixed base shape; the engine itself only cares about
/// occupancy, the render layer maps types to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl BlockType {
    /// All block types, in catalog order. Used to build 7-bag refills.
    pub const ALL: [BlockType; 7] = [
        BlockType::I,
        BlockType::J,
        BlockType::L,
        BlockType::O,
        BlockType::S,
        BlockType::T,
        BlockType::Z,
    ];
}

/// Rotation states, advancing 90 degrees clockwise per step.
///
/// The cycle goes North -> East -> South -> West -> North. North is the
/// spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90 degrees).
    pub fn rotated_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (270 degrees clockwise).
    pub fn rotated_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Numeric state in 0..4, with North = 0.
    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Player-facing movements accepted by the state machine.
///
/// Gravity steps are internal and never dispatched through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Move the active piece one cell left.
    MoveLeft,
    /// Move the active piece one cell right.
    MoveRight,
    /// Rotate the active piece 90 degrees clockwise.
    RotateCw,
    /// Rotate the active piece 90 degrees counter-clockwise.
    RotateCcw,
    /// Drop one cell immediately (scores 1 point per cell).
    SoftDrop,
    /// Drop to the landing row and lock immediately (2 points per cell).
    HardDrop,
    /// Swap the active piece with the hold slot (once per spawn).
    Hold,
}

impl Movement {
    /// Whether this movement is a rotation.
    pub fn is_rotation(self) -> bool {
        matches!(self, Movement::RotateCw | Movement::RotateCcw)
    }
}

/// T-Spin classification computed when a T piece locks after a rotation.
///
/// Exposed through [`crate::core::game_state::LockEvent`] for scoring or
/// display layers; the core computes it but does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TSpin {
    /// Three or more corners occupied but the pointing side open.
    Mini,
    /// Both pointing-side corners occupied, or a Mini upgraded by a TST twist.
    Full,
}

/// Opaque identity of a spawned piece.
///
/// Board cells record the identity of the piece that wrote them, which lets
/// collision checks skip a piece's own cells without removing it from the
/// grid first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u32);

impl PieceId {
    pub const fn new(raw: u32) -> Self {
        PieceId(raw)
    }
}

/// A single cell of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Nothing here.
    Empty,
    /// A real placement: part of the stack or of the active piece.
    Block { kind: BlockType, owner: PieceId },
    /// Ghost-piece shadow, written only for rendering. Never blocks
    /// movement, never counts toward a full row, and is overwritten by any
    /// real placement.
    Shadow(BlockType),
}

impl Cell {
    /// Whether this cell holds a real placement.
    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block { .. })
    }

    /// The block type rendered at this cell, if any.
    pub fn kind(self) -> Option<BlockType> {
        match self {
            Cell::Empty => None,
            Cell::Block { kind, .. } => Some(kind),
            Cell::Shadow(kind) => Some(kind),
        }
    }
}
