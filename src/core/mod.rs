//! Core rules engine - pure, deterministic, and testable.
//!
//! This module contains all the game rules, state management, and timing
//! logic. It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: same seed produces identical games
//! - **Testable**: every rule is exercised without a display attached
//! - **Portable**: runs in any host (terminal, GUI, headless driver)
//!
//! # Module Structure
//!
//! - [`shapes`]: tetromino masks, mask rotation, and wall-kick tables
//! - [`board`]: the 10x40 grid with ownership-tagged cells and line clearing
//! - [`piece`]: the active tetromino and its board operations
//! - [`ghost`]: landing shadow derived from the active piece on demand
//! - [`rng`]: seeded LCG and the 7-bag piece queue
//! - [`movelog`]: two-slot history feeding T-Spin detection
//! - [`scoring`]: score, combo, leveling, and the gravity curve
//! - [`game_state`]: the state machine driving one session
//! - [`snapshot`]: flat observation structs for render/driver layers
//!
//! # Game Rules
//!
//! - **7-bag randomizer** with a 3-piece preview
//! - **Wall kicks** per piece type, tried in table order
//! - **Lock delay**: 500ms once grounded; lateral moves and rotations reset it
//! - **Spawn delay**: 200ms between a lock and the next piece
//! - **Hold**: once per spawned piece, always respawning fresh
//! - **T-Spin detection**: 3-corner rule with Mini/Full split and TST upgrade
//! - **Scoring**: adjusted line counts, combo chains, and drop points
//!
//! # Example
//!
//! ```
//! use blockfall::core::GameState;
//! use blockfall::types::Movement;
//!
//! let mut game = GameState::new(12345);
//! game.advance_time(0); // spawns the first piece
//!
//! game.apply_movement(Movement::MoveRight);
//! game.apply_movement(Movement::RotateCw);
//! game.apply_movement(Movement::HardDrop);
//!
//! assert!(game.score() > 0); // hard drops award points per cell
//! ```

pub mod board;
pub mod game_state;
pub mod ghost;
pub mod movelog;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, LockEvent};
pub use ghost::GhostPiece;
pub use movelog::{MoveLog, MoveRecord, RotationRecord};
pub use piece::{Piece, RotationOutcome};
pub use rng::{PieceQueue, SimpleRng};
pub use shapes::{base_mask, wall_kicks, ShapeMask};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
