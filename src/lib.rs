//! Falling-block puzzle rules engine.
//!
//! A complete, display-agnostic implementation of guideline-style falling
//! block rules: 7-bag piece queue, wall-kick rotation, gravity with a
//! per-level speed curve, lock and spawn delays, hold, line clearing with
//! combo and level progression, and T-Spin detection.
//!
//! The crate is the rules core only. Rendering, input polling, and the
//! outer event loop are collaborators that issue
//! [`Movement`](types::Movement) commands, call
//! [`GameState::advance_time`](core::GameState::advance_time) once per tick,
//! and read state back through queries or [`core::GameSnapshot`].

pub mod core;
pub mod types;
