//! RNG module - 7-bag random piece generation.
//!
//! Implements the "7-bag" randomizer: each batch of seven pieces contains
//! one of every type, shuffled. The queue keeps at least seven upcoming
//! pieces buffered so the preview always has lookahead, topping itself up
//! with a fresh shuffled bag whenever it runs low.
//!
//! A small seeded LCG keeps games deterministic and replayable.

use std::collections::VecDeque;

use crate::types::{BlockType, PREVIEW_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece queue with buffered lookahead.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<BlockType>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed.
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(14),
            rng: SimpleRng::new(seed),
        };
        queue.top_up();
        queue
    }

    /// Append shuffled bags until at least seven pieces are buffered.
    fn top_up(&mut self) {
        while self.upcoming.len() < 7 {
            let mut bag = BlockType::ALL;
            self.rng.shuffle(&mut bag);
            self.upcoming.extend(bag);
        }
    }

    /// Draw the next piece from the queue.
    pub fn draw(&mut self) -> BlockType {
        let kind = self
            .upcoming
            .pop_front()
            .expect("queue is topped up on construction and after every draw");
        self.top_up();
        kind
    }

    /// Peek at the next piece without removing it.
    pub fn peek(&self) -> Option<BlockType> {
        self.upcoming.front().copied()
    }

    /// The upcoming pieces shown in the preview.
    pub fn preview(&self) -> [BlockType; PREVIEW_SIZE] {
        let mut out = [BlockType::I; PREVIEW_SIZE];
        for (slot, kind) in out.iter_mut().zip(self.upcoming.iter()) {
            *slot = *kind;
        }
        out
    }

    /// Number of buffered upcoming pieces (always at least 7).
    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Current RNG state, usable as the seed of a follow-up game.
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
