//! Scoring module - score, leveling, and gravity-curve arithmetic.
//!
//! Scoring uses adjusted line counts: a clear of N lines is worth
//! `100 * bonus(N) * level` points, where bonus maps 1/2/3/4 lines to
//! 1/3/5/8. The same adjusted count feeds level progression: each level
//! requires `level * 5` adjusted lines, and a single large clear can advance
//! several levels at once. Lock scoring is evaluated with the level in
//! effect before the clear is credited.

use crate::types::{
    BASE_FALL_INTERVAL_MS, COMBO_STEP_SCORE, LINE_GOAL_MULTIPLIER, LINE_SCORE_BASE,
};

/// Adjusted line count for a clear: {1: 1, 2: 3, 3: 5, 4: 8}, 0 otherwise.
pub fn line_bonus(lines: usize) -> u32 {
    match lines {
        1 => 1,
        2 => 3,
        3 => 5,
        4 => 8,
        _ => 0,
    }
}

/// Points awarded by a lock that cleared `lines` rows at `level` with the
/// current `combo` counter (combo is 1 outside any chain, so the first clear
/// of a chain earns no combo bonus).
pub fn lock_score(lines: usize, level: u32, combo: u32) -> u32 {
    LINE_SCORE_BASE * line_bonus(lines) * level
        + COMBO_STEP_SCORE * combo.saturating_sub(1) * level
}

/// Points awarded per dropped cell: 1 for soft drops, 2 for hard drops.
pub fn drop_score(cells: u32, hard_drop: bool) -> u32 {
    if hard_drop {
        cells * 2
    } else {
        cells
    }
}

/// Fold a clear of `lines` rows into `(level, progress)`.
///
/// Progress accumulates adjusted lines; every `level * 5` of them buys a
/// level, possibly several times for one clear.
pub fn apply_line_clears(level: u32, progress: u32, lines: usize) -> (u32, u32) {
    if lines == 0 {
        return (level, progress);
    }
    let mut level = level;
    let mut progress = progress + line_bonus(lines);
    while progress >= level * LINE_GOAL_MULTIPLIER {
        progress -= level * LINE_GOAL_MULTIPLIER;
        level += 1;
    }
    (level, progress)
}

/// Gravity interval in milliseconds for a level:
/// `1000 * (0.8 - 0.007 * (level - 1)) ^ (level - 1)`.
pub fn fall_interval_ms(level: u32) -> f64 {
    let exponent = level.max(1) - 1;
    BASE_FALL_INTERVAL_MS * (0.8 - 0.007 * exponent as f64).powi(exponent as i32)
}
