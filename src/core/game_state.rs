//! Game state module - the state machine driving one game session.
//!
//! Ties together the board, active piece, piece queue, timers, scoring, and
//! the move log. External layers feed it discrete movements through
//! [`GameState::apply_movement`] and drive gravity, lock delay, and spawn
//! delay through [`GameState::advance_time`]; within one tick all pending
//! movements are expected to be applied before time advances.

use crate::core::board::Board;
use crate::core::ghost::GhostPiece;
use crate::core::movelog::{MoveLog, MoveRecord, RotationRecord};
use crate::core::piece::Piece;
use crate::core::rng::PieceQueue;
use crate::core::scoring;
use crate::core::shapes::{t_pointing_corners, T_CORNERS, TST_KICK_INDICES, TST_ROTATIONS};
use crate::types::{
    BlockType, Movement, PieceId, Rotation, TSpin, LOCK_DELAY_MS, NEW_BLOCK_DELAY_MS,
    PREVIEW_SIZE, SPAWN_POSITION,
};

/// Emitted when a piece locks; consumable by display or combo layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// T-Spin classification, if the lock qualified.
    pub tspin: Option<TSpin>,
    /// Combo counter after this lock (1 means the chain was broken).
    pub combo: u32,
    /// Points awarded for the clear, excluding drop points.
    pub score_awarded: u32,
}

/// Complete state of one game session.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    hold: Option<BlockType>,
    /// Whether hold was already used for the current spawn.
    block_held: bool,
    queue: PieceQueue,
    move_log: MoveLog,
    fall_interval_ms: f64,
    fall_timer_ms: f64,
    lock_timer_ms: u32,
    lock_started: bool,
    spawn_timer_ms: u32,
    awaiting_spawn: bool,
    /// A gravity step is due on the next time advance.
    gravity_step_due: bool,
    level: u32,
    score: u32,
    /// Adjusted lines accumulated toward the next level.
    line_progress: u32,
    combo: u32,
    paused: bool,
    game_over: bool,
    next_piece_id: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new session with the given RNG seed. The first call to
    /// [`advance_time`](Self::advance_time) spawns the first piece.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            block_held: false,
            queue: PieceQueue::new(seed),
            move_log: MoveLog::new(),
            fall_interval_ms: scoring::fall_interval_ms(1),
            fall_timer_ms: 0.0,
            lock_timer_ms: 0,
            lock_started: false,
            // Saturated so the first piece spawns without waiting.
            spawn_timer_ms: NEW_BLOCK_DELAY_MS,
            awaiting_spawn: true,
            gravity_step_due: false,
            level: 1,
            score: 0,
            line_progress: 0,
            combo: 1,
            paused: false,
            game_over: false,
            next_piece_id: 0,
            last_event: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Landing shadow of the active piece, recomputed on every call.
    pub fn ghost(&self) -> Option<GhostPiece> {
        self.active
            .as_ref()
            .map(|piece| GhostPiece::project(piece, &self.board))
    }

    pub fn hold_kind(&self) -> Option<BlockType> {
        self.hold
    }

    /// Whether the hold command would be accepted right now.
    pub fn can_hold(&self) -> bool {
        !self.block_held
    }

    pub fn preview(&self) -> [BlockType; PREVIEW_SIZE] {
        self.queue.preview()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Adjusted lines accumulated toward the next level.
    pub fn line_progress(&self) -> u32 {
        self.line_progress
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current gravity interval in milliseconds.
    pub fn fall_interval_ms(&self) -> f64 {
        self.fall_interval_ms
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Fill a caller-owned snapshot buffer with the current state.
    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::{ActiveSnapshot, TimersSnapshot};

        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost().map(|ghost| ghost.y());
        out.hold = self.hold;
        out.preview = self.queue.preview();
        out.can_hold = self.can_hold();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.score = self.score;
        out.level = self.level;
        out.combo = self.combo;
        out.line_progress = self.line_progress;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms as u32,
            lock_ms: self.lock_timer_ms,
            spawn_ms: self.spawn_timer_ms,
        };
    }

    /// Convenience wrapper around [`snapshot_into`](Self::snapshot_into).
    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut out = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Toggle the pause flag. While paused no timers advance and no
    /// movements are accepted; all state is preserved for resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Restart the session, drawing a fresh piece sequence from the queue's
    /// current RNG state.
    pub fn reset(&mut self) {
        *self = Self::new(self.queue.seed());
    }

    /// Apply one player movement. Returns whether it had an effect. Illegal
    /// movements are regular outcomes, not errors; nothing is accepted while
    /// paused or after game over.
    pub fn apply_movement(&mut self, movement: Movement) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        match movement {
            Movement::MoveLeft => self.shift_active(movement, -1),
            Movement::MoveRight => self.shift_active(movement, 1),
            Movement::RotateCw => self.rotate_active(movement, true),
            Movement::RotateCcw => self.rotate_active(movement, false),
            Movement::SoftDrop => self.soft_drop(),
            Movement::HardDrop => self.hard_drop(),
            Movement::Hold => self.hold_active(),
        }
    }

    /// Advance gravity, lock-delay, and spawn timers by `elapsed_ms`.
    pub fn advance_time(&mut self, elapsed_ms: u32) {
        if self.paused || self.game_over {
            return;
        }

        if self.awaiting_spawn && self.spawn_timer_ms >= NEW_BLOCK_DELAY_MS {
            self.spawn_from_queue();
            self.awaiting_spawn = false;
            self.block_held = false;
            self.spawn_timer_ms = 0;
            if self.game_over {
                return;
            }
        }
        if self.awaiting_spawn {
            self.spawn_timer_ms += elapsed_ms;
        }

        if self.active.is_none() {
            return;
        }

        // The fall timer pauses while a gravity step is pending so slow
        // ticks cannot bank extra steps.
        if !self.gravity_step_due {
            self.fall_timer_ms += elapsed_ms as f64;
        }
        if self.lock_started {
            self.lock_timer_ms += elapsed_ms;
        }
        if self.fall_timer_ms >= self.fall_interval_ms {
            self.gravity_step_due = true;
            self.fall_timer_ms %= self.fall_interval_ms;
        }

        let can_fall = match self.active.as_ref() {
            Some(piece) => piece.can_move(&self.board, 0, 1),
            None => return,
        };
        if can_fall {
            self.lock_started = false;
            self.lock_timer_ms = 0;
            if self.gravity_step_due {
                if let Some(piece) = self.active.as_mut() {
                    piece.force_shift(&mut self.board, 0, 1);
                }
            }
            self.gravity_step_due = false;
        } else {
            self.lock_started = true;
        }

        if self.lock_timer_ms >= LOCK_DELAY_MS {
            // Final downward attempt; the piece locks either way.
            if let Some(piece) = self.active.as_mut() {
                piece.shift(&mut self.board, 0, 1);
            }
            self.lock_active_piece();
        }
    }

    fn shift_active(&mut self, movement: Movement, dx: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.shift(&mut self.board, dx, 0) {
            self.lock_timer_ms = 0;
            self.move_log.push(MoveRecord::movement(movement));
            true
        } else {
            false
        }
    }

    fn rotate_active(&mut self, movement: Movement, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let outcome = piece.rotate(&mut self.board, clockwise);
        if outcome.success {
            self.lock_timer_ms = 0;
            self.move_log.push(MoveRecord::rotation(
                movement,
                RotationRecord {
                    from: outcome.from,
                    to: outcome.to,
                    kick: outcome.kick,
                },
            ));
            true
        } else {
            false
        }
    }

    fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.shift(&mut self.board, 0, 1) {
            self.score += scoring::drop_score(1, false);
            self.gravity_step_due = false;
            self.move_log.push(MoveRecord::movement(Movement::SoftDrop));
            true
        } else {
            false
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let cells = piece.hard_drop(&mut self.board);
        self.score += scoring::drop_score(cells, true);
        if cells > 0 {
            self.move_log.push(MoveRecord::movement(Movement::HardDrop));
        }
        self.lock_active_piece();
        true
    }

    fn hold_active(&mut self) -> bool {
        if self.block_held {
            return false;
        }
        let Some(mut piece) = self.active.take() else {
            return false;
        };
        piece.remove(&mut self.board);
        let held_kind = piece.kind();

        // Hold-initiated spawns bypass the spawn-delay timer.
        match self.hold.take() {
            Some(stored) => {
                self.spawn(stored);
                self.hold = Some(held_kind);
            }
            None => {
                self.hold = Some(held_kind);
                self.spawn_from_queue();
            }
        }
        self.block_held = true;
        true
    }

    fn spawn_from_queue(&mut self) {
        let kind = self.queue.draw();
        self.spawn(kind);
    }

    /// Place a fresh piece at the spawn position. On success the piece
    /// immediately settles one row if it can; on failure the game ends.
    fn spawn(&mut self, kind: BlockType) {
        let id = PieceId::new(self.next_piece_id);
        self.next_piece_id = self.next_piece_id.wrapping_add(1);

        let (x, y) = SPAWN_POSITION;
        let mut piece = Piece::new(id, kind, x, y);
        if piece.can_place(&self.board) {
            piece.place(&mut self.board);
            piece.shift(&mut self.board, 0, 1);
            self.active = Some(piece);
        } else {
            self.active = None;
            self.game_over = true;
        }

        self.fall_timer_ms = 0.0;
        self.gravity_step_due = false;
        self.lock_timer_ms = 0;
        self.lock_started = false;
    }

    /// Lock the active piece: classify T-Spins, clear lines, update
    /// score/combo/level, and schedule the next spawn.
    fn lock_active_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        // Corners are read before the cleared rows collapse.
        let tspin = self.classify_t_spin(&piece);
        let lines = self.board.clear_full_rows();

        let mut score_awarded = 0;
        if lines > 0 {
            // The clear is scored with the level it was achieved at; the
            // level-up is credited afterwards.
            score_awarded = scoring::lock_score(lines, self.level, self.combo);
            self.score += score_awarded;
            self.combo += 1;
            let (level, progress) =
                scoring::apply_line_clears(self.level, self.line_progress, lines);
            self.level = level;
            self.line_progress = progress;
            self.fall_interval_ms = scoring::fall_interval_ms(self.level);
        } else {
            self.combo = 1;
        }

        self.lock_timer_ms = 0;
        self.lock_started = false;
        self.awaiting_spawn = true;
        self.last_event = Some(LockEvent {
            lines_cleared: lines as u32,
            tspin,
            combo: self.combo,
            score_awarded,
        });
    }

    /// Classify the lock of `piece` as a T-Spin.
    ///
    /// Only T pieces whose most recent logged movement was a rotation
    /// qualify. At least three of the four corners of the 3x3 bounding box
    /// must be occupied; the spin is Full when both pointing-side corners
    /// are occupied, otherwise Mini - unless the last two movements form a
    /// TST twist, which upgrades the Mini to a Full.
    fn classify_t_spin(&self, piece: &Piece) -> Option<TSpin> {
        if piece.kind() != BlockType::T {
            return None;
        }
        let last = self.move_log.last()?;
        last.rotation?;

        let mut occupied: [bool; 4] = [false; 4];
        let mut occupied_count = 0;
        for (i, &(cx, cy)) in T_CORNERS.iter().enumerate() {
            if self.board.is_occupied(piece.x() + cx, piece.y() + cy) {
                occupied[i] = true;
                occupied_count += 1;
            }
        }
        if occupied_count < 3 {
            return None;
        }

        let pointing = t_pointing_corners(piece.rotation());
        let pointing_filled = pointing.iter().all(|corner| {
            T_CORNERS
                .iter()
                .position(|c| c == corner)
                .is_some_and(|i| occupied[i])
        });

        if pointing_filled || self.tst_twist_performed() {
            Some(TSpin::Full)
        } else {
            Some(TSpin::Mini)
        }
    }

    /// Whether the last two logged movements form a TST twist: two
    /// same-direction rotations walking West -> North -> East (clockwise,
    /// or the reverse cycle counter-clockwise) with kick indices 1 then 3.
    fn tst_twist_performed(&self) -> bool {
        let [Some(older), Some(newer)] = self.move_log.last_two() else {
            return false;
        };
        let (Some(first), Some(second)) = (older.rotation, newer.rotation) else {
            return false;
        };
        if older.movement != newer.movement {
            return false;
        }

        let clockwise = older.movement == Movement::RotateCw;
        let cycle: [Rotation; 3] = if clockwise {
            TST_ROTATIONS
        } else {
            [TST_ROTATIONS[2], TST_ROTATIONS[1], TST_ROTATIONS[0]]
        };

        for (i, record) in [first, second].into_iter().enumerate() {
            if record.kick != Some(TST_KICK_INDICES[i])
                || record.from != cycle[i]
                || record.to != cycle[i + 1]
            {
                return false;
            }
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    fn spawn_specific(&mut self, kind: BlockType) {
        if let Some(mut piece) = self.active.take() {
            piece.remove(&mut self.board);
        }
        self.spawn(kind);
        self.awaiting_spawn = false;
        self.block_held = false;
        self.spawn_timer_ms = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
