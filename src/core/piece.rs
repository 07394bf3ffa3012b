//! Piece module - a placed or movable tetromino instance.
//!
//! A piece holds logical coordinates only; its cells live on the board,
//! tagged with the piece's identity. Collision checks pass that identity
//! down so the piece's own cells never read as obstacles, which keeps
//! `can_move` and `rotate` free of board churn on the failure path.

use crate::core::board::Board;
use crate::core::shapes::{base_mask, wall_kicks, ShapeMask};
use crate::types::{BlockType, Cell, PieceId, Rotation};

/// Result of a rotation attempt.
///
/// `kick` is the index into the wall-kick list that made the rotation fit,
/// or `None` when the unkicked placement was already legal. On failure the
/// board and the piece are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    pub success: bool,
    pub from: Rotation,
    pub to: Rotation,
    pub kick: Option<usize>,
}

/// The active falling tetromino.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: BlockType,
    x: i8,
    y: i8,
    rotation: Rotation,
    mask: ShapeMask,
    placed: bool,
}

impl Piece {
    /// Create a piece at (x, y) in spawn orientation, not yet on the board.
    pub fn new(id: PieceId, kind: BlockType, x: i8, y: i8) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            rotation: Rotation::North,
            mask: base_mask(kind),
            placed: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn mask(&self) -> &ShapeMask {
        &self.mask
    }

    pub fn placed(&self) -> bool {
        self.placed
    }

    /// Absolute board coordinates of the four occupied cells.
    pub fn cells(&self) -> arrayvec::ArrayVec<(i8, i8), 4> {
        self.mask
            .offsets()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Whether every occupied cell, offset by (dx, dy), lands in bounds on a
    /// cell that is empty, shadow, or this piece's own. No side effects.
    pub fn can_move(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.mask_fits(board, &self.mask, self.x + dx, self.y + dy)
    }

    /// Whether the unmoved placement is legal (used at spawn).
    pub fn can_place(&self, board: &Board) -> bool {
        self.can_move(board, 0, 0)
    }

    fn mask_fits(&self, board: &Board, mask: &ShapeMask, x: i8, y: i8) -> bool {
        mask.offsets()
            .iter()
            .all(|&(ox, oy)| !board.blocks(x + ox, y + oy, self.id))
    }

    /// Write this piece's cells onto the board. Idempotent; cells outside
    /// the grid are skipped silently, and shadow cells are overwritten.
    pub fn place(&mut self, board: &mut Board) {
        if self.placed {
            return;
        }
        for (x, y) in self.cells() {
            board.set(
                x,
                y,
                Cell::Block {
                    kind: self.kind,
                    owner: self.id,
                },
            );
        }
        self.placed = true;
    }

    /// Erase this piece's cells from the board, keyed by identity: only
    /// cells this piece owns are cleared. Idempotent.
    pub fn remove(&mut self, board: &mut Board) {
        if !self.placed {
            return;
        }
        for (x, y) in self.cells() {
            if let Some(Cell::Block { owner, .. }) = board.get(x, y) {
                if owner == self.id {
                    board.set(x, y, Cell::Empty);
                }
            }
        }
        self.placed = false;
    }

    /// Attempt a checked move by (dx, dy). Returns whether the piece moved.
    pub fn shift(&mut self, board: &mut Board, dx: i8, dy: i8) -> bool {
        if !self.can_move(board, dx, dy) {
            return false;
        }
        self.force_shift(board, dx, dy);
        true
    }

    /// Move by (dx, dy) without a legality check. Used for gravity steps
    /// already known to be legal.
    pub fn force_shift(&mut self, board: &mut Board, dx: i8, dy: i8) {
        let was_placed = self.placed;
        if was_placed {
            self.remove(board);
        }
        self.x += dx;
        self.y += dy;
        if was_placed {
            self.place(board);
        }
    }

    /// Attempt a rotation, trying wall kicks in table order when the
    /// unkicked placement is blocked. O pieces succeed trivially with no
    /// state change. The board is unchanged when the attempt fails.
    pub fn rotate(&mut self, board: &mut Board, clockwise: bool) -> RotationOutcome {
        let from = self.rotation;
        if self.kind == BlockType::O {
            return RotationOutcome {
                success: true,
                from,
                to: from,
                kick: None,
            };
        }

        let to = if clockwise {
            from.rotated_cw()
        } else {
            from.rotated_ccw()
        };
        let steps = if clockwise { 1 } else { 3 };
        let mask = self.mask.rotated(steps);

        if self.mask_fits(board, &mask, self.x, self.y) {
            self.commit_rotation(board, mask, to, self.x, self.y);
            return RotationOutcome {
                success: true,
                from,
                to,
                kick: None,
            };
        }

        if let Some(kicks) = wall_kicks(self.kind, from, to) {
            for (i, &(dx, dy)) in kicks.iter().enumerate() {
                if self.mask_fits(board, &mask, self.x + dx, self.y + dy) {
                    self.commit_rotation(board, mask, to, self.x + dx, self.y + dy);
                    return RotationOutcome {
                        success: true,
                        from,
                        to,
                        kick: Some(i),
                    };
                }
            }
        }

        RotationOutcome {
            success: false,
            from,
            to,
            kick: None,
        }
    }

    fn commit_rotation(&mut self, board: &mut Board, mask: ShapeMask, to: Rotation, x: i8, y: i8) {
        let was_placed = self.placed;
        if was_placed {
            self.remove(board);
        }
        self.mask = mask;
        self.rotation = to;
        self.x = x;
        self.y = y;
        if was_placed {
            self.place(board);
        }
    }

    /// Drop straight down to the landing row. Returns rows descended.
    pub fn hard_drop(&mut self, board: &mut Board) -> u32 {
        let mut rows = 0;
        while self.can_move(board, 0, 1) {
            self.force_shift(board, 0, 1);
            rows += 1;
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COLUMNS, ROWS};

    fn piece(kind: BlockType, x: i8, y: i8) -> Piece {
        Piece::new(PieceId::new(1), kind, x, y)
    }

    #[test]
    fn place_and_remove_are_idempotent() {
        let mut board = Board::new();
        let mut p = piece(BlockType::T, 3, 20);

        p.place(&mut board);
        p.place(&mut board);
        assert!(p.placed());
        for (x, y) in p.cells() {
            assert!(board.is_occupied(x, y));
        }

        p.remove(&mut board);
        p.remove(&mut board);
        assert!(!p.placed());
        for (x, y) in p.cells() {
            assert!(!board.is_occupied(x, y));
        }
    }

    #[test]
    fn remove_leaves_foreign_cells_alone() {
        let mut board = Board::new();
        let mut mine = piece(BlockType::T, 3, 20);
        board.set(4, 20, Cell::Block {
            kind: BlockType::I,
            owner: PieceId::new(99),
        });

        // (4, 20) belongs to the mask footprint but to another piece.
        mine.placed = true;
        mine.remove(&mut board);
        assert!(board.is_occupied(4, 20));
    }

    #[test]
    fn can_move_ignores_own_cells() {
        let mut board = Board::new();
        let mut p = piece(BlockType::O, 3, 20);
        p.place(&mut board);

        // Moving down by one overlaps the piece's own bottom row.
        assert!(p.can_move(&board, 0, 1));
        // A foreign cell in the way is a real obstacle.
        board.set(4, 23, Cell::Block {
            kind: BlockType::I,
            owner: PieceId::new(50),
        });
        assert!(!p.can_move(&board, 0, 1));
    }

    #[test]
    fn can_move_rejects_walls_and_floor() {
        let board = Board::new();
        let p = piece(BlockType::O, 0, 0);
        // O mask occupies columns 1-2 of its box at x=0.
        assert!(p.can_move(&board, -1, 0));
        assert!(!p.can_move(&board, -2, 0));

        let floor = piece(BlockType::O, 3, ROWS as i8 - 3);
        assert!(!floor.can_move(&board, 0, 1));
    }

    #[test]
    fn shift_moves_cells_on_the_board() {
        let mut board = Board::new();
        let mut p = piece(BlockType::L, 3, 20);
        p.place(&mut board);

        assert!(p.shift(&mut board, 1, 0));
        assert_eq!(p.x(), 4);
        for (x, y) in p.cells() {
            assert!(board.is_occupied(x, y));
        }
        // Old leftmost cell vacated.
        assert!(!board.is_occupied(3, 21));
    }

    #[test]
    fn failed_shift_changes_nothing() {
        let mut board = Board::new();
        let mut p = piece(BlockType::I, 0, 20);
        p.place(&mut board);
        let before = board.clone();

        assert!(!p.shift(&mut board, -1, 0));
        assert_eq!(board, before);
        assert_eq!(p.x(), 0);
    }

    #[test]
    fn o_piece_rotation_is_a_noop() {
        let mut board = Board::new();
        let mut p = piece(BlockType::O, 3, 20);
        p.place(&mut board);
        let before = board.clone();

        let outcome = p.rotate(&mut board, true);
        assert!(outcome.success);
        assert_eq!(outcome.from, outcome.to);
        assert_eq!(outcome.kick, None);
        assert_eq!(board, before);
    }

    #[test]
    fn rotation_in_open_field_needs_no_kick() {
        let mut board = Board::new();
        let mut p = piece(BlockType::T, 3, 20);
        p.place(&mut board);

        let outcome = p.rotate(&mut board, true);
        assert!(outcome.success);
        assert_eq!(outcome.from, Rotation::North);
        assert_eq!(outcome.to, Rotation::East);
        assert_eq!(outcome.kick, None);
    }

    #[test]
    fn four_rotations_restore_mask_and_position() {
        let mut board = Board::new();
        for kind in BlockType::ALL {
            let mut p = piece(kind, 3, 20);
            p.place(&mut board);
            let reference = p.clone();
            for _ in 0..4 {
                assert!(p.rotate(&mut board, true).success);
            }
            assert_eq!(p, reference, "{:?} cw", kind);
            for _ in 0..4 {
                assert!(p.rotate(&mut board, false).success);
            }
            assert_eq!(p, reference, "{:?} ccw", kind);
            p.remove(&mut board);
        }
    }

    #[test]
    fn wall_kick_applies_against_the_left_wall() {
        let mut board = Board::new();
        // I piece standing in the leftmost column: the unkicked rotation
        // back to horizontal pokes through the wall.
        let mut p = piece(BlockType::I, 3, 20);
        p.place(&mut board);
        assert!(p.rotate(&mut board, false).success); // North -> West, vertical
        while p.shift(&mut board, -1, 0) {}
        assert_eq!(p.x(), -1);

        let outcome = p.rotate(&mut board, false);
        assert!(outcome.success);
        assert!(outcome.kick.is_some());
    }

    #[test]
    fn blocked_rotation_leaves_board_and_piece_untouched() {
        let mut board = Board::new();
        let mut p = piece(BlockType::T, 3, ROWS as i8 - 3);
        p.place(&mut board);
        // Box the piece in so no kick position is free.
        for x in 0..COLUMNS as i8 {
            for y in (ROWS as i8 - 6)..ROWS as i8 {
                if board.get(x, y) == Some(Cell::Empty) {
                    board.set(x, y, Cell::Block {
                        kind: BlockType::I,
                        owner: PieceId::new(77),
                    });
                }
            }
        }
        let board_before = board.clone();
        let piece_before = p.clone();

        let outcome = p.rotate(&mut board, true);
        assert!(!outcome.success);
        assert_eq!(board, board_before);
        assert_eq!(p, piece_before);
    }

    #[test]
    fn hard_drop_lands_on_the_floor() {
        let mut board = Board::new();
        let mut p = piece(BlockType::I, 3, 19);
        p.place(&mut board);

        let rows = p.hard_drop(&mut board);
        assert!(rows > 0);
        assert!(p.placed());
        assert!(!p.can_move(&board, 0, 1));
        // I piece horizontal: minos on mask row 1, so the piece rests with
        // its minos on the bottom row.
        assert_eq!(p.y(), ROWS as i8 - 2);
    }

    #[test]
    fn hard_drop_stacks_on_existing_blocks() {
        let mut board = Board::new();
        for x in 0..COLUMNS as i8 {
            board.set(x, 39, Cell::Block {
                kind: BlockType::I,
                owner: PieceId::new(9),
            });
        }
        let mut p = piece(BlockType::O, 3, 19);
        p.place(&mut board);
        p.hard_drop(&mut board);
        assert!(!p.can_move(&board, 0, 1));
        // O mask occupies box rows 1-2; it rests directly on the stack.
        assert_eq!(p.y(), 36);
    }
}
