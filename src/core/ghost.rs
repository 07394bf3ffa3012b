//! Ghost piece - the landing preview of the active piece.
//!
//! A ghost is a pure projection: it is derived from the active piece and the
//! board on demand and holds no state of its own, so it can never go stale.
//! Render layers either read its cells directly or stamp shadow markers onto
//! a board copy; shadow cells never participate in collision or line clears.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::shapes::ShapeMask;
use crate::types::{BlockType, Cell, Rotation};

/// Shadow of a piece projected to its landing row.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostPiece {
    kind: BlockType,
    x: i8,
    y: i8,
    rotation: Rotation,
    mask: ShapeMask,
}

impl GhostPiece {
    /// Project `piece` straight down to the last row where it still fits.
    ///
    /// The piece's own cells are transparent to the projection, so a
    /// grounded piece projects onto itself. Neither the piece nor the board
    /// is modified.
    pub fn project(piece: &Piece, board: &Board) -> Self {
        let mut y = piece.y();
        let offsets = piece.mask().offsets();
        loop {
            let fits = offsets
                .iter()
                .all(|&(ox, oy)| !board.blocks(piece.x() + ox, y + 1 + oy, piece.id()));
            if !fits {
                break;
            }
            y += 1;
        }
        Self {
            kind: piece.kind(),
            x: piece.x(),
            y,
            rotation: piece.rotation(),
            mask: *piece.mask(),
        }
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    /// Landing row of the bounding box.
    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Absolute board coordinates of the shadow cells.
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        self.mask
            .offsets()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Stamp shadow markers onto the board for rendering. Occupied cells are
    /// skipped, never overwritten.
    pub fn place(&self, board: &mut Board) {
        for (x, y) in self.cells() {
            if board.get(x, y) == Some(Cell::Empty) {
                board.set(x, y, Cell::Shadow(self.kind));
            }
        }
    }

    /// Erase this ghost's shadow markers. Only shadow cells are cleared.
    pub fn remove(&self, board: &mut Board) {
        for (x, y) in self.cells() {
            if matches!(board.get(x, y), Some(Cell::Shadow(_))) {
                board.set(x, y, Cell::Empty);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, COLUMNS, ROWS};

    #[test]
    fn projection_matches_hard_drop() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceId::new(1), BlockType::T, 3, 19);
        piece.place(&mut board);

        let ghost = GhostPiece::project(&piece, &board);

        // Hard-drop a copy on a scratch board and compare landing rows.
        let mut scratch = board.clone();
        let mut probe = piece.clone();
        probe.hard_drop(&mut scratch);
        assert_eq!(ghost.y(), probe.y());
        assert_eq!(ghost.x(), probe.x());
        assert_eq!(ghost.rotation(), probe.rotation());
    }

    #[test]
    fn grounded_piece_projects_onto_itself() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceId::new(1), BlockType::O, 3, ROWS as i8 - 3);
        piece.place(&mut board);

        let ghost = GhostPiece::project(&piece, &board);
        assert_eq!(ghost.y(), piece.y());
    }

    #[test]
    fn projection_rests_on_the_stack() {
        let mut board = Board::new();
        for x in 0..COLUMNS as i8 {
            board.set(x, 39, Cell::Block {
                kind: BlockType::I,
                owner: PieceId::new(9),
            });
        }
        let piece = Piece::new(PieceId::new(1), BlockType::O, 3, 19);
        let ghost = GhostPiece::project(&piece, &board);
        // O minos sit on box rows 1-2, so the box rests at row 36 with its
        // bottom mino row on the stack.
        assert_eq!(ghost.y(), 36);
    }

    #[test]
    fn shadow_markers_skip_occupied_cells_and_erase_cleanly() {
        let mut board = Board::new();
        let stack = Cell::Block {
            kind: BlockType::S,
            owner: PieceId::new(9),
        };
        let piece = Piece::new(PieceId::new(1), BlockType::O, 3, 19);
        let ghost = GhostPiece::project(&piece, &board);
        let (cx, cy) = ghost.cells()[0];
        board.set(cx, cy, stack);

        ghost.place(&mut board);
        assert_eq!(board.get(cx, cy), Some(stack));
        for &(x, y) in ghost.cells().iter().skip(1) {
            assert_eq!(board.get(x, y), Some(Cell::Shadow(BlockType::O)));
        }

        ghost.remove(&mut board);
        assert_eq!(board.get(cx, cy), Some(stack));
        for &(x, y) in ghost.cells().iter().skip(1) {
            assert_eq!(board.get(x, y), Some(Cell::Empty));
        }
    }
}
