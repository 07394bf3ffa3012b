//! Shape catalog: tetromino occupancy masks and wall-kick tables.
//!
//! Each block type has one base mask (its spawn orientation) drawn in a
//! small bounding box; other orientations are derived by rotating the mask
//! 90 degrees at a time, never stored. Kick offsets use the grid's
//! y-down convention (positive dy is toward the floor).

use arrayvec::ArrayVec;

use crate::types::{BlockType, Rotation};

/// Occupancy mask of a piece inside its bounding box.
///
/// The box side is 3 for J/L/S/T/Z and 4 for I and O. Rotating four times
/// returns the original mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMask {
    size: u8,
    cells: [[bool; 4]; 4],
}

impl ShapeMask {
    fn from_rows(size: u8, rows: [&[u8]; 4]) -> Self {
        let mut cells = [[false; 4]; 4];
        for (y, row) in rows.iter().enumerate().take(size as usize) {
            for (x, byte) in row.iter().enumerate().take(size as usize) {
                cells[y][x] = *byte == b'.';
            }
        }
        ShapeMask { size, cells }
    }

    /// Side length of the bounding box (3 or 4).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the mask occupies the box cell at (x, y).
    pub fn occupied(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size && self.cells[y as usize][x as usize]
    }

    /// Offsets of the four occupied cells, row-major, relative to the box
    /// top-left corner.
    pub fn offsets(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for y in 0..self.size as usize {
            for x in 0..self.size as usize {
                if self.cells[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// The mask rotated 90 degrees clockwise (transpose + reverse rows).
    pub fn rotated_cw(&self) -> Self {
        let size = self.size as usize;
        let mut cells = [[false; 4]; 4];
        for (y, row) in cells.iter_mut().enumerate().take(size) {
            for (x, cell) in row.iter_mut().enumerate().take(size) {
                *cell = self.cells[size - 1 - x][y];
            }
        }
        ShapeMask {
            size: self.size,
            cells,
        }
    }

    /// The mask rotated by `steps` quarter turns clockwise.
    pub fn rotated(&self, steps: u8) -> Self {
        let mut mask = *self;
        for _ in 0..steps % 4 {
            mask = mask.rotated_cw();
        }
        mask
    }
}

/// Base (spawn orientation) mask for a block type.
pub fn base_mask(kind: BlockType) -> ShapeMask {
    match kind {
        BlockType::I => ShapeMask::from_rows(4, [b"    ", b"....", b"    ", b"    "]),
        BlockType::J => ShapeMask::from_rows(3, [b".  ", b"...", b"   ", b""]),
        BlockType::L => ShapeMask::from_rows(3, [b"  .", b"...", b"   ", b""]),
        // Centered in the 4x4 box so a quarter-turn maps the square onto
        // itself.
        BlockType::O => ShapeMask::from_rows(4, [b"    ", b" .. ", b" .. ", b"    "]),
        BlockType::S => ShapeMask::from_rows(3, [b" ..", b".. ", b"   ", b""]),
        BlockType::T => ShapeMask::from_rows(3, [b" . ", b"...", b"   ", b""]),
        BlockType::Z => ShapeMask::from_rows(3, [b".. ", b" ..", b"   ", b""]),
    }
}

/// Kick offsets tried in order when the unkicked rotation is blocked.
pub type KickList = [(i8, i8); 4];

const JLSTZ_KICKS_0_TO_1: KickList = [(-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_KICKS_0_TO_3: KickList = [(1, 0), (1, -1), (0, 2), (1, 2)];
const JLSTZ_KICKS_1_TO_0: KickList = [(1, 0), (1, 1), (0, -2), (1, -2)];
const JLSTZ_KICKS_1_TO_2: KickList = [(1, 0), (1, 1), (0, -2), (1, -2)];
const JLSTZ_KICKS_2_TO_1: KickList = [(-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_KICKS_2_TO_3: KickList = [(1, 0), (1, -1), (0, 2), (1, 2)];
const JLSTZ_KICKS_3_TO_2: KickList = [(-1, 0), (-1, 1), (0, -2), (-1, -2)];
const JLSTZ_KICKS_3_TO_0: KickList = [(-1, 0), (-1, 1), (0, -2), (-1, -2)];

const I_KICKS_0_TO_1: KickList = [(-2, 0), (1, 0), (-2, -1), (1, -2)];
const I_KICKS_0_TO_3: KickList = [(-1, 0), (2, 0), (-1, -2), (2, 1)];
const I_KICKS_1_TO_0: KickList = [(2, 0), (-1, 0), (2, -1), (-1, 2)];
const I_KICKS_1_TO_2: KickList = [(-1, 0), (2, 0), (-1, -2), (2, 1)];
const I_KICKS_2_TO_1: KickList = [(1, 0), (-2, 0), (1, 2), (-2, -1)];
const I_KICKS_2_TO_3: KickList = [(2, 0), (-1, 0), (2, -1), (-1, 2)];
const I_KICKS_3_TO_2: KickList = [(-2, 0), (1, 0), (-2, 1), (1, -2)];
const I_KICKS_3_TO_0: KickList = [(1, 0), (-2, 0), (1, 2), (-2, -1)];

/// Wall kicks for a rotation transition, in priority order.
///
/// Returns `None` for the O piece, and for transitions with no table entry
/// (180-degree turns): those rotations succeed only if the unkicked
/// placement is legal.
pub fn wall_kicks(kind: BlockType, from: Rotation, to: Rotation) -> Option<&'static KickList> {
    if kind == BlockType::O {
        return None;
    }
    let table: &'static KickList = match (kind, from.index(), to.index()) {
        (BlockType::I, 0, 1) => &I_KICKS_0_TO_1,
        (BlockType::I, 0, 3) => &I_KICKS_0_TO_3,
        (BlockType::I, 1, 0) => &I_KICKS_1_TO_0,
        (BlockType::I, 1, 2) => &I_KICKS_1_TO_2,
        (BlockType::I, 2, 1) => &I_KICKS_2_TO_1,
        (BlockType::I, 2, 3) => &I_KICKS_2_TO_3,
        (BlockType::I, 3, 2) => &I_KICKS_3_TO_2,
        (BlockType::I, 3, 0) => &I_KICKS_3_TO_0,
        (_, 0, 1) => &JLSTZ_KICKS_0_TO_1,
        (_, 0, 3) => &JLSTZ_KICKS_0_TO_3,
        (_, 1, 0) => &JLSTZ_KICKS_1_TO_0,
        (_, 1, 2) => &JLSTZ_KICKS_1_TO_2,
        (_, 2, 1) => &JLSTZ_KICKS_2_TO_1,
        (_, 2, 3) => &JLSTZ_KICKS_2_TO_3,
        (_, 3, 2) => &JLSTZ_KICKS_3_TO_2,
        (_, 3, 0) => &JLSTZ_KICKS_3_TO_0,
        _ => return None,
    };
    Some(table)
}

/// The four outer corners of the T piece's 3x3 bounding box.
pub const T_CORNERS: [(i8, i8); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];

/// The two corners adjacent to the side the T piece points toward.
///
/// Both must be occupied for a full T-Spin; otherwise the spin is a Mini.
pub fn t_pointing_corners(rotation: Rotation) -> [(i8, i8); 2] {
    match rotation {
        Rotation::North => [(0, 0), (2, 0)],
        Rotation::East => [(2, 0), (2, 2)],
        Rotation::South => [(2, 2), (0, 2)],
        Rotation::West => [(0, 2), (0, 0)],
    }
}

/// Kick indices of the two rotations that make up a TST twist.
pub const TST_KICK_INDICES: [usize; 2] = [1, 3];

/// Rotation cycle of a clockwise TST twist; a counter-clockwise twist walks
/// the same cycle in reverse.
pub const TST_ROTATIONS: [Rotation; 3] = [Rotation::West, Rotation::North, Rotation::East];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn every_mask_has_four_cells() {
        for kind in BlockType::ALL {
            for steps in 0..4 {
                let mask = base_mask(kind).rotated(steps);
                assert_eq!(mask.offsets().len(), 4, "{:?} rotated {}", kind, steps);
            }
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in BlockType::ALL {
            let base = base_mask(kind);
            assert_eq!(base.rotated(4), base, "{:?}", kind);
        }
    }

    #[test]
    fn ccw_is_three_cw_steps() {
        for kind in BlockType::ALL {
            let base = base_mask(kind);
            assert_eq!(base.rotated(3).rotated_cw(), base, "{:?}", kind);
        }
    }

    #[test]
    fn o_mask_is_rotation_invariant() {
        let base = base_mask(BlockType::O);
        assert_eq!(base.rotated_cw(), base);
    }

    #[test]
    fn i_base_mask_is_horizontal_bar() {
        let offsets = base_mask(BlockType::I).offsets();
        assert_eq!(&offsets[..], &[(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn t_base_mask_points_north() {
        let offsets = base_mask(BlockType::T).offsets();
        assert_eq!(&offsets[..], &[(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn t_rotated_cw_points_east() {
        let offsets = base_mask(BlockType::T).rotated_cw().offsets();
        assert_eq!(&offsets[..], &[(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn o_piece_has_no_kicks() {
        for from in ALL_ROTATIONS {
            assert!(wall_kicks(BlockType::O, from, from.rotated_cw()).is_none());
        }
    }

    #[test]
    fn half_turns_have_no_kicks() {
        assert!(wall_kicks(BlockType::T, Rotation::North, Rotation::South).is_none());
        assert!(wall_kicks(BlockType::I, Rotation::East, Rotation::West).is_none());
    }

    #[test]
    fn jlstz_share_a_kick_table() {
        for kind in [BlockType::J, BlockType::L, BlockType::S, BlockType::Z] {
            for from in ALL_ROTATIONS {
                let to = from.rotated_cw();
                assert_eq!(
                    wall_kicks(kind, from, to),
                    wall_kicks(BlockType::T, from, to),
                    "{:?}",
                    kind
                );
            }
        }
    }

    #[test]
    fn i_kicks_differ_from_jlstz() {
        assert_ne!(
            wall_kicks(BlockType::I, Rotation::North, Rotation::East),
            wall_kicks(BlockType::T, Rotation::North, Rotation::East),
        );
    }

    #[test]
    fn pointing_corners_are_box_corners() {
        for rotation in ALL_ROTATIONS {
            for corner in t_pointing_corners(rotation) {
                assert!(T_CORNERS.contains(&corner));
            }
        }
    }
}
