//! Pieces module - tetromino geometry and wall-kick rotation
//!
//! Every piece is described by four `(row, col)` offsets from its anchor cell. Rows grow
//! upwards (row 0 is the floor). Validity is decided per piece family through a bounding
//! box, so an anchor either yields four in-bounds cells or nothing at all.

use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Offset of a single mino relative to the anchor, as `(row, col)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Absolute board cells of a placed piece, as `(row, col)`
pub type PieceCells = [(usize, usize); 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, -1), (0, 0), (0, 1), (0, 2)],
        Rotation::East => [(1, 0), (0, 0), (-1, 0), (-2, 0)],
        Rotation::South => [(0, -2), (0, -1), (0, 0), (0, 1)],
        Rotation::West => [(2, 0), (1, 0), (0, 0), (-1, 0)],
    }
}

/// O piece shapes (same for all rotations, anchor is the bottom-left mino)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(0, 1), (1, 0), (0, 0), (1, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, -1), (0, 0), (0, 1), (1, 0)],
        Rotation::East => [(1, 0), (0, 0), (-1, 0), (0, 1)],
        Rotation::South => [(0, -1), (0, 0), (0, 1), (-1, 0)],
        Rotation::West => [(-1, 0), (0, 0), (1, 0), (0, -1)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, -1), (0, 0), (1, 0), (1, 1)],
        Rotation::East => [(1, 0), (0, 1), (0, 0), (-1, 1)],
        Rotation::South => [(0, 1), (0, 0), (-1, 0), (-1, -1)],
        Rotation::West => [(1, -1), (0, -1), (0, 0), (-1, 0)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, -1), (1, 0), (0, 0), (0, 1)],
        Rotation::East => [(1, 1), (0, 1), (0, 0), (-1, 0)],
        Rotation::South => [(0, -1), (-1, 0), (0, 0), (-1, 1)],
        Rotation::West => [(1, 0), (0, -1), (0, 0), (-1, -1)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, -1), (0, 0), (0, 1), (1, -1)],
        Rotation::East => [(1, 0), (0, 0), (-1, 0), (1, 1)],
        Rotation::South => [(-1, 1), (0, -1), (0, 0), (0, 1)],
        Rotation::West => [(-1, -1), (1, 0), (0, 0), (-1, 0)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, -1), (0, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (0, 0), (-1, 0), (-1, 1)],
        Rotation::South => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        Rotation::West => [(1, -1), (1, 0), (0, 0), (-1, 0)],
    }
}

/// Piece family sharing one bounding-box rule and one kick table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceFamily {
    O,
    I,
    Jlstz,
}

impl PieceFamily {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::O => PieceFamily::O,
            PieceKind::I => PieceFamily::I,
            _ => PieceFamily::Jlstz,
        }
    }
}

/// Bounding box of a family in one orientation: `(row_min, row_max, col_min, col_max)`
/// offsets from the anchor, inclusive.
pub type BoundingBox = (i8, i8, i8, i8);

const O_BOUNDS: [BoundingBox; 4] = [(0, 1, 0, 1); 4];

const I_BOUNDS: [BoundingBox; 4] = [(0, 0, -1, 2), (-2, 1, 0, 0), (0, 0, -2, 1), (-1, 2, 0, 0)];

const JLSTZ_BOUNDS: [BoundingBox; 4] = [(0, 1, -1, 1), (-1, 1, 0, 1), (-1, 0, -1, 1), (-1, 1, -1, 0)];

pub fn bounding_box(kind: PieceKind, rotation: Rotation) -> BoundingBox {
    let table = match PieceFamily::of(kind) {
        PieceFamily::O => &O_BOUNDS,
        PieceFamily::I => &I_BOUNDS,
        PieceFamily::Jlstz => &JLSTZ_BOUNDS,
    };
    table[rotation.index()]
}

/// Whether a piece may exist with its anchor at `(row, col)`
pub fn anchor_in_bounds(kind: PieceKind, rotation: Rotation, row: i8, col: i8) -> bool {
    let (row_min, row_max, col_min, col_max) = bounding_box(kind, rotation);
    let (row, col) = (row as i16, col as i16);
    row + row_min as i16 >= 0
        && row + row_max as i16 <= BOARD_HEIGHT as i16 - 1
        && col + col_min as i16 >= 0
        && col + col_max as i16 <= BOARD_WIDTH as i16 - 1
}

/// Board cells covered by a piece, or `None` when the anchor is out of range
pub fn occupied_cells(kind: PieceKind, rotation: Rotation, row: i8, col: i8) -> Option<PieceCells> {
    if !anchor_in_bounds(kind, rotation, row, col) {
        return None;
    }
    let shape = get_shape(kind, rotation);
    let mut cells = [(0usize, 0usize); 4];
    for (cell, &(dr, dc)) in cells.iter_mut().zip(shape.iter()) {
        *cell = ((row + dr) as usize, (col + dc) as usize);
    }
    Some(cells)
}

/// Wall kick data
/// Each entry is a `(row, col)` anchor offset; candidates are tried in order.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece kind
/// Indexed by [`get_kick_index`]
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match PieceFamily::of(kind) {
        PieceFamily::O => &O_KICKS,
        PieceFamily::I => &I_KICKS,
        PieceFamily::Jlstz => &JLSTZ_KICKS,
    }
}

/// O piece has no kicks; it is never rotated by the engine
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
];

/// I piece kick table (the first candidate already shifts the anchor)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 1), (0, -1), (0, 2), (-1, -1), (2, 2)],
    // 0->3 (N->W)
    [(-1, 0), (-1, -1), (-1, 2), (1, -1), (-2, 2)],
    // 1->0 (E->N)
    [(0, -1), (0, 1), (0, -2), (1, 1), (-2, -2)],
    // 1->2 (E->S)
    [(-1, 0), (-1, -1), (-1, 2), (1, -1), (-2, 2)],
    // 2->1 (S->E)
    [(1, 0), (1, 1), (1, -2), (-1, 1), (2, -2)],
    // 2->3 (S->W)
    [(0, -1), (0, 1), (0, -2), (1, 1), (-2, -2)],
    // 3->2 (W->S)
    [(1, 0), (-1, 0), (2, 0), (-1, -1), (2, 2)],
    // 3->0 (W->N)
    [(1, 0), (1, 1), (1, -2), (-1, 1), (2, -2)],
];

/// Get the kick index for a rotation transition
fn get_kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// Result of a successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub rotation: Rotation,
    /// Kick that was applied, as `(row, col)`
    pub kick: (i8, i8),
    /// Position of the kick in its table (0 = first candidate)
    pub kick_index: usize,
    pub cells: PieceCells,
}

/// Try to rotate a piece with wall kicks.
///
/// `is_free(row, col)` decides whether a target cell may be occupied. Returns the first
/// candidate whose footprint is in bounds and free, or `None` if all five fail. The O
/// piece never rotates.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    row: i8,
    col: i8,
    clockwise: bool,
    is_free: impl Fn(usize, usize) -> bool,
) -> Option<Rotated> {
    if kind == PieceKind::O {
        return None;
    }

    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    let kicks = &get_kick_table(kind)[get_kick_index(rotation, clockwise)];

    for (kick_index, &(dr, dc)) in kicks.iter().enumerate() {
        let Some(cells) = occupied_cells(kind, new_rotation, row + dr, col + dc) else {
            continue;
        };
        if cells.iter().all(|&(r, c)| is_free(r, c)) {
            return Some(Rotated {
                rotation: new_rotation,
                kick: (dr, dc),
                kick_index,
                cells,
            });
        }
    }

    None
}
