//! Placement enumeration
//!
//! A placement is a rotation followed by horizontal shifts, optionally preceded by a
//! hold, applied at the spawn row. The tables below list every orientation and column a
//! piece family can reach that way; soft-drop-then-rotate placements are not modelled.

use std::fmt;

use arrayvec::ArrayVec;
use tetro_duel_core::GameState;
use tetro_duel_types::PieceKind;

/// One engine input of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Hold,
    RotateCw,
    RotateCcw,
    Left,
    Right,
}

/// Rotation performed before shifting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    None,
    Cw,
    Ccw,
    /// Two clockwise rotations
    Half,
}

impl Turn {
    fn inputs(self) -> &'static [Input] {
        match self {
            Turn::None => &[],
            Turn::Cw => &[Input::RotateCw],
            Turn::Ccw => &[Input::RotateCcw],
            Turn::Half => &[Input::RotateCw, Input::RotateCw],
        }
    }
}

/// Longest input sequence: hold, two rotations, five shifts
pub const MAX_INPUTS: usize = 8;

/// A candidate placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub hold: bool,
    pub turn: Turn,
    /// Columns to shift after rotating; negative is left
    pub shift: i8,
}

impl Placement {
    /// Expand into the engine inputs, in order
    pub fn inputs(&self) -> ArrayVec<Input, MAX_INPUTS> {
        let mut out = ArrayVec::new();
        if self.hold {
            out.push(Input::Hold);
        }
        out.extend(self.turn.inputs().iter().copied());
        let step = if self.shift < 0 { Input::Left } else { Input::Right };
        for _ in 0..self.shift.unsigned_abs() {
            out.push(step);
        }
        out
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .inputs()
            .iter()
            .map(|input| match input {
                Input::Hold => "hold",
                Input::RotateCw => "cw",
                Input::RotateCcw => "ccw",
                Input::Left => "left",
                Input::Right => "right",
            })
            .collect();
        if names.is_empty() {
            write!(f, "drop")
        } else {
            write!(f, "{}", names.join(" "))
        }
    }
}

/// `(turn, min shift, max shift)` rows per family
type PlacementTable = &'static [(Turn, i8, i8)];

const O_PLACEMENTS: PlacementTable = &[(Turn::None, -4, 4)];

// The I piece's first clockwise kick moves it one column right
const I_PLACEMENTS: PlacementTable = &[(Turn::None, -3, 3), (Turn::Cw, -5, 4)];

const SZ_PLACEMENTS: PlacementTable = &[(Turn::None, -3, 4), (Turn::Cw, -4, 4)];

const JLT_PLACEMENTS: PlacementTable = &[
    (Turn::None, -3, 4),
    (Turn::Half, -3, 4),
    (Turn::Cw, -4, 4),
    (Turn::Ccw, -3, 5),
];

fn placement_table(kind: PieceKind) -> PlacementTable {
    match kind {
        PieceKind::O => O_PLACEMENTS,
        PieceKind::I => I_PLACEMENTS,
        PieceKind::S | PieceKind::Z => SZ_PLACEMENTS,
        PieceKind::J | PieceKind::L | PieceKind::T => JLT_PLACEMENTS,
    }
}

/// All placements of `kind` from the spawn anchor
pub fn basic_placements(kind: PieceKind, hold: bool) -> Vec<Placement> {
    placement_table(kind)
        .iter()
        .flat_map(|&(turn, min, max)| (min..=max).map(move |shift| Placement { hold, turn, shift }))
        .collect()
}

/// All placements available to `state`: the active piece, plus the alternate piece
/// behind a hold when the hold is available. With an empty hold slot the alternate is
/// the next queue piece.
pub fn candidate_placements(state: &GameState) -> Vec<Placement> {
    if state.game_over() {
        return Vec::new();
    }

    let mut out = basic_placements(state.active().kind, false);
    if state.can_hold() {
        let alternate = state.held().or_else(|| state.preview(1));
        if let Some(kind) = alternate {
            out.extend(basic_placements(kind, true));
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    HoldUnavailable,
    NotPlayable,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::NotPlayable => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold requested when unavailable",
            PlaceError::NotPlayable => "game is not playable",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Drive the inputs of `placement` into `state` without dropping.
///
/// Blocked rotations and shifts are skipped, as a player's key press would be.
pub fn apply_placement(state: &mut GameState, placement: &Placement) -> Result<(), PlaceError> {
    if state.game_over() {
        return Err(PlaceError::NotPlayable);
    }

    for input in placement.inputs() {
        match input {
            Input::Hold => {
                if !state.hold() {
                    return Err(PlaceError::HoldUnavailable);
                }
                if state.game_over() {
                    return Err(PlaceError::NotPlayable);
                }
            }
            Input::RotateCw => {
                state.rotate_cw();
            }
            Input::RotateCcw => {
                state.rotate_ccw();
            }
            Input::Left => {
                state.move_left();
            }
            Input::Right => {
                state.move_right();
            }
        }
    }

    Ok(())
}
