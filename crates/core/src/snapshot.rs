//! Read-only view of a game for renderers and reports

use serde::Serialize;

use crate::game_state::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_WIDTH, VISIBLE_HEIGHT};

/// Number of upcoming pieces exposed in a snapshot
pub const NEXT_PREVIEW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

/// Visible rows are stored top row first; codes are 0 empty, 1-7 pieces, 8 garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH]; VISIBLE_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    pub next_queue: [Option<PieceKind>; NEXT_PREVIEW],
    pub can_hold: bool,
    pub game_over: bool,
    pub combo: i32,
    pub back_to_back: bool,
    /// Sum of all pending garbage entries
    pub pending_garbage: u32,
    pub total_attack: u32,
    pub pieces: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Render the visible board as text, one line per row, top first
    pub fn board_lines(&self) -> Vec<String> {
        self.board
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&code| match code {
                        0 => '.',
                        8 => 'G',
                        _ => '#',
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; VISIBLE_HEIGHT],
            active: None,
            hold: None,
            next_queue: [None; NEXT_PREVIEW],
            can_hold: true,
            game_over: false,
            combo: -1,
            back_to_back: false,
            pending_garbage: 0,
            total_attack: 0,
            pieces: 0,
        }
    }
}
