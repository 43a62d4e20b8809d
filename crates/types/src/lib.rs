//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the engine, the search agent and the
//! duel driver. All types are plain data with no game logic attached.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 40 rows (indexed 0-39, bottom to top; row 0 is the floor)
//! - **Visible**: the bottom 20 rows
//! - **Spawn anchor**: row 19, column 4, orientation 0
//!
//! # Attack Tables
//!
//! | Index | Clear | Attack |
//! |-------|-------|--------|
//! | 0 | single | 0 |
//! | 1 | double | 1 |
//! | 2 | triple | 2 |
//! | 3 | quad | 4 |
//! | 4 | mini spin | 0 |
//! | 5 | spin single | 2 |
//! | 6 | spin double | 4 |
//! | 7 | spin triple | 6 |
//! | 8 | all clear | 10 |
//!
//! # Examples
//!
//! ```
//! use tetro_duel_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let parsed = PieceKind::from_char('t').unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 40);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (40 rows, including the hidden buffer)
pub const BOARD_HEIGHT: usize = 40;

/// Rows shown to a viewer, counted from the floor
pub const VISIBLE_HEIGHT: usize = 20;

/// Anchor row of a freshly spawned piece
pub const SPAWN_ROW: i8 = 19;

/// Anchor column of a freshly spawned piece
pub const SPAWN_COL: i8 = 4;

/// Rows above and below the anchor scanned for full lines at lock time
pub const CLEAR_SCAN_RADIUS: i8 = 3;

/// Base attack per clear kind, indexed by [`ClearKind::index`]
pub const ATTACK_TABLE: [u32; 9] = [0, 1, 2, 4, 0, 2, 4, 6, 10];

/// Combo bonus indexed by `min(combo, 12)` after the combo counter was incremented
pub const COMBO_TABLE: [u32; 13] = [0, 0, 1, 1, 1, 2, 2, 3, 3, 4, 4, 4, 5];

/// Extra attack for consecutive qualifying clears
pub const B2B_BONUS: u32 = 1;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse a piece kind from its canonical letter (case-insensitive)
    ///
    /// ```
    /// use tetro_duel_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('i'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(PieceKind::I),
            'o' => Some(PieceKind::O),
            't' => Some(PieceKind::T),
            's' => Some(PieceKind::S),
            'z' => Some(PieceKind::Z),
            'j' => Some(PieceKind::J),
            'l' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Lowercase canonical letter
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'i',
            PieceKind::O => 'o',
            PieceKind::T => 't',
            PieceKind::S => 's',
            PieceKind::Z => 'z',
            PieceKind::J => 'j',
            PieceKind::L => 'l',
        }
    }

    /// Stable non-zero code used in snapshot grids (1-7)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Piece orientation
///
/// - **North**: spawn orientation (0)
/// - **East**: one clockwise step (1)
/// - **South**: two steps (2)
/// - **West**: three clockwise steps (3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use tetro_duel_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Orientation number, 0 = spawn
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }
}

/// Contents of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Garbage,
    Piece(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }

    /// Snapshot code: 0 empty, 1-7 piece kinds, 8 garbage
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.code(),
            Cell::Garbage => 8,
        }
    }
}

/// Player-facing actions accepted by the engine
///
/// These are shared by any external driver and the search agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    MoveDown,
    /// Drop to the lowest reachable row without locking
    SoftDrop,
    /// Soft drop, then lock
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use tetro_duel_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
        }
    }
}

/// T-spin detection result
///
/// - **None**: not a spin
/// - **Mini**: one of the two orientation-specific "mini" corners is open
/// - **Full**: at most one corner open, and it is not a mini corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinKind {
    #[default]
    None,
    Mini,
    Full,
}

/// Most recent successful piece action, consulted by spin detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LastAction {
    /// Nothing happened since the piece spawned
    #[default]
    None,
    Move,
    Rotate,
    Lock,
}

/// Category of a line clear; the discriminant indexes [`ATTACK_TABLE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearKind {
    Single,
    Double,
    Triple,
    Quad,
    MiniSpin,
    SpinSingle,
    SpinDouble,
    SpinTriple,
    AllClear,
}

impl ClearKind {
    /// Classify a clear of `lines` rows (1 or more) with the detected spin.
    ///
    /// A mini spin clearing two or more rows counts as a full spin.
    ///
    /// ```
    /// use tetro_duel_types::{ClearKind, SpinKind};
    ///
    /// assert_eq!(ClearKind::classify(4, SpinKind::None), ClearKind::Quad);
    /// assert_eq!(ClearKind::classify(1, SpinKind::Mini), ClearKind::MiniSpin);
    /// assert_eq!(ClearKind::classify(2, SpinKind::Mini), ClearKind::SpinDouble);
    /// ```
    pub fn classify(lines: usize, spin: SpinKind) -> Self {
        match (spin, lines) {
            (SpinKind::Mini, 0..=1) => ClearKind::MiniSpin,
            (SpinKind::Mini | SpinKind::Full, 0..=1) => ClearKind::SpinSingle,
            (SpinKind::Mini | SpinKind::Full, 2) => ClearKind::SpinDouble,
            (SpinKind::Mini | SpinKind::Full, _) => ClearKind::SpinTriple,
            (SpinKind::None, 0..=1) => ClearKind::Single,
            (SpinKind::None, 2) => ClearKind::Double,
            (SpinKind::None, 3) => ClearKind::Triple,
            (SpinKind::None, _) => ClearKind::Quad,
        }
    }

    /// Placement-type index reported with every lock (0-8)
    pub fn index(&self) -> usize {
        match self {
            ClearKind::Single => 0,
            ClearKind::Double => 1,
            ClearKind::Triple => 2,
            ClearKind::Quad => 3,
            ClearKind::MiniSpin => 4,
            ClearKind::SpinSingle => 5,
            ClearKind::SpinDouble => 6,
            ClearKind::SpinTriple => 7,
            ClearKind::AllClear => 8,
        }
    }

    pub fn base_attack(&self) -> u32 {
        ATTACK_TABLE[self.index()]
    }

    pub fn is_spin(&self) -> bool {
        matches!(
            self,
            ClearKind::MiniSpin | ClearKind::SpinSingle | ClearKind::SpinDouble | ClearKind::SpinTriple
        )
    }
}
