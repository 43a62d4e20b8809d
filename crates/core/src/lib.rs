//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the versus game: geometry, board, the per-timeline
//! state machine and attack scoring. It has **zero dependencies** on rendering, I/O or
//! the search agent, and every transition is a function of (state, action).
//!
//! # Module Structure
//!
//! - [`board`]: 10x40 grid with row removal and garbage insertion
//! - [`game_state`]: one timeline: active piece, hold, combo, back-to-back, garbage queues
//! - [`pieces`]: tetromino offsets, family bounding boxes and wall kicks
//! - [`queue`]: the shared, immutable piece sequence
//! - [`rng`]: 7-bag generation and the LCG used for garbage holes
//! - [`scoring`]: attack tables, back-to-back and combo bonuses, garbage cancellation
//! - [`snapshot`]: read-only view for renderers and reports
//!
//! # Game Rules
//!
//! - **Board**: rows are indexed bottom to top; pieces spawn at row 19, column 4
//! - **Rotation**: per-family kick tables with five candidates; the O piece never rotates
//! - **Hold**: once per piece; the held piece returns at the next hold
//! - **Spins**: T pieces locked right after a rotation are classified by corner occupancy
//! - **Garbage**: incoming lines wait in a queue until a lock clears nothing
//!
//! # Example
//!
//! ```
//! use tetro_duel_core::{GameState, PieceQueue};
//! use tetro_duel_types::{GameAction, PieceKind};
//!
//! let queue = PieceQueue::from_letters("tiozjls").unwrap();
//! let mut game = GameState::new(queue, 7);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.active().kind, PieceKind::I);
//! assert_eq!(game.queue_position(), 1);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetro_duel_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{ActionOutcome, GameState, LockOutcome, Tetromino};
pub use pieces::{get_shape, occupied_cells, try_rotate, PieceCells, Rotated};
pub use queue::{InvalidPieceLetter, PieceQueue};
pub use rng::{SevenBag, SimpleRng};
pub use scoring::{calculate_attack, cancel_garbage, AttackResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
