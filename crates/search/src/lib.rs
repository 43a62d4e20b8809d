//! Heuristic tree-search player
//!
//! The agent explores hypothetical futures by cloning the engine once per candidate
//! placement, scoring each locked result and keeping only the best few per node.
//!
//! # Module Structure
//!
//! - [`place`]: the closed set of placements per piece family, with hold variants
//! - [`eval`]: twelve board features and the weight vector that combines them
//! - [`tree`]: the beam-pruned search tree and the [`Agent`] that commits its moves
//! - [`duel`]: two agents playing each other with garbage exchange
//! - [`config`]: search and duel parameters, with environment overrides
//!
//! # Example
//!
//! ```
//! use tetro_duel_core::{GameState, PieceQueue};
//! use tetro_duel_search::{Agent, SearchConfig};
//!
//! let queue = PieceQueue::seven_bag(42, 50);
//! let mut game = GameState::new(queue, 42);
//! let mut agent = Agent::new(SearchConfig { max_depth: 2, beam_width: 2, ..SearchConfig::default() });
//!
//! let decision = agent.play_turn(&mut game).expect("a move on an empty board");
//! assert_eq!(game.queue_position(), 1 + decision.placement.hold as usize);
//! ```
//!
//! Sibling subtrees are expanded on rayon's thread pool when the `parallel` feature
//! is enabled.

pub mod config;
pub mod duel;
pub mod eval;
pub mod place;
pub mod tree;

pub use config::{ConfigError, DuelConfig, SearchConfig};
pub use duel::{Duel, DuelReport, PlayerReport, Winner};
pub use eval::{Evaluator, Features, HeightThresholds, Weights, WeightsError, FEATURE_COUNT};
pub use place::{apply_placement, basic_placements, candidate_placements, Input, PlaceError, Placement, Turn};
pub use tree::{combine_scores, select_top_n, Agent, Decision, Node};
