//! tetro-duel (workspace facade crate).
//!
//! Re-exports the engine, search agent and shared types so that binaries, tests and
//! benches can use `tetro_duel::{core, search, types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tetro_duel_core as core;
pub use tetro_duel_search as search;
pub use tetro_duel_types as types;
