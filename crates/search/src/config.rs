//! Search and duel configuration
//!
//! Defaults can be overridden through the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TETRO_DEPTH` | [`SearchConfig::max_depth`] | 3 |
//! | `TETRO_BEAM` | [`SearchConfig::beam_width`] | 3 |
//! | `TETRO_QUEUE_LEN` | [`DuelConfig::queue_len`] | 2000 |
//! | `TETRO_SEED` | [`DuelConfig::seed`] | 1 |
//! | `TETRO_MAX_TURNS` | [`DuelConfig::max_turns`] | 1000 |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::Evaluator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search depth must be at least 2, got {0}")]
    Depth(usize),
    #[error("beam width must be at least 1")]
    BeamWidth,
    #[error("queue of {queue_len} pieces cannot cover {max_turns} turns")]
    QueueTooShort { queue_len: usize, max_turns: usize },
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Tree search parameters of one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth counter limit; the root has depth 1, so 2 searches one piece ahead
    pub max_depth: usize,
    /// Children kept per node after scoring
    pub beam_width: usize,
    pub evaluator: Evaluator,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            beam_width: 3,
            evaluator: Evaluator::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_depth: env_or("TETRO_DEPTH", default.max_depth),
            beam_width: env_or("TETRO_BEAM", default.beam_width),
            ..default
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth < 2 {
            return Err(ConfigError::Depth(self.max_depth));
        }
        if self.beam_width == 0 {
            return Err(ConfigError::BeamWidth);
        }
        Ok(())
    }
}

/// Parameters of one AI-vs-AI match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    pub queue_len: usize,
    /// Seeds the shared piece queue and both garbage generators
    pub seed: u32,
    pub max_turns: usize,
    pub first: SearchConfig,
    pub second: SearchConfig,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            queue_len: 2000,
            seed: 1,
            max_turns: 1000,
            first: SearchConfig::default(),
            second: SearchConfig::default(),
        }
    }
}

impl DuelConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        let search = SearchConfig::from_env();
        Self {
            queue_len: env_or("TETRO_QUEUE_LEN", default.queue_len),
            seed: env_or("TETRO_SEED", default.seed),
            max_turns: env_or("TETRO_MAX_TURNS", default.max_turns),
            first: search,
            second: search,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.first.validate()?;
        self.second.validate()?;
        // Every turn spawns one piece, a first hold spawns one more
        if self.queue_len < self.max_turns + 2 {
            return Err(ConfigError::QueueTooShort {
                queue_len: self.queue_len,
                max_turns: self.max_turns,
            });
        }
        Ok(())
    }
}
