//! Heuristic evaluation of a locked position
//!
//! Twelve features are measured on the board left behind by a lock and combined
//! linearly with a weight vector. Weights carry their own sign, so a penalty is simply
//! a negative weight.
//!
//! | # | Feature |
//! |---|---------|
//! | 0 | surface roughness, well column excluded |
//! | 1 | holes |
//! | 2 | maximum column height |
//! | 3 | height above the lower threshold |
//! | 4 | height above the upper threshold |
//! | 5 | well depth |
//! | 6 | attack of the lock |
//! | 7 | combo after the lock |
//! | 8 | 1-2 line clear without spin |
//! | 9 | 3-4 line clear without spin |
//! | 10 | spin clear |
//! | 11 | all clear |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tetro_duel_core::{GameState, LockOutcome};
use tetro_duel_types::{ClearKind, BOARD_WIDTH};
use thiserror::Error;

pub const FEATURE_COUNT: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("expected 12 weights, got {0}")]
    Length(usize),
    #[error("weight {index} is not a number: {value:?}")]
    Parse { index: usize, value: String },
    #[error("weight {0} is not finite")]
    NotFinite(usize),
}

/// Signed weight per feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights(pub [f64; FEATURE_COUNT]);

impl Weights {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, WeightsError> {
        if let Some(index) = values.iter().position(|w| !w.is_finite()) {
            return Err(WeightsError::NotFinite(index));
        }
        Ok(Self(values))
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, WeightsError> {
        let array: [f64; FEATURE_COUNT] = values
            .try_into()
            .map_err(|_| WeightsError::Length(values.len()))?;
        Self::new(array)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Weighted sum of a feature vector
    pub fn score(&self, features: &Features) -> f64 {
        features
            .terms()
            .iter()
            .zip(self.0.iter())
            .map(|(term, weight)| term * weight)
            .sum()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self([
            -0.35, // roughness
            -2.0,  // holes
            -0.2,  // max height
            -0.6,  // above lower threshold
            -1.5,  // above upper threshold
            0.25,  // well depth
            1.2,   // attack
            0.4,   // combo
            -0.9,  // small clear
            0.8,   // big clear
            1.5,   // spin clear
            4.0,   // all clear
        ])
    }
}

/// Parses comma-separated values, e.g. `"-0.3,-2,..."`
impl FromStr for Weights {
    type Err = WeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .enumerate()
            .map(|(index, part)| {
                part.trim().parse::<f64>().map_err(|_| WeightsError::Parse {
                    index,
                    value: part.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(&values)
    }
}

/// Height thresholds beyond which stacking is penalised
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightThresholds {
    pub lower: usize,
    pub upper: usize,
}

impl Default for HeightThresholds {
    fn default() -> Self {
        Self {
            lower: 10,
            upper: 15,
        }
    }
}

/// Measured features of one locked position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub roughness: u32,
    pub holes: u32,
    pub max_height: u32,
    pub above_lower: u32,
    pub above_upper: u32,
    pub well_depth: u32,
    pub attack: u32,
    pub combo: i32,
    pub small_clear: bool,
    pub big_clear: bool,
    pub spin_clear: bool,
    pub all_clear: bool,
}

impl Features {
    /// Measure `state` right after `outcome` was produced by a lock.
    /// The freshly spawned active piece is ignored.
    pub fn measure(state: &GameState, outcome: &LockOutcome, thresholds: HeightThresholds) -> Self {
        let active = state.active_cells();
        let ignore: &[(usize, usize)] = match &active {
            Some(cells) => cells,
            None => &[],
        };
        let heights = state.board().column_heights(ignore);

        let mut holes = 0u32;
        for (col, &height) in heights.iter().enumerate() {
            for row in 0..height {
                if state.board().is_empty(row, col) {
                    holes += 1;
                }
            }
        }

        let (well_col, well_depth) = find_well(&heights);
        let max_height = heights.iter().copied().max().unwrap_or(0);
        let clear = outcome.clear;

        Self {
            roughness: roughness(&heights, well_col),
            holes,
            max_height: max_height as u32,
            above_lower: max_height.saturating_sub(thresholds.lower) as u32,
            above_upper: max_height.saturating_sub(thresholds.upper) as u32,
            well_depth: well_depth as u32,
            attack: outcome.attack,
            combo: state.combo(),
            small_clear: matches!(clear, Some(ClearKind::Single | ClearKind::Double)),
            big_clear: matches!(clear, Some(ClearKind::Triple | ClearKind::Quad)),
            spin_clear: clear.is_some_and(|kind| kind.is_spin()),
            all_clear: clear == Some(ClearKind::AllClear),
        }
    }

    pub fn terms(&self) -> [f64; FEATURE_COUNT] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [
            self.roughness as f64,
            self.holes as f64,
            self.max_height as f64,
            self.above_lower as f64,
            self.above_upper as f64,
            self.well_depth as f64,
            self.attack as f64,
            self.combo as f64,
            flag(self.small_clear),
            flag(self.big_clear),
            flag(self.spin_clear),
            flag(self.all_clear),
        ]
    }
}

/// Lowest column and how far it sits below its lower neighbour.
///
/// Ties go to the rightmost column. Edge columns compare against their single
/// neighbour.
pub fn find_well(heights: &[usize; BOARD_WIDTH]) -> (usize, usize) {
    let mut well = 0;
    for (col, &height) in heights.iter().enumerate() {
        if height <= heights[well] {
            well = col;
        }
    }

    let left = well.checked_sub(1).map(|c| heights[c]);
    let right = heights.get(well + 1).copied();
    let neighbour = match (left, right) {
        (Some(l), Some(r)) => l.min(r),
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (None, None) => heights[well],
    };
    (well, neighbour.saturating_sub(heights[well]))
}

/// Sum of absolute height differences between adjacent columns, with the well column
/// taken out of the height list first.
pub fn roughness(heights: &[usize; BOARD_WIDTH], well_col: usize) -> u32 {
    let surface: Vec<usize> = heights
        .iter()
        .enumerate()
        .filter(|&(col, _)| col != well_col)
        .map(|(_, &h)| h)
        .collect();
    surface
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]) as u32)
        .sum()
}

/// Scores locked positions with a weight vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluator {
    pub weights: Weights,
    pub thresholds: HeightThresholds,
}

impl Evaluator {
    pub fn new(weights: Weights, thresholds: HeightThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn evaluate(&self, state: &GameState, outcome: &LockOutcome) -> f64 {
        let features = Features::measure(state, outcome, self.thresholds);
        self.weights.score(&features)
    }
}
