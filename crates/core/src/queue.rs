//! Piece queue - the shared, read-only piece sequence of one match
//!
//! The queue is written once and then shared by every engine clone through an `Arc`;
//! each engine keeps its own cursor into it.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::rng::SevenBag;
use crate::types::PieceKind;

/// Immutable piece sequence shared by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    pieces: Arc<[PieceKind]>,
}

/// A letter that is not one of the seven canonical piece letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid piece letter {letter:?} at position {position}")]
pub struct InvalidPieceLetter {
    pub position: usize,
    pub letter: char,
}

impl PieceQueue {
    pub fn new(pieces: impl Into<Arc<[PieceKind]>>) -> Self {
        Self {
            pieces: pieces.into(),
        }
    }

    /// Parse a queue from canonical letters, e.g. `"tiozjls"` (case-insensitive)
    pub fn from_letters(letters: &str) -> Result<Self, InvalidPieceLetter> {
        let pieces = letters
            .chars()
            .enumerate()
            .map(|(position, letter)| {
                PieceKind::from_char(letter).ok_or(InvalidPieceLetter { position, letter })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(pieces))
    }

    /// `len` pieces drawn from a seeded 7-bag generator
    pub fn seven_bag(seed: u32, len: usize) -> Self {
        Self::new(SevenBag::new(seed).take(len).collect::<Vec<_>>())
    }

    pub fn get(&self, index: usize) -> Option<PieceKind> {
        self.pieces.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces
    }

    /// Whether two queues share the same buffer
    pub fn ptr_eq(&self, other: &PieceQueue) -> bool {
        Arc::ptr_eq(&self.pieces, &other.pieces)
    }
}

impl fmt::Display for PieceQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in self.pieces.iter() {
            write!(f, "{}", kind.as_char())?;
        }
        Ok(())
    }
}
