//! Seeded randomness: the 7-bag queue generator and garbage hole columns
//!
//! Both draw from the same 32-bit LCG, so a seed fully determines a match.

use crate::types::PieceKind;

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

/// 32-bit linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// A zero seed is replaced by 1
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform-ish value in `0..bound`; a zero bound yields 0
    pub fn next_range(&mut self, bound: u32) -> u32 {
        // Low bits of an LCG have short periods
        (self.next_u32() >> 16) % bound.max(1)
    }

    /// Fisher-Yates, walking down from the last slot
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut i = items.len();
        while i > 1 {
            let j = self.next_range(i as u32) as usize;
            i -= 1;
            items.swap(i, j);
        }
    }
}

/// Endless piece stream where every aligned group of seven is a permutation of all kinds
#[derive(Debug, Clone)]
pub struct SevenBag {
    rng: SimpleRng,
    current: [PieceKind; 7],
    drawn: usize,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            current: PieceKind::ALL,
            drawn: PieceKind::ALL.len(),
        }
    }

    /// A freshly shuffled bag
    pub fn next_bag(&mut self) -> [PieceKind; 7] {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        bag
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.drawn == self.current.len() {
            self.current = self.next_bag();
            self.drawn = 0;
        }
        let kind = self.current[self.drawn];
        self.drawn += 1;
        kind
    }
}

impl Iterator for SevenBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}
