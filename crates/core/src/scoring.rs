//! Scoring module - attack computation for versus play
//!
//! A clear sends `ATTACK_TABLE[kind]` lines, plus `B2B_BONUS` when it continues a
//! back-to-back chain, plus `COMBO_TABLE[min(combo, 12)]`. An all clear replaces the
//! whole sum with the all-clear value. Outgoing attack first cancels pending garbage.

use std::collections::VecDeque;

use crate::types::{ClearKind, SpinKind, ATTACK_TABLE, B2B_BONUS, COMBO_TABLE};

/// Attack calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Lines sent before cancellation
    pub attack: u32,
    pub clear: ClearKind,
    /// Back-to-back flag after this clear
    pub back_to_back: bool,
    /// Whether the back-to-back bonus was added
    pub b2b_applied: bool,
    pub combo_bonus: u32,
}

/// Check if this clear continues (or starts) a back-to-back chain.
/// Quads and every spin clear qualify, mini spins included.
pub fn qualifies_for_b2b(spin: SpinKind, lines: usize) -> bool {
    lines >= 4 || spin != SpinKind::None
}

/// Combo bonus for the combo counter *after* it was incremented
pub fn combo_bonus(combo: i32) -> u32 {
    if combo < 0 {
        return 0;
    }
    COMBO_TABLE[(combo as usize).min(COMBO_TABLE.len() - 1)]
}

/// Calculate the attack of a line clear.
///
/// `lines` must be at least 1, `combo` is the already incremented counter and
/// `all_clear` tells whether the board was empty after removing the rows.
pub fn calculate_attack(
    lines: usize,
    spin: SpinKind,
    combo: i32,
    previous_b2b: bool,
    all_clear: bool,
) -> AttackResult {
    let kind = ClearKind::classify(lines, spin);
    let qualifies = qualifies_for_b2b(spin, lines);

    // A lone mini single keeps the chain alive but earns nothing extra
    let b2b_applied = previous_b2b && qualifies && kind != ClearKind::MiniSpin;
    let back_to_back = qualifies;

    let bonus = combo_bonus(combo);
    let mut attack = kind.base_attack() + bonus;
    if b2b_applied {
        attack += B2B_BONUS;
    }

    if all_clear {
        return AttackResult {
            attack: ATTACK_TABLE[ClearKind::AllClear.index()],
            clear: ClearKind::AllClear,
            back_to_back,
            b2b_applied,
            combo_bonus: bonus,
        };
    }

    AttackResult {
        attack,
        clear: kind,
        back_to_back,
        b2b_applied,
        combo_bonus: bonus,
    }
}

/// Cancel outgoing attack against pending garbage, oldest entry first.
///
/// Fully covered entries are removed, a partially covered entry stays at the front
/// with its remaining size. Returns the attack left over to send.
pub fn cancel_garbage(attack: u32, pending: &mut VecDeque<u32>) -> u32 {
    let mut attack = attack;
    while attack > 0 {
        let Some(front) = pending.front_mut() else {
            break;
        };
        if *front <= attack {
            attack -= *front;
            pending.pop_front();
        } else {
            *front -= attack;
            attack = 0;
        }
    }
    attack
}
