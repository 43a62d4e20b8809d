//! AI-vs-AI match driver
//!
//! Both sides play the same piece queue. Each turn every side that is still alive lets
//! its agent commit one placement; then each side's outgoing garbage is appended to the
//! other side's pending queue. The engines never read each other's state.

use log::{debug, info};
use serde::Serialize;
use tetro_duel_core::{GameSnapshot, GameState, PieceQueue};

use crate::config::DuelConfig;
use crate::tree::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    First,
    Second,
    Draw,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub total_attack: u32,
    pub attack_per_piece: f64,
    pub pieces: usize,
    /// Turns on which the agent committed a placement
    pub moves: usize,
    pub topped_out: bool,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuelReport {
    pub winner: Winner,
    pub turns: usize,
    pub seed: u32,
    pub players: [PlayerReport; 2],
}

pub struct Duel {
    config: DuelConfig,
    games: [GameState; 2],
    agents: [Agent; 2],
    moves: [usize; 2],
    turns: usize,
}

impl Duel {
    pub fn new(config: DuelConfig) -> Self {
        let queue = PieceQueue::seven_bag(config.seed, config.queue_len);
        Self::with_queue(config, queue)
    }

    /// Start a duel over an explicit queue
    pub fn with_queue(config: DuelConfig, queue: PieceQueue) -> Self {
        let games = [
            GameState::new(queue.clone(), config.seed.wrapping_add(1)),
            GameState::new(queue, config.seed.wrapping_add(2)),
        ];
        Self {
            config,
            games,
            agents: [Agent::new(config.first), Agent::new(config.second)],
            moves: [0; 2],
            turns: 0,
        }
    }

    pub fn games(&self) -> &[GameState; 2] {
        &self.games
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Committed placements per side
    pub fn moves(&self) -> [usize; 2] {
        self.moves
    }

    pub fn is_finished(&self) -> bool {
        self.games.iter().any(GameState::game_over) || self.turns >= self.config.max_turns
    }

    /// Play one turn for both sides and exchange garbage.
    /// Returns `false` once the duel is finished.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let sides = self.games.iter_mut().zip(self.agents.iter_mut());
        for (side, (game, agent)) in sides.enumerate() {
            if game.game_over() {
                continue;
            }
            match agent.play_turn(game) {
                Some(_) => self.moves[side] += 1,
                None => debug!("turn {}: player {} committed no move", self.turns, side + 1),
            }
        }

        self.exchange_garbage();
        self.turns += 1;
        !self.is_finished()
    }

    /// Move each side's outgoing garbage into the other side's pending queue
    pub fn exchange_garbage(&mut self) {
        let [first, second] = &mut self.games;
        let to_second = first.take_sent_garbage();
        let to_first = second.take_sent_garbage();
        if !to_second.is_empty() || !to_first.is_empty() {
            debug!(
                "turn {}: first sends {:?}, second sends {:?}",
                self.turns, to_second, to_first
            );
        }
        for lines in to_second {
            second.receive_garbage(lines);
        }
        for lines in to_first {
            first.receive_garbage(lines);
        }
    }

    pub fn winner(&self) -> Winner {
        match (self.games[0].game_over(), self.games[1].game_over()) {
            (false, true) => Winner::First,
            (true, false) => Winner::Second,
            _ => Winner::Draw,
        }
    }

    pub fn report(&self) -> DuelReport {
        let player = |side: usize| PlayerReport {
            total_attack: self.games[side].total_attack(),
            attack_per_piece: self.games[side].attack_per_piece(),
            pieces: self.games[side].queue_position(),
            moves: self.moves[side],
            topped_out: self.games[side].game_over(),
            snapshot: self.games[side].snapshot(),
        };
        DuelReport {
            winner: self.winner(),
            turns: self.turns,
            seed: self.config.seed,
            players: [player(0), player(1)],
        }
    }

    /// Play to the end and report
    pub fn run(mut self) -> DuelReport {
        while self.step() {}
        let report = self.report();
        info!(
            "duel finished after {} turns: {:?} (attack {} vs {})",
            report.turns,
            report.winner,
            report.players[0].total_attack,
            report.players[1].total_attack
        );
        report
    }
}
