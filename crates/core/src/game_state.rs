//! Game state module - one deterministic versus timeline
//!
//! This module ties together the board, piece geometry, the shared queue and attack
//! scoring. The active piece is always committed to the board, so translation and
//! rotation treat the piece's own footprint as free space.
//!
//! Every transition is total: blocked moves report `false`, and once the game is over
//! all actions are rejected without touching state. Cloning a `GameState` yields an
//! independent timeline that shares only the immutable queue.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::{debug, warn};

use crate::pieces::{occupied_cells, try_rotate, PieceCells};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_attack, cancel_garbage};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::{Board, PieceQueue};

/// Active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    /// Board cells covered by this piece
    pub fn cells(&self) -> Option<PieceCells> {
        occupied_cells(self.kind, self.rotation, self.row, self.col)
    }
}

/// Result of locking a piece
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Attack produced by the clear, before cancellation against pending garbage
    pub attack: u32,
    /// Rows that were full at lock time, ascending
    pub cleared_rows: ArrayVec<usize, 7>,
    /// Clear category, `None` when nothing was cleared
    pub clear: Option<ClearKind>,
    pub spin: SpinKind,
}

impl LockOutcome {
    /// Placement-type index: 0-8 for a clear, -1 for no clear
    pub fn placement_type_index(&self) -> i32 {
        self.clear.map_or(-1, |kind| kind.index() as i32)
    }

    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Result of [`GameState::apply_action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Rejected,
    Locked(LockOutcome),
}

/// Complete state of one timeline
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    queue: PieceQueue,
    queue_position: usize,
    active: Tetromino,
    /// Set once the hold was used for the current piece
    hold_used: bool,
    held: Option<PieceKind>,
    prev_held: Option<PieceKind>,
    held_index: Option<usize>,
    /// -1 means no active combo
    combo: i32,
    back_to_back: bool,
    pending_garbage: VecDeque<u32>,
    sent_garbage: Vec<u32>,
    last_action: LastAction,
    total_attack: u32,
    game_over: bool,
    /// Picks the open column of incoming garbage
    rng: SimpleRng,
}

impl GameState {
    /// Create a new game over `queue` and spawn its first piece.
    /// `seed` drives garbage hole placement only.
    pub fn new(queue: PieceQueue, seed: u32) -> Self {
        let first = queue.get(0).unwrap_or(PieceKind::I);
        let mut state = Self {
            board: Board::new(),
            queue,
            queue_position: 0,
            active: Tetromino::new(first),
            hold_used: false,
            held: None,
            prev_held: None,
            held_index: None,
            combo: -1,
            back_to_back: false,
            pending_garbage: VecDeque::new(),
            sent_garbage: Vec::new(),
            last_action: LastAction::None,
            total_attack: 0,
            game_over: false,
            rng: SimpleRng::new(seed),
        };
        state.spawn_piece();
        state
    }

    /// Start a game from an existing board, e.g. a test position
    pub fn with_board(board: Board, queue: PieceQueue, seed: u32) -> Self {
        let mut state = Self::new(queue, seed);
        state.board = board;
        state.game_over = false;
        state.spawn_piece();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    /// Cells of the active piece, `None` after game over
    pub fn active_cells(&self) -> Option<PieceCells> {
        if self.game_over {
            return None;
        }
        self.active.cells()
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn queue_position(&self) -> usize {
        self.queue_position
    }

    /// The queue piece `n` spawns ahead of the cursor (`preview(0)` is the current one)
    pub fn preview(&self, n: usize) -> Option<PieceKind> {
        self.queue.get(self.queue_position + n)
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used && !self.game_over
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn pending_garbage(&self) -> &VecDeque<u32> {
        &self.pending_garbage
    }

    pub fn sent_garbage(&self) -> &[u32] {
        &self.sent_garbage
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    pub fn total_attack(&self) -> u32 {
        self.total_attack
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Attack sent per spawned piece
    pub fn attack_per_piece(&self) -> f64 {
        if self.queue_position == 0 {
            return 0.0;
        }
        self.total_attack as f64 / self.queue_position as f64
    }

    /// Queue incoming garbage; it lands at the next lock that clears nothing
    pub fn receive_garbage(&mut self, lines: u32) {
        if lines > 0 {
            self.pending_garbage.push_back(lines);
        }
    }

    /// Drain the outgoing garbage produced since the last call
    pub fn take_sent_garbage(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.sent_garbage)
    }

    /// Whether `other` is in the same observable state: same board, queue cursor,
    /// hold state, combo, back-to-back flag and pending garbage.
    pub fn same_timeline(&self, other: &GameState) -> bool {
        self.queue_position == other.queue_position
            && self.game_over == other.game_over
            && self.held == other.held
            && self.hold_used == other.hold_used
            && self.combo == other.combo
            && self.back_to_back == other.back_to_back
            && self.pending_garbage == other.pending_garbage
            && self.rng == other.rng
            && self.board == other.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = if self.game_over {
            None
        } else {
            Some(ActiveSnapshot::from(self.active))
        };
        out.hold = self.held;
        for (i, slot) in out.next_queue.iter_mut().enumerate() {
            *slot = self.preview(i + 1);
        }
        out.can_hold = self.can_hold();
        out.game_over = self.game_over;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.pending_garbage = self.pending_garbage.iter().sum();
        out.total_attack = self.total_attack;
        out.pieces = self.queue_position as u32;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        if self.game_over {
            return ActionOutcome::Rejected;
        }

        let applied = match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => return ActionOutcome::Locked(self.hard_drop()),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
        };

        if applied {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Rejected
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    /// Drop until the piece rests on something; does not lock
    pub fn soft_drop(&mut self) -> usize {
        let mut rows = 0;
        while self.move_down() {
            rows += 1;
        }
        rows
    }

    /// Soft drop, then lock
    pub fn hard_drop(&mut self) -> LockOutcome {
        self.soft_drop();
        self.lock_piece()
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Whether `cell` may be entered by the active piece
    fn is_free_for_active(&self, current: &PieceCells, cell: (usize, usize)) -> bool {
        self.board.is_empty(cell.0, cell.1) || current.contains(&cell)
    }

    /// Try to move the active piece by (rows, cols)
    pub fn try_move(&mut self, drow: i8, dcol: i8) -> bool {
        if self.game_over {
            return false;
        }
        let active = self.active;
        let Some(current) = active.cells() else {
            return false;
        };
        let Some(target) = occupied_cells(active.kind, active.rotation, active.row + drow, active.col + dcol)
        else {
            return false;
        };

        if !target.iter().all(|&cell| self.is_free_for_active(&current, cell)) {
            return false;
        }

        self.board.clear_cells(&current);
        self.board.set_cells(&target, Cell::Piece(active.kind));
        self.active = Tetromino {
            row: active.row + drow,
            col: active.col + dcol,
            ..active
        };
        self.last_action = LastAction::Move;
        true
    }

    /// Try to rotate the active piece with wall kicks
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }
        let active = self.active;
        let Some(current) = active.cells() else {
            return false;
        };

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.row,
            active.col,
            clockwise,
            |row, col| self.is_free_for_active(&current, (row, col)),
        );

        let Some(rotated) = result else {
            return false;
        };

        self.board.clear_cells(&current);
        self.board.set_cells(&rotated.cells, Cell::Piece(active.kind));
        self.active = Tetromino {
            rotation: rotated.rotation,
            row: active.row + rotated.kick.0,
            col: active.col + rotated.kick.1,
            ..active
        };
        self.last_action = LastAction::Rotate;
        true
    }

    /// Swap the active piece with the hold slot (once per spawn)
    pub fn hold(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }

        if let Some(cells) = self.active.cells() {
            self.board.clear_cells(&cells);
        }
        let current_kind = self.active.kind;

        match self.held {
            None => {
                // First hold: capture the piece and continue with the queue
                self.held = Some(current_kind);
                self.held_index = Some(self.queue_position);
                self.next_piece();
                self.hold_used = true;
            }
            Some(previous) => {
                // Swap: the held piece spawns, then the cursor rewinds onto the piece
                // that was just put away
                self.prev_held = Some(previous);
                self.hold_used = true;
                self.next_piece();
                self.queue_position -= 1;
                self.held = Some(current_kind);
                self.held_index = Some(self.queue_position);
            }
        }

        true
    }

    /// Piece to place at the current cursor, resolving the hold swap
    fn piece_to_place(&self) -> Option<PieceKind> {
        let swapped_in = self.hold_used
            && self
                .held_index
                .is_some_and(|index| index + 1 != self.queue_position);
        if swapped_in {
            self.prev_held
        } else {
            self.queue.get(self.queue_position)
        }
    }

    /// Advance the queue cursor and spawn
    fn next_piece(&mut self) {
        self.queue_position += 1;
        self.spawn_piece();
    }

    /// Spawn the piece at the cursor at the spawn anchor
    fn spawn_piece(&mut self) {
        let Some(kind) = self.piece_to_place() else {
            warn!("piece queue exhausted at position {}", self.queue_position);
            self.game_over = true;
            return;
        };

        let piece = Tetromino::new(kind);
        self.active = piece;
        self.last_action = LastAction::None;

        let Some(cells) = piece.cells() else {
            self.game_over = true;
            return;
        };

        if cells.iter().any(|&(row, col)| !self.board.is_empty(row, col)) {
            debug!("spawn blocked for {:?}, game over", kind);
            self.game_over = true;
            return;
        }

        self.board.set_cells(&cells, Cell::Piece(kind));
    }

    /// Lock the active piece where it is, clear lines, settle garbage and spawn the
    /// next piece.
    pub fn lock_piece(&mut self) -> LockOutcome {
        if self.game_over {
            return LockOutcome::default();
        }

        self.hold_used = false;
        let active = self.active;

        let spin = if active.kind == PieceKind::T {
            self.t_spin_kind(&active)
        } else {
            SpinKind::None
        };

        let mut cleared_rows: ArrayVec<usize, 7> = ArrayVec::new();
        let low = (active.row - CLEAR_SCAN_RADIUS).max(0) as usize;
        let high = ((active.row + CLEAR_SCAN_RADIUS) as usize).min(BOARD_HEIGHT - 1);
        for row in low..=high {
            if self.board.is_row_full(row) {
                cleared_rows.push(row);
            }
        }

        let mut outcome = LockOutcome {
            spin,
            ..LockOutcome::default()
        };

        if cleared_rows.is_empty() {
            self.combo = -1;
            self.accept_pending_garbage();
        } else {
            self.combo += 1;
            self.board.remove_rows(&cleared_rows);

            let result = calculate_attack(
                cleared_rows.len(),
                spin,
                self.combo,
                self.back_to_back,
                self.board.is_all_clear(),
            );
            self.back_to_back = result.back_to_back;

            let remaining = cancel_garbage(result.attack, &mut self.pending_garbage);
            if remaining > 0 {
                self.sent_garbage.push(remaining);
            }

            outcome.attack = result.attack;
            outcome.clear = Some(result.clear);
            outcome.cleared_rows = cleared_rows;
        }

        self.last_action = LastAction::Lock;
        self.next_piece();
        self.total_attack += outcome.attack;
        outcome
    }

    /// Insert every pending garbage entry, oldest first. The rows of one entry share a
    /// single random open column.
    fn accept_pending_garbage(&mut self) {
        while let Some(lines) = self.pending_garbage.pop_front() {
            let empty_col = self.rng.next_range(BOARD_WIDTH as u32) as usize;
            debug!("receiving {} garbage lines, open column {}", lines, empty_col);
            for _ in 0..lines {
                self.board.insert_garbage_row(empty_col);
            }
        }
    }

    /// Detect spin type based on diagonal corner occupancy.
    /// Out-of-bounds corners count as filled.
    fn t_spin_kind(&self, piece: &Tetromino) -> SpinKind {
        if self.last_action != LastAction::Rotate {
            return SpinKind::None;
        }

        let (row, col) = (piece.row, piece.col);
        let filled = |dr: i8, dc: i8| self.board.is_blocked(row + dr, col + dc);
        let by_count = |a: bool, b: bool| match (a, b) {
            (true, true) => SpinKind::Full,
            (false, false) => SpinKind::None,
            _ => SpinKind::Mini,
        };

        // Against a side wall only the two inward diagonals matter
        if col == 0 {
            return by_count(filled(-1, 1), filled(1, 1));
        }
        if col == BOARD_WIDTH as i8 - 1 {
            return by_count(filled(-1, -1), filled(1, -1));
        }
        if row == 0 {
            return if filled(1, 1) || filled(1, -1) {
                SpinKind::Mini
            } else {
                SpinKind::None
            };
        }

        // (top-right, top-left, bottom-right, bottom-left)
        let corners = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        let mut open = corners.iter().filter(|&&(dr, dc)| !filled(dr, dc));
        let first_open = open.next();
        if open.next().is_some() {
            return SpinKind::None;
        }

        let mini_corners: [(i8, i8); 2] = match piece.rotation {
            Rotation::North => [(1, 1), (1, -1)],
            Rotation::East => [(1, 1), (-1, 1)],
            Rotation::South => [(-1, -1), (-1, 1)],
            Rotation::West => [(-1, -1), (1, -1)],
        };

        match first_open {
            Some(corner) if mini_corners.contains(corner) => SpinKind::Mini,
            _ => SpinKind::Full,
        }
    }
}
