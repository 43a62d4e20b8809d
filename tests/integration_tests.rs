//! Integration tests for the versus engine: clears, attack, garbage and hold

use tetro_duel::core::{ActionOutcome, Board, GameState, LockOutcome, PieceQueue};
use tetro_duel::types::{
    Cell, ClearKind, GameAction, LastAction, PieceKind, Rotation, SpinKind, BOARD_WIDTH,
};

fn game(letters: &str) -> GameState {
    GameState::new(PieceQueue::from_letters(letters).unwrap(), 1)
}

fn game_on(rows: &[&str], letters: &str) -> GameState {
    GameState::with_board(Board::from_rows(rows), PieceQueue::from_letters(letters).unwrap(), 1)
}

/// Four rows open in column 0, with one stray block above so the board never empties
fn fill_left_well(board: &mut Board) {
    for row in 0..4 {
        for col in 1..BOARD_WIDTH {
            board.set(row, col, Cell::Garbage);
        }
    }
    board.set(4, 5, Cell::Garbage);
}

/// Stand the active I piece up and drop it into column 0
fn drop_i_into_left_well(state: &mut GameState) -> LockOutcome {
    assert_eq!(state.active().kind, PieceKind::I);
    assert!(state.rotate_cw());
    for _ in 0..5 {
        assert!(state.move_left());
    }
    state.hard_drop()
}

fn garbage_in_row(state: &GameState, row: usize) -> Vec<usize> {
    (0..BOARD_WIDTH)
        .filter(|&col| state.board().get(row, col) == Some(Cell::Garbage))
        .collect()
}

#[test]
fn test_game_lifecycle() {
    let mut state = game("tiozjls");
    assert!(!state.game_over());
    assert_eq!(state.active().kind, PieceKind::T);
    assert_eq!(state.preview(1), Some(PieceKind::I));

    for _ in 0..7 {
        assert!(matches!(state.apply_action(GameAction::HardDrop), ActionOutcome::Locked(_)));
    }

    // The queue ran out
    assert!(state.game_over());
    assert_eq!(state.apply_action(GameAction::MoveLeft), ActionOutcome::Rejected);
}

#[test]
fn test_actions_by_name() {
    let mut state = game("tiozjls");
    let col = state.active().col;

    let action = GameAction::from_str("moveLeft").unwrap();
    assert_eq!(state.apply_action(action), ActionOutcome::Applied);
    assert_eq!(state.active().col, col - 1);
    assert_eq!(state.last_action(), LastAction::Move);

    assert_eq!(state.apply_action(GameAction::RotateCw), ActionOutcome::Applied);
    assert_eq!(state.last_action(), LastAction::Rotate);
}

#[test]
fn test_single_with_fresh_combo_sends_nothing() {
    let mut state = game_on(&["GGGGGGGG.."], "ot");
    for _ in 0..4 {
        assert!(state.move_right());
    }
    let outcome = state.hard_drop();

    assert_eq!(outcome.clear, Some(ClearKind::Single));
    assert_eq!(outcome.cleared_rows.as_slice(), &[0]);
    assert_eq!(outcome.attack, 0);
    assert_eq!(state.combo(), 0);
    assert!(!state.back_to_back());
    assert!(state.sent_garbage().is_empty());

    // A lock that clears nothing breaks the combo
    let outcome = state.hard_drop();
    assert_eq!(outcome.placement_type_index(), -1);
    assert_eq!(state.combo(), -1);
}

#[test]
fn test_all_clear_overrides_attack() {
    let mut state = game_on(&["GGGGGGGG..", "GGGGGGGG.."], "ot");
    for _ in 0..4 {
        assert!(state.move_right());
    }
    let outcome = state.hard_drop();

    assert_eq!(outcome.lines_cleared(), 2);
    assert_eq!(outcome.clear, Some(ClearKind::AllClear));
    assert_eq!(outcome.placement_type_index(), 8);
    assert_eq!(outcome.attack, 10);
    assert_eq!(state.sent_garbage(), &[10]);
}

#[test]
fn test_quad_starts_back_to_back_chain() {
    let mut board = Board::new();
    fill_left_well(&mut board);
    let mut state = GameState::with_board(board, PieceQueue::from_letters("iit").unwrap(), 1);

    let outcome = drop_i_into_left_well(&mut state);
    assert_eq!(outcome.clear, Some(ClearKind::Quad));
    assert_eq!(outcome.cleared_rows.as_slice(), &[0, 1, 2, 3]);
    assert_eq!(outcome.attack, 4);
    assert!(state.back_to_back());
    assert_eq!(state.take_sent_garbage(), vec![4]);

    // Second quad in a row: b2b bonus, combo 1 still earns nothing
    fill_left_well(state.board_mut());
    let outcome = drop_i_into_left_well(&mut state);
    assert_eq!(outcome.clear, Some(ClearKind::Quad));
    assert_eq!(outcome.attack, 5);
    assert_eq!(state.combo(), 1);
    assert_eq!(state.total_attack(), 9);
}

#[test]
fn test_attack_cancels_pending_garbage() {
    let mut board = Board::new();
    fill_left_well(&mut board);
    let mut state = GameState::with_board(board, PieceQueue::from_letters("iit").unwrap(), 1);
    drop_i_into_left_well(&mut state);
    state.take_sent_garbage();

    state.receive_garbage(2);
    state.receive_garbage(3);
    fill_left_well(state.board_mut());
    let outcome = drop_i_into_left_well(&mut state);

    assert_eq!(outcome.attack, 5);
    assert!(state.pending_garbage().is_empty());
    assert!(state.sent_garbage().is_empty());
}

#[test]
fn test_partial_cancel_keeps_remainder_queued() {
    let mut state = game_on(&["GGGGGGGG..", "GGGGGGGG.."], "ot");
    state.receive_garbage(3);
    state.receive_garbage(12);
    for _ in 0..4 {
        assert!(state.move_right());
    }
    let outcome = state.hard_drop();

    // All clear sends 10: the 3 is cancelled and 7 of the 12
    assert_eq!(outcome.attack, 10);
    assert_eq!(state.pending_garbage().iter().copied().collect::<Vec<_>>(), vec![5]);
    assert!(state.sent_garbage().is_empty());
}

#[test]
fn test_pending_garbage_lands_on_non_clearing_lock() {
    let mut state = game("ot");
    state.receive_garbage(2);
    state.receive_garbage(1);

    let outcome = state.hard_drop();
    assert_eq!(outcome.lines_cleared(), 0);
    assert!(state.pending_garbage().is_empty());

    // The newest entry ends up at the bottom; each entry shares one open column
    for row in 0..3 {
        assert_eq!(garbage_in_row(&state, row).len(), BOARD_WIDTH - 1, "row {row}");
    }
    assert_eq!(garbage_in_row(&state, 1), garbage_in_row(&state, 2));

    // The locked O was pushed up by three rows
    for (row, col) in [(3, 4), (3, 5), (4, 4), (4, 5)] {
        assert_eq!(state.board().get(row, col), Some(Cell::Piece(PieceKind::O)));
    }
}

#[test]
fn test_garbage_holes_are_seeded() {
    let play = |seed: u32| {
        let mut state = GameState::new(PieceQueue::from_letters("oooo").unwrap(), seed);
        for _ in 0..3 {
            state.receive_garbage(1);
            state.hard_drop();
        }
        state.board().clone()
    };
    assert_eq!(play(77), play(77));
}

#[test]
fn test_t_spin_double() {
    let mut state = game_on(&["...G......", "GGG...GGGG", "GGGG.GGGGG"], "to");

    assert!(state.rotate_cw());
    assert_eq!(state.soft_drop(), 18);
    assert_eq!((state.active().row, state.active().col), (1, 4));
    assert!(state.rotate_cw());
    assert_eq!(state.last_action(), LastAction::Rotate);
    // Rotated in place, no kick needed
    assert_eq!((state.active().row, state.active().col), (1, 4));

    let outcome = state.lock_piece();
    assert_eq!(outcome.spin, SpinKind::Full);
    assert_eq!(outcome.clear, Some(ClearKind::SpinDouble));
    assert_eq!(outcome.attack, 4);
    assert!(state.back_to_back());
    assert_eq!(state.board().get(0, 3), Some(Cell::Garbage));
}

#[test]
fn test_t_without_rotation_is_not_a_spin() {
    let mut state = game_on(&["GGG...GGGG", "GGGG.GGGGG"], "to");
    let outcome = state.hard_drop();
    assert_eq!(outcome.spin, SpinKind::None);
}

#[test]
fn test_three_corners_entered_by_a_slide_is_not_a_spin() {
    let mut state = game_on(&[".....G....", "..........", "GGGGGGGGG."], "to");

    assert!(state.move_left());
    assert_eq!(state.soft_drop(), 18);
    assert!(state.move_right());
    assert_eq!((state.active().row, state.active().col), (1, 4));
    assert_eq!(state.last_action(), LastAction::Move);

    let outcome = state.lock_piece();
    assert_eq!(outcome.spin, SpinKind::None);
    assert_eq!(outcome.clear, None);
}

#[test]
fn test_kicked_against_left_wall_is_mini() {
    let mut state = game_on(&[".GGGGGGGGG"], "to");

    for _ in 0..3 {
        assert!(state.move_left());
    }
    assert_eq!(state.soft_drop(), 18);
    assert_eq!((state.active().row, state.active().col), (1, 1));

    // The in-place East position is blocked at (0, 1); the kick shifts it onto the wall
    assert!(state.rotate_cw());
    assert_eq!(state.active().rotation, Rotation::East);
    assert_eq!((state.active().row, state.active().col), (1, 0));

    let outcome = state.lock_piece();
    assert_eq!(outcome.spin, SpinKind::Mini);
    assert_eq!(outcome.clear, Some(ClearKind::MiniSpin));
    assert_eq!(outcome.cleared_rows.as_slice(), &[0]);
    assert_eq!(outcome.attack, 0);
    assert!(state.back_to_back());
}

#[test]
fn test_spin_on_the_floor_is_mini() {
    let mut state = game_on(&["...G..G...", "GGGG...GGG"], "to");

    assert!(state.rotate_cw());
    assert_eq!(state.soft_drop(), 18);
    assert_eq!((state.active().row, state.active().col), (1, 4));

    assert!(state.rotate_ccw());
    assert_eq!(state.active().rotation, Rotation::North);
    assert_eq!((state.active().row, state.active().col), (0, 5));

    let outcome = state.lock_piece();
    assert_eq!(outcome.spin, SpinKind::Mini);
    assert_eq!(outcome.clear, Some(ClearKind::MiniSpin));
    assert_eq!(outcome.cleared_rows.as_slice(), &[0]);
}

#[test]
fn test_hold_once_per_piece() {
    let mut state = game("tiozjls");
    assert!(state.can_hold());
    assert_eq!(state.apply_action(GameAction::Hold), ActionOutcome::Applied);
    assert!(!state.can_hold());
    assert_eq!(state.apply_action(GameAction::Hold), ActionOutcome::Rejected);

    state.hard_drop();
    assert!(state.can_hold());
    assert_eq!(state.held(), Some(PieceKind::T));
}

#[test]
fn test_blocked_spawn_ends_game_without_committing() {
    let mut rows = vec![".........."; 40];
    rows[20] = "GGGGGGGGGG";
    let state = game_on(&rows, "tt");

    assert!(state.game_over());
    assert_eq!(state.board().filled_count(), BOARD_WIDTH);
    assert!(state.snapshot().active.is_none());
}

#[test]
fn test_clones_are_independent_timelines() {
    let mut live = game("tiozjls");
    let mut copy = live.clone();
    assert!(copy.queue().ptr_eq(live.queue()));

    copy.move_left();
    copy.hard_drop();

    assert_eq!(live.queue_position(), 0);
    assert_eq!(live.board().filled_count(), 4);
    assert!(!live.same_timeline(&copy));

    live.move_left();
    live.hard_drop();
    assert!(live.same_timeline(&copy));
}

#[test]
fn test_snapshot_serializes() {
    let mut state = game("tiozjls");
    state.hold();
    state.receive_garbage(3);
    let snapshot = state.snapshot();

    assert_eq!(snapshot.hold, Some(PieceKind::T));
    assert!(!snapshot.can_hold);
    assert_eq!(snapshot.pending_garbage, 3);
    assert_eq!(snapshot.next_queue[0], Some(PieceKind::O));
    assert!(snapshot.playable());

    let json = serde_json::to_value(snapshot).unwrap();
    assert_eq!(json["hold"], "t");
    assert_eq!(json["pending_garbage"], 3);
    assert_eq!(json["board"].as_array().unwrap().len(), 20);
}
