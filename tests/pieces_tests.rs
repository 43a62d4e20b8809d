//! Pieces module tests - geometry, bounds and wall kicks

use tetro_duel::core::pieces::{bounding_box, get_shape, occupied_cells, try_rotate};
use tetro_duel::core::{Board, GameState, PieceQueue};
use tetro_duel::types::{Cell, LastAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn rotations() -> impl Iterator<Item = Rotation> {
    (0..4).filter_map(Rotation::from_index)
}

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, Rotation::North), [(0, -1), (0, 0), (0, 1), (0, 2)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::East), [(1, 0), (0, 0), (-1, 0), (-2, 0)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::South), [(0, -2), (0, -1), (0, 0), (0, 1)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::West), [(2, 0), (1, 0), (0, 0), (-1, 0)]);
}

#[test]
fn test_o_piece_same_in_every_orientation() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in rotations() {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_every_shape_has_four_distinct_minos() {
    for kind in PieceKind::ALL {
        for rotation in rotations() {
            let shape = get_shape(kind, rotation);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(shape[i], shape[j], "{kind:?} {rotation:?}");
                }
            }
        }
    }
}

// ============== Bounds Tests ==============

#[test]
fn test_occupied_cells_all_in_bounds_or_none() {
    for kind in PieceKind::ALL {
        for rotation in rotations() {
            for row in -3i8..(BOARD_HEIGHT as i8 + 3) {
                for col in -3i8..(BOARD_WIDTH as i8 + 3) {
                    let Some(cells) = occupied_cells(kind, rotation, row, col) else {
                        continue;
                    };
                    for (r, c) in cells {
                        assert!(r < BOARD_HEIGHT && c < BOARD_WIDTH, "{kind:?} {rotation:?} at ({row}, {col})");
                    }
                }
            }
        }
    }
}

#[test]
fn test_bounding_box_decides_validity() {
    // I north spans columns -1..=2 around the anchor
    assert_eq!(bounding_box(PieceKind::I, Rotation::North), (0, 0, -1, 2));
    assert!(occupied_cells(PieceKind::I, Rotation::North, 0, 0).is_none());
    assert!(occupied_cells(PieceKind::I, Rotation::North, 0, 1).is_some());
    assert!(occupied_cells(PieceKind::I, Rotation::North, 0, 7).is_some());
    assert!(occupied_cells(PieceKind::I, Rotation::North, 0, 8).is_none());

    // O anchors on its bottom-left mino
    assert!(occupied_cells(PieceKind::O, Rotation::North, 38, 8).is_some());
    assert!(occupied_cells(PieceKind::O, Rotation::North, 39, 8).is_none());
    assert!(occupied_cells(PieceKind::O, Rotation::North, 0, 9).is_none());

    // T south hangs one row below the anchor
    assert!(occupied_cells(PieceKind::T, Rotation::South, 0, 4).is_none());
    assert!(occupied_cells(PieceKind::T, Rotation::South, 1, 4).is_some());
}

// ============== Rotation Tests ==============

#[test]
fn test_rotation_uses_first_free_kick() {
    // Block the cells the first two candidates need
    let blocked = [(9usize, 4usize), (9, 3)];
    let rotated = try_rotate(PieceKind::T, Rotation::North, 10, 4, true, |r, c| {
        !blocked.contains(&(r, c))
    })
    .unwrap();

    assert_eq!(rotated.rotation, Rotation::East);
    assert_eq!(rotated.kick_index, 2);
    assert_eq!(rotated.kick, (1, -1));
    assert_eq!(rotated.cells, [(12, 3), (11, 3), (10, 3), (11, 4)]);
}

#[test]
fn test_rotation_fails_when_every_kick_is_blocked() {
    let rotated = try_rotate(PieceKind::T, Rotation::North, 10, 4, true, |_, _| false);
    assert!(rotated.is_none());
}

#[test]
fn test_rotation_cycles_back_to_north() {
    let mut rotation = Rotation::North;
    let (mut row, mut col) = (20i8, 4i8);
    for _ in 0..4 {
        let rotated = try_rotate(PieceKind::J, rotation, row, col, true, |_, _| true).unwrap();
        assert_eq!(rotated.kick_index, 0);
        rotation = rotated.rotation;
        row += rotated.kick.0;
        col += rotated.kick.1;
    }
    assert_eq!(rotation, Rotation::North);
    assert_eq!((row, col), (20, 4));
}

#[test]
fn test_o_piece_never_rotates() {
    for rotation in rotations() {
        assert!(try_rotate(PieceKind::O, rotation, 19, 4, true, |_, _| true).is_none());
        assert!(try_rotate(PieceKind::O, rotation, 19, 4, false, |_, _| true).is_none());
    }
}

// ============== Engine Movement Tests ==============

#[test]
fn test_left_then_right_restores_state() {
    for letter in ["i", "o", "t", "s", "z", "j", "l"] {
        let queue = PieceQueue::from_letters(&format!("{letter}t")).unwrap();
        let mut state = GameState::new(queue, 1);
        let before_board = state.board().clone();
        let before_piece = state.active();

        assert!(state.move_left(), "{letter} should move left from spawn");
        assert!(state.move_right());

        assert_eq!(state.board(), &before_board);
        assert_eq!(state.active(), before_piece);
    }
}

#[test]
fn test_moves_stop_at_walls() {
    let mut state = GameState::new(PieceQueue::from_letters("it").unwrap(), 1);
    let mut moves = 0;
    while state.move_left() {
        moves += 1;
    }
    // I north anchor can go down to column 1
    assert_eq!(moves, 3);
    assert_eq!(state.active().col, 1);
    assert_eq!(state.board().filled_count(), 4);
}

#[test]
fn test_failed_rotation_leaves_piece_untouched() {
    let mut state = GameState::new(PieceQueue::from_letters("ot").unwrap(), 1);
    let board = state.board().clone();
    assert!(!state.rotate_cw());
    assert_eq!(state.board(), &board);
    assert_eq!(state.active().rotation, Rotation::North);
}

#[test]
fn test_engine_rotation_falls_through_to_third_kick() {
    let mut board = Board::new();
    board.set(18, 3, Cell::Garbage);
    board.set(18, 4, Cell::Garbage);
    let mut state = GameState::with_board(board, PieceQueue::from_letters("tt").unwrap(), 1);
    assert_eq!((state.active().row, state.active().col), (19, 4));

    // East in place needs (18, 4), one left needs (18, 3)
    assert!(state.rotate_cw());
    let active = state.active();
    assert_eq!(active.rotation, Rotation::East);
    assert_eq!((active.row, active.col), (20, 3));
    assert_eq!(state.last_action(), LastAction::Rotate);

    let mut cells = state.active_cells().unwrap();
    cells.sort_unstable();
    assert_eq!(cells, [(19, 3), (20, 3), (20, 4), (21, 3)]);
    for (row, col) in cells {
        assert_eq!(state.board().get(row, col), Some(Cell::Piece(PieceKind::T)));
    }
    assert_eq!(state.board().get(19, 4), Some(Cell::Empty));
    assert_eq!(state.board().get(19, 5), Some(Cell::Empty));
    assert_eq!(state.board().filled_count(), 6);
}

#[test]
fn test_engine_rotation_kicks_up_off_the_floor() {
    let mut state = GameState::with_board(
        Board::from_rows(&["...G..G...", "GGGG...GGG"]),
        PieceQueue::from_letters("tt").unwrap(),
        1,
    );
    assert!(state.rotate_cw());
    state.soft_drop();

    // Both in-place and one-right are blocked; the third kick drops it a row
    assert!(state.rotate_ccw());
    assert_eq!(state.active().rotation, Rotation::North);
    assert_eq!((state.active().row, state.active().col), (0, 5));
    assert_eq!(state.board().get(1, 4), Some(Cell::Empty));
    assert_eq!(state.board().get(1, 5), Some(Cell::Piece(PieceKind::T)));
}
