//! Minimax move choice on both board sizes.

use xo_engine::{
    Board, Player,
    minimax::{MinimaxEngine, NullHeuristic},
};

fn large_board(marks: &[(usize, char)]) -> Board {
    let mut cells = vec!['_'; 81];
    for &(pos, mark) in marks {
        cells[pos] = mark;
    }
    Board::from_state_string(&cells.iter().collect::<String>()).unwrap()
}

fn large_engine() -> MinimaxEngine {
    MinimaxEngine::new(Player::O, Player::X, 9, 5)
}

#[test]
fn test_completes_open_four_on_large_board() {
    let b = large_board(&[
        (0, 'O'),
        (1, 'O'),
        (2, 'O'),
        (3, 'O'),
        (40, 'X'),
        (41, 'X'),
        (50, 'X'),
    ]);
    for depth in 1..=3 {
        assert_eq!(large_engine().best_move(&b, depth), Some(4), "depth {depth}");
    }
}

#[test]
fn test_blocks_four_on_large_board() {
    // X threatens 24; O already closed the other end at 19.
    let b = large_board(&[
        (20, 'X'),
        (21, 'X'),
        (22, 'X'),
        (23, 'X'),
        (19, 'O'),
        (60, 'O'),
        (70, 'O'),
    ]);
    assert_eq!(large_engine().best_move(&b, 2), Some(24));
}

#[test]
fn test_blocks_on_classic_board_at_depth_two_and_three() {
    let b = Board::from_state_string("XX__O____").unwrap();
    let engine = MinimaxEngine::new(Player::O, Player::X, 3, 3);
    assert_eq!(engine.best_move(&b, 2), Some(2));
    assert_eq!(engine.best_move(&b, 3), Some(2));

    let blind = MinimaxEngine::new(Player::O, Player::X, 3, 3).with_heuristic(Box::new(NullHeuristic));
    assert_eq!(blind.best_move(&b, 2), Some(2));
}

#[test]
fn test_empty_boards_open_in_the_center() {
    let classic = MinimaxEngine::new(Player::O, Player::X, 3, 3);
    assert_eq!(classic.best_move(&Board::new(3).unwrap(), 1), Some(4));
    assert_eq!(large_engine().best_move(&Board::new(9).unwrap(), 3), Some(40));
}

#[test]
fn test_only_free_cell_is_returned() {
    let b = Board::from_state_string("XOXXOOOX_").unwrap();
    let engine = MinimaxEngine::new(Player::O, Player::X, 3, 3);
    assert_eq!(engine.best_move(&b, 3), Some(8));
}
