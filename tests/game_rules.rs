//! Board and turn rules exercised through the public API.

use xo_engine::{
    Board, Error, GameMode, GameResult, GameState, Player,
    game::all_lines,
};

fn board(s: &str) -> Board {
    Board::from_state_string(s).unwrap()
}

#[test]
fn test_top_row_is_a_win_for_x() {
    assert_eq!(
        board("XXX______").check_game_result(3),
        GameResult::Win {
            winner: Player::X,
            line: vec![0, 1, 2],
        }
    );
}

#[test]
fn test_check_game_result_is_pure() {
    let b = board("XO_XO_X__");
    let snapshot = b.clone();
    let first = b.check_game_result(3);
    let second = b.check_game_result(3);
    assert_eq!(first, second);
    assert_eq!(b, snapshot);
    assert_eq!(first.winner(), Some(Player::X));
}

#[test]
fn test_open_board_without_line_is_playing() {
    for s in ["_________", "XO_______", "XOX_O____", "XOXOXO___"] {
        let b = board(s);
        assert!(!b.is_full());
        assert_eq!(b.check_game_result(3), GameResult::Playing, "{s}");
    }
    assert_eq!(board("XOXXOOOXX").check_game_result(3), GameResult::Draw);
}

#[test]
fn test_simulated_move_changes_exactly_one_cell() {
    let before = board("X___O____");
    for pos in before.available_positions() {
        let after = before.simulate_move(pos, Player::Triangle);
        let diff: Vec<usize> = before
            .to_state_string()
            .chars()
            .zip(after.to_state_string().chars())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(diff, vec![pos]);
        assert_eq!(after.get(pos), Some(Player::Triangle.to_cell()));
    }
    assert_eq!(before.to_state_string(), "X___O____");
}

#[test]
#[should_panic(expected = "outside")]
fn test_simulating_off_the_board_panics() {
    let _ = Board::new(3).unwrap().simulate_move(9, Player::X);
}

#[test]
fn test_try_simulate_move_reports_range() {
    let b = Board::new(3).unwrap();
    assert!(matches!(
        b.try_simulate_move(12, Player::O),
        Err(Error::PositionOutOfRange { position: 12, cells: 9 })
    ));
}

#[test]
fn test_large_board_needs_five() {
    let mut cells = vec!['_'; 81];
    // Diagonal of four from the top-left corner.
    for pos in [0, 10, 20, 30] {
        cells[pos] = 'S';
    }
    let four: String = cells.iter().collect();
    assert_eq!(board(&four).check_game_result(5), GameResult::Playing);

    cells[40] = 'S';
    let five: String = cells.iter().collect();
    assert_eq!(
        board(&five).check_game_result(5),
        GameResult::Win {
            winner: Player::Square,
            line: vec![0, 10, 20, 30, 40],
        }
    );
}

#[test]
fn test_line_counts() {
    assert_eq!(all_lines(3, 3).len(), 8);
    // 5 starts per row/column, 25 starts per diagonal direction.
    assert_eq!(all_lines(9, 5).len(), 9 * 5 * 2 + 25 * 2);
}

#[test]
fn test_four_players_take_turns_until_a_win() {
    let mut game = GameState::for_mode(GameMode::Large, 4).unwrap();
    let order = [Player::X, Player::O, Player::Triangle, Player::Square];

    // Each player fills their own row; X reaches five first.
    for col in 0..5 {
        for (row, player) in order.iter().enumerate() {
            assert_eq!(game.current_player(), *player);
            let result = game.play(row * 9 + col, *player, 5).unwrap().clone();
            if result.is_finished() {
                assert_eq!(result.winner(), Some(Player::X));
                assert_eq!(game.history().len(), 4 * 4 + 2);
                return;
            }
        }
    }
    panic!("no winner");
}

#[test]
fn test_moves_after_the_end_are_rejected() {
    let mut game = GameState::for_mode(GameMode::Classic, 2).unwrap();
    for (pos, player) in [(0, Player::X), (3, Player::O), (1, Player::X), (4, Player::O), (2, Player::X)] {
        game.play(pos, player, 3).unwrap();
    }
    assert!(game.is_finished());
    let history = game.history().len();
    assert!(matches!(game.play(8, Player::O, 3), Err(Error::GameOver)));
    assert_eq!(game.history().len(), history);
}
