//! Q-learning selection and learning properties.

use std::collections::HashMap;

use xo_engine::{
    Board, Player,
    q_learning::{QLearningAgent, QTable},
    types::LEARNING_RATE,
};

fn board(s: &str) -> Board {
    Board::from_state_string(s).unwrap()
}

#[test]
fn test_greedy_picks_best_free_cell() {
    let b = board("X___O____");
    let mut table = QTable::new(9);
    // The occupied cell's value must be ignored.
    table.set(&b.to_state_string(), 0, 0.9);
    table.set(&b.to_state_string(), 3, 0.5);
    table.set(&b.to_state_string(), 5, 0.7);

    let mut agent = QLearningAgent::new(Player::O, 3).with_seed(5);
    for _ in 0..20 {
        assert_eq!(agent.select_action(&b, &table, 0.0), Some(5));
    }
}

#[test]
fn test_full_exploration_is_uniform_over_free_cells() {
    let b = board("X___O____");
    let free = b.available_positions();
    let mut table = QTable::new(9);
    table.set(&b.to_state_string(), 8, 1.0);

    let mut agent = QLearningAgent::new(Player::O, 3).with_seed(2024);
    let draws = 7000;
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for _ in 0..draws {
        let mv = agent.select_action(&b, &table, 1.0).unwrap();
        *counts.entry(mv).or_default() += 1;
    }

    assert_eq!(counts.len(), free.len());
    let expected = draws / free.len();
    for pos in free {
        let count = counts[&pos];
        assert!(
            count.abs_diff(expected) < 200,
            "cell {pos} drawn {count} times, expected about {expected}"
        );
    }
}

#[test]
fn test_three_board_history_updates_one_entry() {
    // X plays 8, then O completes the middle row.
    let history = vec![board("XX_OO____"), board("XX_OO___X"), board("XX_OOO__X")];
    let agent = QLearningAgent::new(Player::O, 3);
    let mut table = QTable::new(9);

    assert_eq!(agent.update_memory(&history, &mut table), 1);

    let changed: Vec<(&String, usize, f64)> = table
        .iter()
        .flat_map(|(state, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0.0)
                .map(move |(action, v)| (state, action, *v))
        })
        .collect();
    assert_eq!(changed.len(), 1);
    let (state, action, value) = changed[0];
    assert_eq!(state, "XX_OO___X");
    assert_eq!(action, 5);
    assert!(value > 0.0 && value <= LEARNING_RATE);
}

#[test]
fn test_short_histories_are_ignored() {
    let agent = QLearningAgent::new(Player::O, 3);
    let mut table = QTable::new(9);
    assert_eq!(agent.update_memory(&[], &mut table), 0);
    assert_eq!(
        agent.update_memory(&[board("_________"), board("X________")], &mut table),
        0
    );
    assert!(table.is_empty());
}

#[test]
fn test_repeated_wins_raise_the_winning_move() {
    let history = vec![board("XX_OO____"), board("XX_OO___X"), board("XX_OOO__X")];
    let mut agent = QLearningAgent::new(Player::O, 3).with_seed(1);
    let mut table = QTable::new(9);
    for _ in 0..10 {
        agent.update_memory(&history, &mut table);
    }

    let value = table.get("XX_OO___X", 5);
    assert!(value > 0.99 && value <= 1.0);
    assert_eq!(agent.select_action(&history[1], &table, 0.0), Some(5));
}
