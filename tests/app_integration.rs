//! Integration tests for the app container, engine and storage.

use xo_engine::{
    App, Board, Difficulty, DifficultyLevel, GameConfig, GameMode, Player,
    adapters::{InMemoryRepository, MsgPackRepository},
    ports::{QTableRepository, TableHandle},
    q_learning::QTable,
};

fn trained_table() -> QTable {
    let mut table = QTable::new(9);
    table.set("X________", 8, 1.0);
    table
}

#[test]
fn test_clear_then_request_behaves_as_untrained() {
    let repo = InMemoryRepository::new();
    let handle = TableHandle::for_mode(GameMode::Classic);
    repo.save(&handle, &trained_table()).unwrap();

    let app = App::for_testing()
        .with_repository(repo.clone())
        .with_default_seed(1)
        .build();
    let config = GameConfig::new(GameMode::Classic);
    let greedy = Difficulty::q_learning(0.0).unwrap();
    let board = Board::new(3).unwrap().simulate_move(0, Player::X);

    let mut engine = app.create_engine(&config);
    assert_eq!(engine.get_next_move(&board, &greedy), Some(8));

    engine.clear_memory().unwrap();
    assert_eq!(engine.get_next_move(&board, &greedy), Some(1));

    // A fresh engine after clearing through the app agrees.
    repo.save(&handle, &trained_table()).unwrap();
    app.clear_memory(GameMode::Classic).unwrap();
    let mut fresh = app.create_engine(&config);
    assert_eq!(fresh.get_next_move(&board, &greedy), Some(1));
}

#[test]
fn test_learning_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::new(GameMode::Classic).with_seed(4);

    {
        let app = App::new(dir.path());
        let mut session = app
            .start_session_with(config.clone(), Difficulty::q_learning(1.0).unwrap())
            .unwrap();
        while !session.state().is_finished() {
            let position = session.state().board().available_positions()[0];
            session.play(position).unwrap();
        }
    }

    let repo = MsgPackRepository::new(dir.path());
    let handle = TableHandle::for_mode(GameMode::Classic);
    assert!(repo.path_for(&handle).exists());
    let table = repo.load(&handle).unwrap().unwrap();
    assert!(!table.is_empty());

    let app = App::new(dir.path());
    app.clear_memory(GameMode::Classic).unwrap();
    assert!(!repo.path_for(&handle).exists());
    assert!(repo.load(&handle).unwrap().is_none());
}

#[test]
fn test_corrupt_table_falls_back_to_untrained() {
    let repo = InMemoryRepository::new();
    let handle = TableHandle::for_mode(GameMode::Classic);
    repo.insert_raw(&handle, vec![0xc1, 0xff, 0x00]);

    let app = App::for_testing().with_repository(repo).build();
    let mut engine = app.create_engine(&GameConfig::new(GameMode::Classic));
    let board = Board::new(3).unwrap().simulate_move(4, Player::X);
    let greedy = Difficulty::q_learning(0.0).unwrap();

    assert_eq!(engine.get_next_move(&board, &greedy), Some(0));
    assert!(engine.table().is_empty());
}

#[test]
fn test_large_table_is_not_used_for_classic() {
    let repo = InMemoryRepository::new();
    let handle = TableHandle::for_mode(GameMode::Classic);
    let mut wrong = QTable::new(81);
    wrong.set(&"_".repeat(81), 3, 1.0);
    repo.save(&handle, &wrong).unwrap();

    let app = App::for_testing().with_repository(repo).build();
    let engine = app.create_engine(&GameConfig::new(GameMode::Classic));
    assert!(engine.table().is_empty());
    assert_eq!(engine.table().cell_count(), 9);
}

#[test]
fn test_large_session_answers_with_search() {
    let app = App::for_testing().with_default_seed(8).build();
    let mut session = app
        .start_session(GameConfig::new(GameMode::Large), DifficultyLevel::Easy)
        .unwrap();

    let reply = session.play(40).unwrap().unwrap();
    assert_ne!(reply, 40);
    assert!(reply < 81);
    assert_eq!(session.state().board().occupied_count(), 2);
}
