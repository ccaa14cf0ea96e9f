//! Engine tests - whole games driven through the public API

use tetris_duel::core::{
    FixedSequence, GameEngine, PieceSource, PlacementOutcome, SimpleRng, TickOutcome,
};
use tetris_duel::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const SCRIPT: &[GameAction] = &[
    GameAction::Rotate,
    GameAction::MoveLeft,
    GameAction::HardDrop,
    GameAction::Hold,
    GameAction::MoveRight,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::Rotate,
    GameAction::Rotate,
    GameAction::HardDrop,
    GameAction::Hold,
    GameAction::HardDrop,
];

fn play_script<S: PieceSource>(engine: &mut GameEngine<S>) {
    for &action in SCRIPT {
        engine.apply_action(action);
    }
}

/// Hard drop until the stack tops out
fn play_to_game_over<S: PieceSource>(engine: &mut GameEngine<S>) -> usize {
    let mut drops = 0;
    while !engine.is_game_over() {
        engine.hard_drop();
        drops += 1;
        assert!(drops < 1000, "game never ended");
    }
    drops
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameEngine::new(777);
    let mut b = GameEngine::new(777);

    play_script(&mut a);
    play_script(&mut b);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_engines_are_independent() {
    let mut a = GameEngine::new(9);
    let b = GameEngine::new(9);
    let before = b.snapshot();

    play_script(&mut a);

    assert_eq!(b.snapshot(), before);
    assert_ne!(a.snapshot(), before);
}

#[test]
fn test_seeded_kinds_match_rng() {
    let mut rng = SimpleRng::new(31);
    let first = rng.next_kind();
    let second = rng.next_kind();

    let engine = GameEngine::new(31);
    assert_eq!(engine.current().kind, first);
    assert_eq!(engine.next_kind(), second);
}

#[test]
fn test_scripted_line_clear() {
    let mut engine =
        GameEngine::with_source(FixedSequence::new(vec![PieceKind::I, PieceKind::I, PieceKind::O]));

    // I into columns 0..4
    for _ in 0..3 {
        assert!(engine.move_left());
    }
    assert!(!engine.move_left());
    assert_eq!(engine.hard_drop(), PlacementOutcome::Cleared(0));

    // I into columns 4..8
    assert!(engine.move_right());
    assert_eq!(engine.hard_drop(), PlacementOutcome::Cleared(0));

    // O into columns 8..10 completes the floor
    assert_eq!(engine.current().kind, PieceKind::O);
    for _ in 0..4 {
        assert!(engine.move_right());
    }
    assert!(!engine.move_right());
    assert_eq!(engine.hard_drop(), PlacementOutcome::Cleared(1));

    assert_eq!(engine.score(), 38 + 38 + 36 + 40);
    assert_eq!(engine.lines_cleared(), 1);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.board().filled_count(), 2);
    assert_eq!(engine.board().get(8, 19), Some(Some(PieceKind::O)));
    assert_eq!(engine.board().get(9, 19), Some(Some(PieceKind::O)));
}

#[test]
fn test_hold_cycle() {
    let mut engine = GameEngine::with_source(FixedSequence::new(vec![
        PieceKind::T,
        PieceKind::O,
        PieceKind::S,
    ]));

    assert!(engine.hold());
    assert_eq!(engine.current().kind, PieceKind::O);
    assert_eq!(engine.held_kind(), Some(PieceKind::T));
    assert_eq!(engine.next_kind(), PieceKind::S);
    assert!(!engine.can_hold());
    assert!(!engine.hold());

    engine.hard_drop();
    assert!(engine.can_hold());
    assert_eq!(engine.current().kind, PieceKind::S);

    let next = engine.next_kind();
    assert!(engine.hold());
    assert_eq!(engine.current().kind, PieceKind::T);
    assert_eq!(engine.held_kind(), Some(PieceKind::S));
    assert_eq!(engine.next_kind(), next);
}

#[test]
fn test_game_over_is_final() {
    let mut engine = GameEngine::new(4242);
    play_to_game_over(&mut engine);

    let frozen = engine.snapshot();
    assert!(frozen.game_over);
    assert!(!frozen.playable());

    assert!(!engine.move_left());
    assert!(!engine.move_right());
    assert!(!engine.rotate());
    assert!(!engine.soft_drop());
    assert!(!engine.hold());
    assert!(!engine.spawn());
    assert_eq!(engine.hard_drop(), PlacementOutcome::GameOver);
    assert_eq!(engine.hard_drop().code(), -1);
    assert_eq!(engine.tick(), TickOutcome::GameOver);
    for action in [
        GameAction::MoveLeft,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
    ] {
        assert!(!engine.apply_action(action));
    }

    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn test_restart_after_game_over() {
    let mut engine = GameEngine::new(5);
    play_to_game_over(&mut engine);

    assert!(engine.apply_action(GameAction::Restart));
    assert!(!engine.is_game_over());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.board().filled_count(), 0);
    assert_eq!(engine.held_kind(), None);
}

#[test]
fn test_board_stays_ten_by_twenty() {
    for seed in [1, 2, 3, 100, 65535] {
        let mut engine = GameEngine::new(seed);
        play_to_game_over(&mut engine);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.board.len(), BOARD_HEIGHT as usize);
        for row in &snapshot.board {
            assert_eq!(row.len(), BOARD_WIDTH as usize);
            assert!(row.iter().all(|&c| c <= 1));
        }
    }
}

#[test]
fn test_ticks_eventually_place() {
    let mut engine = GameEngine::with_source(FixedSequence::repeat(PieceKind::O));

    let mut moved = 0;
    let placed = loop {
        match engine.tick() {
            TickOutcome::Moved => moved += 1,
            other => break other,
        }
    };

    // O spawns on row 0 and rests on rows 18..20
    assert_eq!(moved, 18);
    assert_eq!(placed, TickOutcome::Placed(0));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.board().filled_count(), 4);
}

#[test]
fn test_ghost_matches_hard_drop() {
    let mut engine = GameEngine::new(2718);
    for _ in 0..5 {
        let (gx, gy) = engine.ghost_position();
        let piece = engine.current();
        let expected: Vec<(i8, i8)> = piece
            .cells()
            .map(|(x, y)| (x + gx - piece.x, y + gy - piece.y))
            .collect();

        engine.hard_drop();
        if engine.is_game_over() {
            break;
        }
        for (x, y) in expected {
            assert!(engine.board().is_occupied(x, y) || engine.lines_cleared() > 0);
        }
    }
}

#[test]
fn test_drop_interval_follows_level() {
    let engine = GameEngine::new(1);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.drop_interval_ms(), 1000);
}
