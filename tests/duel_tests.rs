//! Duel tests - two engines mirrored through one relay room

use tokio::sync::mpsc;

use tetris_duel::core::{GameEngine, GameSnapshot};
use tetris_duel::relay::{
    parse_server_message, ClientMessage, RelayConfig, RoomRegistry, ServerMessage,
};

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut out = Vec::new();
    while let Ok(line) = rx.try_recv() {
        out.push(parse_server_message(&line).unwrap());
    }
    out
}

#[tokio::test]
async fn test_full_duel() {
    let mut registry = RoomRegistry::new(RelayConfig::default());
    let room_id = registry.create_room();

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    let a = registry.join(&room_id, tx_a).unwrap();
    let b = registry.join(&room_id, tx_b).unwrap();
    drain(&mut rx_a);
    drain(&mut rx_b);

    let mut game_a = GameEngine::new(10);
    let mut game_b = GameEngine::new(20);

    // Each player publishes after every drop until A tops out
    while !game_a.is_game_over() {
        game_a.hard_drop();
        let text = ClientMessage::game_state(&game_a.snapshot())
            .unwrap()
            .to_json()
            .unwrap();
        registry.handle_text(&room_id, &a, &text).unwrap();

        if !game_b.is_game_over() {
            game_b.hard_drop();
            let text = ClientMessage::game_state(&game_b.snapshot())
                .unwrap()
                .to_json()
                .unwrap();
            registry.handle_text(&room_id, &b, &text).unwrap();
        }
    }

    let over = ClientMessage::game_over(game_a.score()).to_json().unwrap();
    registry.handle_text(&room_id, &a, &over).unwrap();

    // B saw every one of A's states, the last one being the final board
    let seen_by_b = drain(&mut rx_b);
    let states: Vec<GameSnapshot> = seen_by_b
        .iter()
        .filter_map(|msg| match msg {
            ServerMessage::OpponentState { player_id, state } => {
                assert_eq!(player_id, &a);
                Some(serde_json::from_value(state.clone()).unwrap())
            }
            _ => None,
        })
        .collect();
    assert!(!states.is_empty());
    assert_eq!(states.last(), Some(&game_a.snapshot()));
    assert!(states.last().map_or(false, |s| s.game_over));

    match seen_by_b.last() {
        Some(ServerMessage::PlayerGameOver { player_id, score }) => {
            assert_eq!(player_id, &a);
            assert_eq!(*score, u64::from(game_a.score()));
        }
        other => panic!("unexpected last message: {:?}", other),
    }

    // A only ever hears about B, plus its own game over
    for msg in drain(&mut rx_a) {
        match msg {
            ServerMessage::OpponentState { player_id, .. } => assert_eq!(player_id, b),
            ServerMessage::PlayerGameOver { player_id, .. } => assert_eq!(player_id, a),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
