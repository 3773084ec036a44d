//! Tests for the game snapshot and its derived predicates.

mod common;

use checkers_client::{Message, MessageType, ViewMode};
use common::{finished_snapshot, play_snapshot, spectator_snapshot};

#[test]
fn test_snapshot_deserializes_from_page_payload() {
    let snapshot = play_snapshot("alice", "RED");
    assert_eq!(snapshot.game_id().as_deref(), Some("7"));
    assert_eq!(*snapshot.view_mode(), ViewMode::Play);
    assert_eq!(snapshot.red_player(), "alice");
    assert_eq!(snapshot.white_player(), "bob");
}

#[test]
fn test_my_turn_is_derived_from_colors() {
    assert!(play_snapshot("alice", "RED").is_my_turn());
    assert!(!play_snapshot("alice", "WHITE").is_my_turn());
    assert!(play_snapshot("bob", "WHITE").is_my_turn());
    assert!(!play_snapshot("bob", "RED").is_my_turn());
}

#[test]
fn test_player_color_predicates() {
    let snapshot = play_snapshot("alice", "RED");
    assert!(snapshot.is_player_red());
    assert!(!snapshot.is_player_white());
    assert!(snapshot.is_reds_turn());
    assert_eq!(snapshot.opponent_player(), "bob");
    assert_eq!(snapshot.active_player(), "alice");
}

#[test]
fn test_play_mode_validity() {
    assert!(play_snapshot("alice", "RED").is_valid_in_play_mode());
    assert!(play_snapshot("bob", "RED").is_valid_in_play_mode());
    // a spectator is not a player
    assert!(!spectator_snapshot().is_valid_in_play_mode());
}

#[test]
fn test_game_over_message_requires_a_finished_game() {
    let running = play_snapshot("alice", "RED");
    assert!(!running.is_game_over());
    assert!(running.game_over_message().is_err());

    let finished = finished_snapshot("alice has captured all of the pieces.");
    assert!(finished.is_game_over());
    assert_eq!(
        finished.game_over_message().unwrap(),
        "alice has captured all of the pieces."
    );
}

#[test]
fn test_game_over_message_falls_back_when_absent() {
    let snapshot: checkers_client::GameSnapshot = serde_json::from_value(serde_json::json!({
        "viewMode": "PLAY",
        "redPlayer": "alice",
        "whitePlayer": "bob",
        "currentUser": "alice",
        "activeColor": "RED",
        "modeOptions": { "isGameOver": true },
    }))
    .unwrap();
    assert!(snapshot.game_id().is_none());
    assert_eq!(snapshot.game_over_message().unwrap(), "Game over, man!");
}

#[test]
fn test_message_envelope_parses_both_types() {
    let info: Message = serde_json::from_str(r#"{"type":"INFO","text":"true"}"#).unwrap();
    assert!(info.is_info());
    assert_eq!(*info.message_type(), MessageType::Info);
    assert_eq!(info.text(), "true");

    let error: Message =
        serde_json::from_str(r#"{"type":"ERROR","text":"must complete jump"}"#).unwrap();
    assert!(error.is_error());
    assert_eq!(error, Message::error("must complete jump"));
}
