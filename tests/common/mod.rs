//! Shared test doubles: a scripted gateway and recording collaborators.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use checkers_client::{
    Action, BoardAdapter, ButtonId, GameSnapshot, GameView, Gateway, Message, Move, PieceId,
    Position, TransportError, UiControls,
};

/// Initializes tracing once per test binary; safe to call from every test.
pub fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Record of every gateway call, in order.
pub type CallLog = Arc<Mutex<Vec<(Action, Option<serde_json::Value>)>>>;

/// Gateway that plays back a fixed script of responses.
///
/// When the script runs dry it yields a transport error, so a runaway
/// polling loop terminates the test instead of hanging it.
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Message, TransportError>>>,
    calls: CallLog,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<Message, TransportError>>) -> (Box<Self>, CallLog) {
        let calls: CallLog = Arc::default();
        let gateway = Box::new(Self {
            responses: Mutex::new(responses.into()),
            calls: calls.clone(),
        });
        (gateway, calls)
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn call(
        &self,
        action: Action,
        payload: Option<serde_json::Value>,
    ) -> Result<Message, TransportError> {
        self.calls.lock().unwrap().push((action, payload));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::UnexpectedStatus { status: 599 }))
    }
}

/// What the board adapter was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    MovePiece(PieceId, Move),
    EnablePiece(PieceId),
    DisablePiece(PieceId),
    EnableAll,
    DisableAll,
    SetPending(Position),
    ResetPending(Position),
    SetValidated(Position),
    ResetValidated(Position),
}

pub type BoardLog = Arc<Mutex<Vec<BoardEvent>>>;

/// Board double that tracks piece locations and records every call.
pub struct RecordingBoard {
    pieces: HashMap<Position, PieceId>,
    events: BoardLog,
}

impl RecordingBoard {
    /// Creates a board with one piece per given position.
    pub fn new(positions: &[Position]) -> (Box<Self>, BoardLog) {
        let pieces = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| (*pos, PieceId::new(i as u32)))
            .collect();
        let events: BoardLog = Arc::default();
        let board = Box::new(Self {
            pieces,
            events: events.clone(),
        });
        (board, events)
    }
}

impl BoardAdapter for RecordingBoard {
    fn piece_at(&self, position: Position) -> Option<PieceId> {
        self.pieces.get(&position).copied()
    }

    fn move_piece(&mut self, piece: PieceId, mv: Move) {
        let from = self
            .pieces
            .iter()
            .find(|(_, p)| **p == piece)
            .map(|(pos, _)| *pos);
        if let Some(pos) = from {
            self.pieces.remove(&pos);
            self.pieces.insert(*mv.end(), piece);
        }
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::MovePiece(piece, mv));
    }

    fn enable_piece(&mut self, piece: PieceId) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::EnablePiece(piece));
    }

    fn disable_piece(&mut self, piece: PieceId) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::DisablePiece(piece));
    }

    fn enable_all_my_pieces(&mut self) {
        self.events.lock().unwrap().push(BoardEvent::EnableAll);
    }

    fn disable_all_my_pieces(&mut self) {
        self.events.lock().unwrap().push(BoardEvent::DisableAll);
    }

    fn set_space_pending(&mut self, position: Position) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::SetPending(position));
    }

    fn reset_space_pending(&mut self, position: Position) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::ResetPending(position));
    }

    fn set_space_validated(&mut self, position: Position) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::SetValidated(position));
    }

    fn reset_space_validated(&mut self, position: Position) {
        self.events
            .lock()
            .unwrap()
            .push(BoardEvent::ResetValidated(position));
    }
}

/// What the toolbar was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Add(ButtonId),
    Enable(ButtonId),
    Disable(ButtonId),
    Show(ButtonId),
    Hide(ButtonId),
}

pub type ControlLog = Arc<Mutex<Vec<ControlEvent>>>;

/// Toolbar double that records every call.
pub struct RecordingControls {
    events: ControlLog,
}

impl RecordingControls {
    pub fn new() -> (Box<Self>, ControlLog) {
        let events: ControlLog = Arc::default();
        let controls = Box::new(Self {
            events: events.clone(),
        });
        (controls, events)
    }
}

impl UiControls for RecordingControls {
    fn add_button(&mut self, button: ButtonId) {
        self.events.lock().unwrap().push(ControlEvent::Add(button));
    }

    fn enable_button(&mut self, button: ButtonId) {
        self.events
            .lock()
            .unwrap()
            .push(ControlEvent::Enable(button));
    }

    fn disable_button(&mut self, button: ButtonId) {
        self.events
            .lock()
            .unwrap()
            .push(ControlEvent::Disable(button));
    }

    fn show_button(&mut self, button: ButtonId) {
        self.events.lock().unwrap().push(ControlEvent::Show(button));
    }

    fn hide_button(&mut self, button: ButtonId) {
        self.events.lock().unwrap().push(ControlEvent::Hide(button));
    }
}

/// What the game view was asked to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    HelperText(String),
    Message(Message),
    RedName(String),
    WhiteName(String),
}

pub type ViewLog = Arc<Mutex<Vec<ViewEvent>>>;

/// View double that records every call.
pub struct RecordingView {
    events: ViewLog,
}

impl RecordingView {
    pub fn new() -> (Box<Self>, ViewLog) {
        let events: ViewLog = Arc::default();
        let view = Box::new(Self {
            events: events.clone(),
        });
        (view, events)
    }
}

impl GameView for RecordingView {
    fn set_helper_text(&mut self, html: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::HelperText(html.to_string()));
    }

    fn display_message(&mut self, message: &Message) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Message(message.clone()));
    }

    fn set_red_players_name(&mut self, label: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::RedName(label.to_string()));
    }

    fn set_white_players_name(&mut self, label: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::WhiteName(label.to_string()));
    }
}

/// Play-mode snapshot with `alice` (red) vs `bob` (white), viewed by `viewer`.
pub fn play_snapshot(viewer: &str, active_color: &str) -> GameSnapshot {
    serde_json::from_value(json!({
        "gameID": "7",
        "viewMode": "PLAY",
        "redPlayer": "alice",
        "whitePlayer": "bob",
        "currentUser": viewer,
        "activeColor": active_color,
    }))
    .expect("snapshot payload deserializes")
}

/// Play-mode snapshot for a game that has already ended.
pub fn finished_snapshot(message: &str) -> GameSnapshot {
    serde_json::from_value(json!({
        "gameID": "7",
        "viewMode": "PLAY",
        "redPlayer": "alice",
        "whitePlayer": "bob",
        "currentUser": "alice",
        "activeColor": "RED",
        "modeOptions": { "isGameOver": true, "gameOverMessage": message },
    }))
    .expect("snapshot payload deserializes")
}

/// Spectator-mode snapshot viewed by a non-player.
pub fn spectator_snapshot() -> GameSnapshot {
    serde_json::from_value(json!({
        "gameID": "7",
        "viewMode": "SPECTATOR",
        "redPlayer": "alice",
        "whitePlayer": "bob",
        "currentUser": "carol",
        "activeColor": "WHITE",
    }))
    .expect("snapshot payload deserializes")
}
