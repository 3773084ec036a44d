//! Checkers client core — turn construction and server synchronization.
//!
//! The hard problem here is not rendering but coordinating asynchronous,
//! fallible round-trips with local optimistic state, so the view never
//! diverges from the server's authoritative game state — even under partial
//! failures such as an incomplete multi-jump.
//!
//! # Architecture
//!
//! - **Snapshot**: immutable, per-page-load view of the game metadata
//! - **Gateway**: single async call abstraction for validation and polling
//! - **Play**: the nine-state turn-construction state machine
//! - **Spectator**: the read-only two-state polling variant
//! - **Ui**: traits for the board, toolbar, and message collaborators
//!
//! # Example
//!
//! ```no_run
//! use checkers_client::{GameSnapshot, HttpGateway, PlayController};
//!
//! # async fn example(
//! #     board: Box<dyn checkers_client::BoardAdapter>,
//! #     controls: Box<dyn checkers_client::UiControls>,
//! #     view: Box<dyn checkers_client::GameView>,
//! # ) -> anyhow::Result<()> {
//! let snapshot: GameSnapshot = serde_json::from_str(r#"{
//!     "gameID": "4", "viewMode": "PLAY", "redPlayer": "alice",
//!     "whitePlayer": "bob", "currentUser": "alice", "activeColor": "RED"
//! }"#)?;
//! let gateway = HttpGateway::new("http://localhost:4567", snapshot.game_id().clone())?;
//! let mut controller =
//!     PlayController::new(snapshot, Box::new(gateway), board, controls, view);
//! let page_action = controller.start().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod gateway;
mod message;
mod page;
mod play;
mod snapshot;
mod spectator;
mod timer;
mod turn;
mod ui;

pub use board::{Move, NUM_COLS, NUM_ROWS, PieceId, Position};
pub use error::{ClientError, ConfigError, InvariantError, TransportError};
pub use gateway::{Action, Gateway, HttpGateway};
pub use message::{Message, MessageType};
pub use page::PageAction;
pub use play::{PlayController, PlayMessage, StateName};
pub use snapshot::{Color, GameSnapshot, ModeOptions, ViewMode};
pub use spectator::{SpectatorController, SpectatorStateName};
pub use timer::{CancelHandle, POLL_INTERVAL, PollTimer, poll_timer};
pub use turn::Turn;
pub use ui::{BoardAdapter, ButtonId, GameView, UiControls};
