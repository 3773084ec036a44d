//! Immutable snapshot of the server-supplied game metadata.
//!
//! Constructed once from the initial page payload and never mutated; a fresh
//! snapshot only arrives via a full page reload. "My turn" is always derived
//! from the assigned color against the active color, never cached, so the
//! view cannot drift from the authoritative state.

use derive_getters::Getters;
use serde::Deserialize;

use crate::error::InvariantError;

/// Fallback text when the game is over but the server supplied no message.
const DEFAULT_GAME_OVER_MESSAGE: &str = "Game over, man!";

/// Which view the snapshot was rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewMode {
    /// The viewer is one of the two players.
    Play,
    /// The viewer is watching someone else's game.
    Spectator,
    /// The viewer is stepping through a finished game.
    Replay,
}

/// Piece color, which also identifies the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    /// The red player moves first.
    Red,
    /// The white player.
    White,
}

/// Mode-specific options supplied alongside the snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOptions {
    /// Whether the game has ended (win or resignation).
    #[serde(default)]
    is_game_over: bool,
    /// The end-of-game message, when the game is over.
    #[serde(default)]
    game_over_message: Option<String>,
}

/// Read-only projection of the game state for one page load.
#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Unique ID of the game being viewed, when known.
    #[serde(rename = "gameID", default)]
    game_id: Option<String>,
    /// Which view this snapshot was rendered for.
    view_mode: ViewMode,
    /// Name of the red player.
    red_player: String,
    /// Name of the white player.
    white_player: String,
    /// Name of the player viewing the page (the session's user).
    current_user: String,
    /// Color whose turn is active.
    active_color: Color,
    /// Mode-specific options.
    #[serde(default)]
    mode_options: ModeOptions,
}

impl GameSnapshot {
    /// Overrides the game ID, for when the page URL carries one as a query
    /// parameter that takes precedence over the embedded payload.
    pub fn with_game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    /// Queries whether red is the active player.
    pub fn is_reds_turn(&self) -> bool {
        self.active_color == Color::Red
    }

    /// Queries whether the current user is the red player.
    pub fn is_player_red(&self) -> bool {
        self.red_player == self.current_user
    }

    /// Queries whether the current user is the white player.
    pub fn is_player_white(&self) -> bool {
        self.white_player == self.current_user
    }

    /// Queries whether it's the current user's turn.
    ///
    /// Derived, never cached: assigned color against active color.
    pub fn is_my_turn(&self) -> bool {
        (self.is_player_red() && self.is_reds_turn())
            || (self.is_player_white() && !self.is_reds_turn())
    }

    /// Queries whether this snapshot is valid for the Play mode: the current
    /// user must be one of the two players.
    pub fn is_valid_in_play_mode(&self) -> bool {
        self.is_player_red() || self.is_player_white()
    }

    /// Name of the player whose turn is active.
    pub fn active_player(&self) -> &str {
        if self.is_reds_turn() {
            &self.red_player
        } else {
            &self.white_player
        }
    }

    /// Name of the current user's opponent. Only meaningful in Play mode.
    pub fn opponent_player(&self) -> &str {
        if self.is_player_red() {
            &self.white_player
        } else {
            &self.red_player
        }
    }

    /// Queries whether the game is over; someone won or resigned.
    pub fn is_game_over(&self) -> bool {
        self.mode_options.is_game_over
    }

    /// Supplies the end-of-game message.
    ///
    /// Fails if the game is not over yet.
    pub fn game_over_message(&self) -> Result<&str, InvariantError> {
        if !self.is_game_over() {
            return Err(InvariantError::new("game isn't over yet"));
        }
        Ok(self
            .mode_options
            .game_over_message
            .as_deref()
            .unwrap_or(DEFAULT_GAME_OVER_MESSAGE))
    }
}
