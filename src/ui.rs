//! Collaborator contracts consumed by the core.
//!
//! Rendering, drag-and-drop, and button wiring live outside this crate; the
//! controllers talk to them exclusively through these traits. Visibility and
//! click-handler semantics belong to the adapter — the core only names which
//! button it means via [`ButtonId`].

use crate::board::{Move, PieceId, Position};
use crate::message::Message;

/// The mode-control buttons of the game toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Remove the last move from the current turn.
    Backup,
    /// Commit the current turn to the server.
    Submit,
    /// Resign from the game.
    Resign,
    /// Leave the game and go to the Home page.
    Exit,
}

impl ButtonId {
    /// DOM-style identifier for the button element.
    pub fn id(&self) -> &'static str {
        match self {
            ButtonId::Backup => "backupBtn",
            ButtonId::Submit => "submitBtn",
            ButtonId::Resign => "resignBtn",
            ButtonId::Exit => "exitBtn",
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ButtonId::Backup => "Backup",
            ButtonId::Submit => "Submit turn",
            ButtonId::Resign => "Resign",
            ButtonId::Exit => "Exit",
        }
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> &'static str {
        match self {
            ButtonId::Backup => "Remove the last move with your current turn.",
            ButtonId::Submit => "Commit your current turn to the server.",
            ButtonId::Resign => "Resign from the game.",
            ButtonId::Exit => "Click here to exit the game and go to the Home page.",
        }
    }

    /// Whether the adapter should create the button hidden.
    pub fn starts_hidden(&self) -> bool {
        matches!(self, ButtonId::Resign | ButtonId::Exit)
    }
}

/// Piece rendering and space styling on the board.
pub trait BoardAdapter: Send + Sync {
    /// The piece at `position`, if any.
    fn piece_at(&self, position: Position) -> Option<PieceId>;
    /// Relocates a piece along `mv`.
    fn move_piece(&mut self, piece: PieceId, mv: Move);
    /// Makes one piece draggable.
    fn enable_piece(&mut self, piece: PieceId);
    /// Makes one piece inert.
    fn disable_piece(&mut self, piece: PieceId);
    /// Makes all of the viewer's pieces draggable.
    fn enable_all_my_pieces(&mut self);
    /// Makes all of the viewer's pieces inert.
    fn disable_all_my_pieces(&mut self);
    /// Starts the pending-validation styling on a space.
    fn set_space_pending(&mut self, position: Position);
    /// Clears the pending-validation styling on a space.
    fn reset_space_pending(&mut self, position: Position);
    /// Marks a space as part of a validated move.
    fn set_space_validated(&mut self, position: Position);
    /// Clears the validated styling on a space.
    fn reset_space_validated(&mut self, position: Position);
}

/// Toolbar button management.
pub trait UiControls: Send + Sync {
    /// Registers a button; label, tooltip, and initial visibility come from
    /// the [`ButtonId`] metadata.
    fn add_button(&mut self, button: ButtonId);
    /// Enables a button for clicks.
    fn enable_button(&mut self, button: ButtonId);
    /// Disables a button.
    fn disable_button(&mut self, button: ButtonId);
    /// Makes a button visible.
    fn show_button(&mut self, button: ButtonId);
    /// Hides a button.
    fn hide_button(&mut self, button: ButtonId);
}

/// Message and helper-text area of the game view.
pub trait GameView: Send + Sync {
    /// Replaces the helper text (may contain markup).
    fn set_helper_text(&mut self, html: &str);
    /// Shows a server message to the player.
    fn display_message(&mut self, message: &Message);
    /// Relabels the red player's name indicator.
    fn set_red_players_name(&mut self, label: &str);
    /// Relabels the white player's name indicator.
    fn set_white_players_name(&mut self, label: &str);
}
