//! The closed set of Play-mode states.
//!
//! Each state exposes its name, an entry hook, and handlers for the messages
//! it cares about. States never touch the turn data directly; they go through
//! the [`TurnContext`] primitives, preserving a single-writer discipline.

use async_trait::async_trait;
use strum::{Display, EnumIter};
use tracing::debug;

use crate::error::{ClientError, InvariantError};
use crate::gateway::Action;
use crate::page::PageAction;
use crate::play::controller::TurnContext;
use crate::snapshot::GameSnapshot;
use crate::ui::ButtonId;

/// Symbolic names for the nine Play-mode states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum StateName {
    /// Initial state: validates the snapshot and routes to the first real state.
    #[strum(serialize = "Starting Play Mode")]
    StartingPlayMode,
    /// It's my turn and no move has been made yet.
    #[strum(serialize = "Empty Turn")]
    EmptyTurn,
    /// A move has been proposed and sent to the server for validation.
    #[strum(serialize = "Waiting for Move Validation")]
    WaitingForMoveValidation,
    /// At least one validated move is on the turn.
    #[strum(serialize = "Stable Turn")]
    StableTurn,
    /// The newest move is being undone.
    #[strum(serialize = "Waiting for Backup Validation")]
    WaitingForBackupValidation,
    /// The whole turn has been submitted to the server.
    #[strum(serialize = "Waiting for Turn Validation")]
    WaitingForTurnValidation,
    /// Not my turn; waiting out the poll interval.
    #[strum(serialize = "Waiting for My Turn")]
    WaitingToCheckMyTurn,
    /// Not my turn; asking the server whether that changed.
    #[strum(serialize = "Checking for My Turn on the Server")]
    CheckingMyTurn,
    /// Terminal state: the game has ended.
    #[strum(serialize = "Showing Game Over")]
    GameOver,
}

/// A named event routed through the controller to the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayMessage {
    /// The player proposed a move; could be a simple move or a jump.
    RequestMove(crate::board::Move),
    /// The player asked to undo the most recent move of the turn.
    BackupMove,
    /// The player submitted the turn.
    SubmitTurn,
}

/// Outcome of an entry hook or message handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Remain in the current state and wait for the next event.
    Stay,
    /// Enter another state.
    To(StateName),
    /// End the state machine with a page-level action.
    Page(PageAction),
}

/// Capability set shared by every Play-mode state.
#[async_trait]
pub(crate) trait ModeState {
    /// The symbolic name of this state.
    fn name(&self) -> StateName;

    /// Hook run when the state becomes current.
    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError>;

    /// Handler for a routed message. States that don't care about a message
    /// inherit this explicit, logged no-op.
    fn on_message(
        &self,
        message: &PlayMessage,
        _ctx: &mut TurnContext,
    ) -> Result<Transition, ClientError> {
        debug!(state = %self.name(), message = ?message, "message has no handler in this state; dropped");
        Ok(Transition::Stay)
    }
}

/// The registry's closed set of state instances, one variant per name.
#[derive(Debug)]
pub(crate) enum PlayState {
    Starting(StartingPlayModeState),
    Empty(EmptyTurnState),
    MoveValidation(WaitingForMoveValidationState),
    Stable(StableTurnState),
    BackupValidation(WaitingForBackupValidationState),
    TurnValidation(WaitingForTurnValidationState),
    WaitingToCheck(WaitingForMyTurnState),
    Checking(CheckingMyTurnState),
    Over(GameOverState),
}

impl PlayState {
    /// The instance registered under `name`.
    pub(crate) fn for_name(name: StateName) -> Self {
        match name {
            StateName::StartingPlayMode => PlayState::Starting(StartingPlayModeState),
            StateName::EmptyTurn => PlayState::Empty(EmptyTurnState),
            StateName::WaitingForMoveValidation => {
                PlayState::MoveValidation(WaitingForMoveValidationState)
            }
            StateName::StableTurn => PlayState::Stable(StableTurnState),
            StateName::WaitingForBackupValidation => {
                PlayState::BackupValidation(WaitingForBackupValidationState)
            }
            StateName::WaitingForTurnValidation => {
                PlayState::TurnValidation(WaitingForTurnValidationState)
            }
            StateName::WaitingToCheckMyTurn => PlayState::WaitingToCheck(WaitingForMyTurnState),
            StateName::CheckingMyTurn => PlayState::Checking(CheckingMyTurnState),
            StateName::GameOver => PlayState::Over(GameOverState),
        }
    }
}

#[async_trait]
impl ModeState for PlayState {
    fn name(&self) -> StateName {
        match self {
            PlayState::Starting(s) => s.name(),
            PlayState::Empty(s) => s.name(),
            PlayState::MoveValidation(s) => s.name(),
            PlayState::Stable(s) => s.name(),
            PlayState::BackupValidation(s) => s.name(),
            PlayState::TurnValidation(s) => s.name(),
            PlayState::WaitingToCheck(s) => s.name(),
            PlayState::Checking(s) => s.name(),
            PlayState::Over(s) => s.name(),
        }
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        match self {
            PlayState::Starting(s) => s.on_entry(ctx).await,
            PlayState::Empty(s) => s.on_entry(ctx).await,
            PlayState::MoveValidation(s) => s.on_entry(ctx).await,
            PlayState::Stable(s) => s.on_entry(ctx).await,
            PlayState::BackupValidation(s) => s.on_entry(ctx).await,
            PlayState::TurnValidation(s) => s.on_entry(ctx).await,
            PlayState::WaitingToCheck(s) => s.on_entry(ctx).await,
            PlayState::Checking(s) => s.on_entry(ctx).await,
            PlayState::Over(s) => s.on_entry(ctx).await,
        }
    }

    fn on_message(
        &self,
        message: &PlayMessage,
        ctx: &mut TurnContext,
    ) -> Result<Transition, ClientError> {
        match self {
            PlayState::Starting(s) => s.on_message(message, ctx),
            PlayState::Empty(s) => s.on_message(message, ctx),
            PlayState::MoveValidation(s) => s.on_message(message, ctx),
            PlayState::Stable(s) => s.on_message(message, ctx),
            PlayState::BackupValidation(s) => s.on_message(message, ctx),
            PlayState::TurnValidation(s) => s.on_message(message, ctx),
            PlayState::WaitingToCheck(s) => s.on_message(message, ctx),
            PlayState::Checking(s) => s.on_message(message, ctx),
            PlayState::Over(s) => s.on_message(message, ctx),
        }
    }
}

/// Initial state. Validates that the snapshot is playable, renders the
/// helper text and player labels, then decides the first real state.
#[derive(Debug)]
pub(crate) struct StartingPlayModeState;

impl StartingPlayModeState {
    fn helper_text(snapshot: &GameSnapshot) -> Result<String, InvariantError> {
        let opponent = snapshot.opponent_player();
        let mut text =
            format!("You are playing a game of checkers with {opponent}. <br/><br/>");
        if snapshot.is_game_over() {
            text.push_str(&format!("<b>{}</b>", snapshot.game_over_message()?));
        } else if snapshot.is_my_turn() {
            text.push_str(
                "It's your turn.  Drag-and-drop one of your pieces to make moves. \
                 Use the Backup button to remove the most recent move. \
                 Use the Submit button when you are ready to commit your complete turn.",
            );
        } else {
            text.push_str(&format!(
                "It's {opponent} turn.  The page will refresh periodically \
                 and you will be informed when it is your turn."
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl ModeState for StartingPlayModeState {
    fn name(&self) -> StateName {
        StateName::StartingPlayMode
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        if !ctx.snapshot().is_valid_in_play_mode() {
            return Err(InvariantError::new(
                "snapshot is not valid for Play mode: current user is not a player",
            )
            .into());
        }

        let text = Self::helper_text(ctx.snapshot())?;
        ctx.set_helper_text(&text);
        if ctx.snapshot().is_player_red() {
            ctx.set_red_players_name("You");
        }
        if ctx.snapshot().is_player_white() {
            ctx.set_white_players_name("You");
        }

        if ctx.snapshot().is_game_over() {
            debug!(message = %ctx.snapshot().game_over_message()?, "game is already over");
            return Ok(Transition::To(StateName::GameOver));
        }
        ctx.hide_button(ButtonId::Exit);
        if ctx.snapshot().is_my_turn() {
            debug!("it's your turn");
            Ok(Transition::To(StateName::EmptyTurn))
        } else {
            debug!("it's not your turn");
            Ok(Transition::To(StateName::WaitingToCheckMyTurn))
        }
    }
}

/// It's my turn and the turn is empty; move input is enabled.
#[derive(Debug)]
pub(crate) struct EmptyTurnState;

#[async_trait]
impl ModeState for EmptyTurnState {
    fn name(&self) -> StateName {
        StateName::EmptyTurn
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.enable_all_my_pieces();
        Ok(Transition::Stay)
    }

    fn on_message(
        &self,
        message: &PlayMessage,
        ctx: &mut TurnContext,
    ) -> Result<Transition, ClientError> {
        match message {
            PlayMessage::RequestMove(mv) => {
                ctx.set_pending_move(*mv)?;
                Ok(Transition::To(StateName::WaitingForMoveValidation))
            }
            other => {
                debug!(state = %self.name(), message = ?other, "message has no handler in this state; dropped");
                Ok(Transition::Stay)
            }
        }
    }
}

/// A move is pending; every turn control and piece is disabled while the
/// server validates it.
#[derive(Debug)]
pub(crate) struct WaitingForMoveValidationState;

#[async_trait]
impl ModeState for WaitingForMoveValidationState {
    fn name(&self) -> StateName {
        StateName::WaitingForMoveValidation
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.disable_button(ButtonId::Backup);
        ctx.disable_button(ButtonId::Submit);
        ctx.disable_button(ButtonId::Resign);
        ctx.disable_all_my_pieces();

        let mv = ctx
            .pending_move()
            .ok_or_else(|| InvariantError::new("no pending move to validate"))?;
        let payload = serde_json::to_value(mv)
            .map_err(|e| InvariantError::new(format!("unserializable move: {e}")))?;
        let message = ctx.call(Action::ValidateMove, Some(payload)).await?;

        ctx.display_message(&message);
        if message.is_error() {
            ctx.reset_pending_move()?;
            let next = if ctx.is_turn_active() {
                StateName::StableTurn
            } else {
                StateName::EmptyTurn
            };
            Ok(Transition::To(next))
        } else {
            ctx.add_pending_move()?;
            Ok(Transition::To(StateName::StableTurn))
        }
    }
}

/// The turn holds at least one validated move. The player may chain another
/// jump, back up, or submit.
#[derive(Debug)]
pub(crate) struct StableTurnState;

#[async_trait]
impl ModeState for StableTurnState {
    fn name(&self) -> StateName {
        StateName::StableTurn
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.enable_button(ButtonId::Backup);
        ctx.enable_button(ButtonId::Submit);
        ctx.enable_active_piece()?;
        Ok(Transition::Stay)
    }

    fn on_message(
        &self,
        message: &PlayMessage,
        ctx: &mut TurnContext,
    ) -> Result<Transition, ClientError> {
        match message {
            PlayMessage::RequestMove(mv) => {
                ctx.set_pending_move(*mv)?;
                Ok(Transition::To(StateName::WaitingForMoveValidation))
            }
            PlayMessage::BackupMove => Ok(Transition::To(StateName::WaitingForBackupValidation)),
            PlayMessage::SubmitTurn => Ok(Transition::To(StateName::WaitingForTurnValidation)),
        }
    }
}

/// The newest move is removed from the server's cached turn, then popped off
/// the local turn and visually reversed.
///
/// The server caches every validated move; a local-only undo would leave the
/// next `/validateMove` checking against a board the player no longer sees.
#[derive(Debug)]
pub(crate) struct WaitingForBackupValidationState;

#[async_trait]
impl ModeState for WaitingForBackupValidationState {
    fn name(&self) -> StateName {
        StateName::WaitingForBackupValidation
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        let message = ctx.call(Action::BackupMove, None).await?;
        if message.is_error() {
            ctx.display_message(&message);
            return Ok(Transition::To(StateName::StableTurn));
        }
        let remaining = ctx.pop_move()?;
        let next = if remaining {
            StateName::StableTurn
        } else {
            StateName::EmptyTurn
        };
        Ok(Transition::To(next))
    }
}

/// The whole turn is moved into the backup slot and submitted. On success
/// the state machine ends with a page refresh; on rejection the turn is
/// restored verbatim.
#[derive(Debug)]
pub(crate) struct WaitingForTurnValidationState;

#[async_trait]
impl ModeState for WaitingForTurnValidationState {
    fn name(&self) -> StateName {
        StateName::WaitingForTurnValidation
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.clear_turn_during_submit();
        let message = ctx.call(Action::SubmitTurn, None).await?;

        ctx.display_message(&message);
        if message.is_info() {
            Ok(Transition::Page(PageAction::Refresh))
        } else {
            // valid rejection, e.g. an incomplete jump sequence
            ctx.put_turn_back_after_failed_submit()?;
            Ok(Transition::To(StateName::StableTurn))
        }
    }
}

/// Not my turn; Resign is available between poll cycles.
///
/// The wait itself lives in [`PlayController::poll_once`], so control
/// returns to the embedder between cycles and a Resign click can be honored
/// without abandoning an in-flight future.
///
/// [`PlayController::poll_once`]: crate::PlayController::poll_once
#[derive(Debug)]
pub(crate) struct WaitingForMyTurnState;

#[async_trait]
impl ModeState for WaitingForMyTurnState {
    fn name(&self) -> StateName {
        StateName::WaitingToCheckMyTurn
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.enable_button(ButtonId::Resign);
        Ok(Transition::Stay)
    }
}

/// Asks the server whether the opponent has finished their turn.
#[derive(Debug)]
pub(crate) struct CheckingMyTurnState;

#[async_trait]
impl ModeState for CheckingMyTurnState {
    fn name(&self) -> StateName {
        StateName::CheckingMyTurn
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.disable_button(ButtonId::Resign);
        let message = ctx.call(Action::CheckTurn, None).await?;

        if message.is_info() {
            match message.text().as_str() {
                // the opponent moved; end the state machine with a reload
                "true" => Ok(Transition::Page(PageAction::Refresh)),
                "false" => Ok(Transition::To(StateName::WaitingToCheckMyTurn)),
                _ => {
                    // display-worthy text, e.g. the opponent resigned
                    ctx.display_message(&message);
                    Ok(Transition::To(StateName::WaitingToCheckMyTurn))
                }
            }
        } else {
            ctx.display_message(&message);
            Ok(Transition::To(StateName::WaitingToCheckMyTurn))
        }
    }
}

/// Terminal state: the turn controls are gone and nothing is handled.
#[derive(Debug)]
pub(crate) struct GameOverState;

#[async_trait]
impl ModeState for GameOverState {
    fn name(&self) -> StateName {
        StateName::GameOver
    }

    async fn on_entry(&self, ctx: &mut TurnContext) -> Result<Transition, ClientError> {
        ctx.hide_button(ButtonId::Backup);
        ctx.hide_button(ButtonId::Submit);
        ctx.hide_button(ButtonId::Resign);
        Ok(Transition::Stay)
    }
}
