//! The Play-mode controller: turn data, state registry, and dispatch.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::board::{Move, PieceId};
use crate::error::{ClientError, ConfigError, InvariantError, TransportError};
use crate::gateway::{Action, Gateway};
use crate::message::Message;
use crate::page::PageAction;
use crate::play::states::{ModeState, PlayMessage, PlayState, StateName, Transition};
use crate::snapshot::GameSnapshot;
use crate::timer::{CancelHandle, POLL_INTERVAL, PollTimer, poll_timer};
use crate::turn::Turn;
use crate::ui::{BoardAdapter, ButtonId, GameView, UiControls};

/// Everything a state may read or mutate: the turn data and the handles to
/// the snapshot, gateway, and UI collaborators.
///
/// The turn data is owned here exclusively; states mutate it only through
/// the primitives below.
pub(crate) struct TurnContext {
    snapshot: GameSnapshot,
    gateway: Box<dyn Gateway>,
    board: Box<dyn BoardAdapter>,
    controls: Box<dyn UiControls>,
    view: Box<dyn GameView>,
    timer: PollTimer,
    turn: Turn,
    pending_move: Option<Move>,
    turn_backup: Option<Turn>,
    active_piece: Option<PieceId>,
}

impl TurnContext {
    /// The immutable game snapshot for this page load.
    pub(crate) fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// The move awaiting server validation, if any.
    pub(crate) fn pending_move(&self) -> Option<Move> {
        self.pending_move
    }

    /// Queries whether the turn holds at least one committed move.
    pub(crate) fn is_turn_active(&self) -> bool {
        !self.turn.is_empty()
    }

    /// Single round-trip to the server.
    pub(crate) async fn call(
        &self,
        action: Action,
        payload: Option<serde_json::Value>,
    ) -> Result<Message, TransportError> {
        self.gateway.call(action, payload).await
    }

    /// Waits out `duration` on the poll timer; `false` means cancelled.
    pub(crate) async fn wait(&mut self, duration: tokio::time::Duration) -> bool {
        self.timer.wait(duration).await
    }

    /// Queries whether the poll timer has been cancelled.
    pub(crate) fn poll_cancelled(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Registers the requested move as pending and renders it optimistically,
    /// before the server has confirmed it.
    pub(crate) fn set_pending_move(&mut self, mv: Move) -> Result<(), InvariantError> {
        if self.pending_move.is_some() {
            return Err(InvariantError::new("a pending move is already registered"));
        }
        let piece = self
            .board
            .piece_at(*mv.start())
            .ok_or_else(|| InvariantError::new(format!("no piece found at {}", mv.start())))?;
        self.pending_move = Some(mv);
        self.board.set_space_pending(*mv.start());
        self.board.set_space_pending(*mv.end());
        self.board.move_piece(piece, mv);
        Ok(())
    }

    /// Removes the pending move from consideration, putting the piece back
    /// where it started. Used when the server rejects the move.
    pub(crate) fn reset_pending_move(&mut self) -> Result<(), InvariantError> {
        let mv = self
            .pending_move
            .take()
            .ok_or_else(|| InvariantError::new("no pending move to reset"))?;
        self.board.reset_space_pending(*mv.start());
        self.board.reset_space_pending(*mv.end());
        self.undo_move(mv)
    }

    /// Commits the server-validated pending move onto the turn. The first
    /// committed move's piece becomes the active piece for re-enabling.
    pub(crate) fn add_pending_move(&mut self) -> Result<(), InvariantError> {
        let mv = self
            .pending_move
            .take()
            .ok_or_else(|| InvariantError::new("no pending move to commit"))?;
        if self.active_piece.is_none() {
            let piece = self
                .board
                .piece_at(*mv.end())
                .ok_or_else(|| InvariantError::new(format!("no piece found at {}", mv.end())))?;
            debug!(piece = ?piece, "remembering active piece");
            self.active_piece = Some(piece);
        }
        self.board.set_space_validated(*mv.start());
        self.board.set_space_validated(*mv.end());
        self.turn.push(mv);
        Ok(())
    }

    /// Removes and visually reverses the most recent committed move.
    ///
    /// Returns whether any moves remain on the turn.
    pub(crate) fn pop_move(&mut self) -> Result<bool, InvariantError> {
        let Some(mv) = self.turn.pop() else {
            debug!("pop requested on an empty turn");
            return Ok(false);
        };
        self.undo_move(mv)?;
        self.board.reset_space_validated(*mv.end());
        if self.turn.is_empty() {
            self.board.reset_space_validated(*mv.start());
            self.active_piece = None;
        }
        Ok(!self.turn.is_empty())
    }

    /// Swaps the whole turn into the backup slot ahead of a submit.
    pub(crate) fn clear_turn_during_submit(&mut self) {
        self.turn_backup = Some(std::mem::take(&mut self.turn));
    }

    /// Restores the turn verbatim from the backup slot after a failed submit.
    pub(crate) fn put_turn_back_after_failed_submit(&mut self) -> Result<(), InvariantError> {
        self.turn = self
            .turn_backup
            .take()
            .ok_or_else(|| InvariantError::new("no backed-up turn to restore"))?;
        Ok(())
    }

    /// Re-enables the piece the turn is built around.
    pub(crate) fn enable_active_piece(&mut self) -> Result<(), InvariantError> {
        let piece = self
            .active_piece
            .ok_or_else(|| InvariantError::new("no active piece"))?;
        self.board.enable_piece(piece);
        Ok(())
    }

    /// Moves the piece at the end of `mv` back to its start.
    fn undo_move(&mut self, mv: Move) -> Result<(), InvariantError> {
        let piece = self
            .board
            .piece_at(*mv.end())
            .ok_or_else(|| InvariantError::new(format!("no piece found at {}", mv.end())))?;
        self.board.move_piece(piece, mv.reverse());
        Ok(())
    }

    /// Makes all of the viewer's pieces draggable.
    pub(crate) fn enable_all_my_pieces(&mut self) {
        self.board.enable_all_my_pieces();
    }

    /// Makes all of the viewer's pieces inert.
    pub(crate) fn disable_all_my_pieces(&mut self) {
        self.board.disable_all_my_pieces();
    }

    /// Enables a toolbar button.
    pub(crate) fn enable_button(&mut self, button: ButtonId) {
        self.controls.enable_button(button);
    }

    /// Disables a toolbar button.
    pub(crate) fn disable_button(&mut self, button: ButtonId) {
        self.controls.disable_button(button);
    }

    /// Hides a toolbar button.
    pub(crate) fn hide_button(&mut self, button: ButtonId) {
        self.controls.hide_button(button);
    }

    /// Shows a server message to the player.
    pub(crate) fn display_message(&mut self, message: &Message) {
        self.view.display_message(message);
    }

    /// Replaces the helper text.
    pub(crate) fn set_helper_text(&mut self, html: &str) {
        self.view.set_helper_text(html);
    }

    /// Relabels the red player's name indicator.
    pub(crate) fn set_red_players_name(&mut self, label: &str) {
        self.view.set_red_players_name(label);
    }

    /// Relabels the white player's name indicator.
    pub(crate) fn set_white_players_name(&mut self, label: &str) {
        self.view.set_white_players_name(label);
    }
}

/// Current state name plus the closed name→instance registry.
struct StateMachine {
    current: StateName,
    registry: BTreeMap<StateName, PlayState>,
}

impl StateMachine {
    fn new() -> Self {
        let registry = StateName::iter()
            .map(|name| (name, PlayState::for_name(name)))
            .collect();
        Self {
            current: StateName::StartingPlayMode,
            registry,
        }
    }
}

/// Manages the Play-mode behavior of the game view.
///
/// Owns the turn data and the state registry, and routes user and timer
/// events to state-specific behavior. Terminal outcomes (a page refresh
/// after a committed turn, navigation home after a resignation) are
/// returned as [`PageAction`]s for the embedding page to perform.
pub struct PlayController {
    machine: StateMachine,
    ctx: TurnContext,
    cancel: CancelHandle,
}

impl PlayController {
    /// Creates the controller and registers the mode-control buttons.
    ///
    /// No state is entered until [`PlayController::start`] runs.
    pub fn new(
        snapshot: GameSnapshot,
        gateway: Box<dyn Gateway>,
        board: Box<dyn BoardAdapter>,
        mut controls: Box<dyn UiControls>,
        view: Box<dyn GameView>,
    ) -> Self {
        info!(game_id = ?snapshot.game_id(), "creating Play controller");
        for button in [
            ButtonId::Backup,
            ButtonId::Submit,
            ButtonId::Resign,
            ButtonId::Exit,
        ] {
            controls.add_button(button);
        }
        let (timer, cancel) = poll_timer();
        Self {
            machine: StateMachine::new(),
            ctx: TurnContext {
                snapshot,
                gateway,
                board,
                controls,
                view,
                timer,
                turn: Turn::new(),
                pending_move: None,
                turn_backup: None,
                active_piece: None,
            },
            cancel,
        }
    }

    /// Starts Play mode by entering the initial state.
    ///
    /// During the opponent's turn the machine settles in the waiting state;
    /// drive it with [`PlayController::run`] or [`PlayController::poll_once`].
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<Option<PageAction>, ClientError> {
        self.set_state(StateName::StartingPlayMode).await
    }

    /// Enters `name` and runs its entry hook, following chained transitions
    /// until the machine settles or ends with a page action.
    #[instrument(skip(self))]
    pub async fn set_state(&mut self, name: StateName) -> Result<Option<PageAction>, ClientError> {
        let mut next = name;
        loop {
            let state = self
                .machine
                .registry
                .get(&next)
                .ok_or_else(|| ConfigError {
                    name: next.to_string(),
                })?;
            self.machine.current = next;
            debug!(state = %next, "entering state");
            match state.on_entry(&mut self.ctx).await? {
                Transition::Stay => return Ok(None),
                Transition::To(n) => next = n,
                Transition::Page(action) => {
                    info!(action = ?action, "state machine ended with a page action");
                    return Ok(Some(action));
                }
            }
        }
    }

    /// Routes a message to the current state's handler; states without a
    /// handler for it drop the event as a logged no-op.
    #[instrument(skip(self))]
    pub async fn dispatch(
        &mut self,
        message: PlayMessage,
    ) -> Result<Option<PageAction>, ClientError> {
        let transition = {
            let state = self
                .machine
                .registry
                .get(&self.machine.current)
                .ok_or_else(|| ConfigError {
                    name: self.machine.current.to_string(),
                })?;
            state.on_message(&message, &mut self.ctx)?
        };
        match transition {
            Transition::Stay => Ok(None),
            Transition::To(name) => self.set_state(name).await,
            Transition::Page(action) => Ok(Some(action)),
        }
    }

    /// Requests a move; could be a simple move or a jump.
    pub async fn request_move(&mut self, mv: Move) -> Result<Option<PageAction>, ClientError> {
        self.dispatch(PlayMessage::RequestMove(mv)).await
    }

    /// Backs up a single move.
    pub async fn backup_move(&mut self) -> Result<Option<PageAction>, ClientError> {
        self.dispatch(PlayMessage::BackupMove).await
    }

    /// Submits the accumulated turn to the server.
    pub async fn submit_turn(&mut self) -> Result<Option<PageAction>, ClientError> {
        self.dispatch(PlayMessage::SubmitTurn).await
    }

    /// One wait-then-check polling cycle during the opponent's turn.
    ///
    /// Control comes back between cycles, so the embedder can honor a
    /// Resign click with [`PlayController::resign_game`] while waiting.
    /// Returns `Some(Refresh)` when the opponent has finished, `None` when
    /// nothing changed or the timer was cancelled. Fails when no turn poll
    /// is pending in the current state.
    #[instrument(skip(self))]
    pub async fn poll_once(&mut self) -> Result<Option<PageAction>, ClientError> {
        if self.machine.current != StateName::WaitingToCheckMyTurn {
            return Err(
                InvariantError::new("no turn poll is pending in the current state").into(),
            );
        }
        if !self.ctx.wait(POLL_INTERVAL).await {
            debug!("poll cancelled; controller is shutting down");
            return Ok(None);
        }
        self.set_state(StateName::CheckingMyTurn).await
    }

    /// Polls until it is my turn or the controller is shut down.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Option<PageAction>, ClientError> {
        loop {
            match self.poll_once().await? {
                Some(action) => return Ok(Some(action)),
                None if self.ctx.poll_cancelled() => return Ok(None),
                None => {}
            }
        }
    }

    /// Resigns from the game. Confirmation is the embedding page's concern.
    ///
    /// An `INFO` response ends the session with a navigation home; an error
    /// message is displayed and play continues.
    #[instrument(skip(self))]
    pub async fn resign_game(&mut self) -> Result<Option<PageAction>, ClientError> {
        let message = self.ctx.call(Action::ResignGame, None).await?;
        if message.is_info() {
            Ok(Some(PageAction::NavigateHome))
        } else {
            self.ctx.display_message(&message);
            Ok(None)
        }
    }

    /// Queries whether the view can be deactivated, usually from navigating
    /// away from the page. True iff there is no active turn.
    pub fn can_deactivate(&self) -> bool {
        !self.ctx.is_turn_active()
    }

    /// Cancels any outstanding poll timer; call when the page goes away.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// The name of the current state.
    pub fn current_state(&self) -> StateName {
        self.machine.current
    }

    /// The committed moves of the turn in progress.
    pub fn turn(&self) -> &Turn {
        &self.ctx.turn
    }

    /// The move awaiting validation, if any.
    pub fn pending_move(&self) -> Option<Move> {
        self.ctx.pending_move
    }

    /// The snapshot this controller was built over.
    pub fn snapshot(&self) -> &GameSnapshot {
        self.ctx.snapshot()
    }
}
