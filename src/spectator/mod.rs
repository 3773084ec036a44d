//! Spectator mode — a read-only, two-state rendition of the polling pattern.
//!
//! No turn data and no board input; the controller alternates between
//! waiting out the poll interval and asking the server whether the spectated
//! game has advanced.

use strum::Display;
use tracing::{debug, info, instrument};

use crate::error::ClientError;
use crate::gateway::{Action, Gateway};
use crate::page::PageAction;
use crate::snapshot::GameSnapshot;
use crate::timer::{CancelHandle, POLL_INTERVAL, PollTimer, poll_timer};
use crate::ui::GameView;

/// Symbolic names for the Spectator-mode states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpectatorStateName {
    /// Initial state: renders the helper text.
    #[strum(serialize = "Starting Spectator Mode")]
    StartingSpectatorMode,
    /// Waiting out the poll interval.
    #[strum(serialize = "Waiting for the Next Turn")]
    WaitingForNextTurn,
    /// Asking the server whether the game advanced.
    #[strum(serialize = "Checking for the Next Turn")]
    CheckingForNextTurn,
}

/// Manages the Spectator-mode behavior of the game view.
pub struct SpectatorController {
    snapshot: GameSnapshot,
    gateway: Box<dyn Gateway>,
    view: Box<dyn GameView>,
    timer: PollTimer,
    cancel: CancelHandle,
    current: SpectatorStateName,
}

impl SpectatorController {
    /// Creates the controller. No state is entered until
    /// [`SpectatorController::start`] runs.
    pub fn new(
        snapshot: GameSnapshot,
        gateway: Box<dyn Gateway>,
        view: Box<dyn GameView>,
    ) -> Self {
        info!(game_id = ?snapshot.game_id(), "creating Spectator controller");
        let (timer, cancel) = poll_timer();
        Self {
            snapshot,
            gateway,
            view,
            timer,
            cancel,
            current: SpectatorStateName::StartingSpectatorMode,
        }
    }

    /// Renders the helper text and enters the waiting state.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), ClientError> {
        let mut text = format!(
            "{}, Red, is playing {}. <br/><br/>",
            self.snapshot.red_player(),
            self.snapshot.white_player()
        );
        if self.snapshot.is_game_over() {
            text.push_str(&format!("<b>{}</b>", self.snapshot.game_over_message()?));
        } else {
            text.push_str(&format!(
                "It's {} turn.  The page will refresh periodically.",
                self.snapshot.active_player()
            ));
        }
        self.view.set_helper_text(&text);
        self.current = SpectatorStateName::WaitingForNextTurn;
        Ok(())
    }

    /// One wait-then-check cycle.
    ///
    /// Returns `Some(Refresh)` when the game advanced, `None` when nothing
    /// changed or the timer was cancelled.
    #[instrument(skip(self))]
    pub async fn poll_once(&mut self) -> Result<Option<PageAction>, ClientError> {
        self.current = SpectatorStateName::WaitingForNextTurn;
        if !self.timer.wait(POLL_INTERVAL).await {
            debug!("poll cancelled; spectator is shutting down");
            return Ok(None);
        }

        self.current = SpectatorStateName::CheckingForNextTurn;
        let message = self.gateway.call(Action::SpectatorCheckTurn, None).await?;
        if message.is_info() {
            match message.text().as_str() {
                "true" => {
                    info!("spectated game advanced; refreshing");
                    return Ok(Some(PageAction::Refresh));
                }
                "false" => {}
                _ => self.view.display_message(&message),
            }
        } else {
            self.view.display_message(&message);
        }
        self.current = SpectatorStateName::WaitingForNextTurn;
        Ok(None)
    }

    /// Polls until the game advances or the controller is shut down.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Option<PageAction>, ClientError> {
        loop {
            match self.poll_once().await? {
                Some(action) => return Ok(Some(action)),
                None if self.timer.is_cancelled() => return Ok(None),
                None => {}
            }
        }
    }

    /// Cancels any outstanding poll timer; call when the page goes away.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// The name of the current state.
    pub fn current_state(&self) -> SpectatorStateName {
        self.current
    }
}
