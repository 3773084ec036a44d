//! The single asynchronous call abstraction used for all client-server
//! validation and polling actions.
//!
//! A call either yields a well-formed domain [`Message`], handled by the
//! state that issued it, or a [`TransportError`], which no state handles and
//! which propagates out of the controller. Calls are issued only from a
//! state's entry hook, so at most one is outstanding per controller.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use tracing::{debug, instrument, warn};

use crate::error::TransportError;
use crate::message::Message;

/// Server actions reachable through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Validate a single pending move.
    ValidateMove,
    /// Commit the accumulated turn.
    SubmitTurn,
    /// Undo the most recent validated move on the server.
    BackupMove,
    /// Resign from the game.
    ResignGame,
    /// Ask whether the opponent has finished their turn.
    CheckTurn,
    /// Ask whether the spectated game has advanced.
    SpectatorCheckTurn,
}

impl Action {
    /// The URL path this action is served under.
    pub fn path(&self) -> &'static str {
        match self {
            Action::ValidateMove => "/validateMove",
            Action::SubmitTurn => "/submitTurn",
            Action::BackupMove => "/backupMove",
            Action::ResignGame => "/resignGame",
            Action::CheckTurn => "/checkTurn",
            Action::SpectatorCheckTurn => "/spectator/checkTurn",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Asynchronous round-trip to the game server.
///
/// The trait is the seam for test doubles; production code uses
/// [`HttpGateway`].
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Sends `action` with an optional JSON payload and classifies the
    /// response into a domain [`Message`] or a [`TransportError`].
    async fn call(
        &self,
        action: Action,
        payload: Option<serde_json::Value>,
    ) -> Result<Message, TransportError>;
}

/// Gateway over HTTP, speaking the server's form-encoded POST protocol.
///
/// Redirects are not followed: an action answering with a 302 where JSON was
/// expected is a server bug and classified as a transport failure.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    game_id: Option<String>,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Creates a gateway for the server at `base_url`, attaching `game_id`
    /// to every request when known.
    pub fn new(
        base_url: impl Into<String>,
        game_id: Option<String>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
        Ok(Self {
            base_url: base_url.into(),
            game_id,
            client,
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self, payload), fields(action = %action))]
    async fn call(
        &self,
        action: Action,
        payload: Option<serde_json::Value>,
    ) -> Result<Message, TransportError> {
        let url = format!("{}{}", self.base_url, action.path());

        // gameID when known, actionData when the action takes one.
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = &self.game_id {
            params.push(("gameID", id.clone()));
        }
        if let Some(data) = payload {
            params.push(("actionData", data.to_string()));
        }

        debug!(url = %url, "POST being sent");
        let response = self.client.post(&url).form(&params).send().await?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default()
                .to_string();
            warn!(status = %status, location = %location, "redirect where JSON was expected");
            return Err(TransportError::UnexpectedRedirect { location });
        }
        if !status.is_success() {
            warn!(status = %status, "non-success status");
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim_start().starts_with('<') {
            warn!("HTML content detected in response body");
            return Err(TransportError::HtmlContent);
        }

        let message: Message = serde_json::from_str(&body)?;
        debug!(message_type = ?message.message_type(), "response classified");
        Ok(message)
    }
}
