//! Error taxonomy for the client core.
//!
//! Domain-level rejections from the server are *not* errors: they arrive as
//! [`Message`](crate::Message) values with `type: ERROR` and are absorbed by
//! the state machine. The types here cover everything else: transport
//! failures, broken controller contracts, and registry misconfiguration.

use derive_more::{Display, Error, From};

/// Transport-level failure from a gateway call.
///
/// Never handled by a mode state; it propagates out of the controller so the
/// embedding view can report it. The current view state is left unresolved.
#[derive(Debug, Display, Error, From)]
pub enum TransportError {
    /// The request could not be built, sent, or its body read.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),
    /// The server redirected where a JSON body was expected.
    #[display("unexpected redirect to '{location}'; expected a JSON response")]
    #[from(ignore)]
    UnexpectedRedirect {
        /// Target of the redirect, from the `Location` header.
        #[error(not(source))]
        location: String,
    },
    /// The server answered with a non-success status.
    #[display("unexpected HTTP status {status}")]
    #[from(ignore)]
    UnexpectedStatus {
        /// The HTTP status code received.
        #[error(not(source))]
        status: u16,
    },
    /// The response body was HTML rather than JSON.
    #[display("HTML content in response body; expected JSON")]
    HtmlContent,
    /// The response body was not a well-formed message envelope.
    #[display("malformed response body: {_0}")]
    MalformedBody(serde_json::Error),
}

/// Controller-level contract violation with caller location tracking.
///
/// These are programming errors (setting an empty pending move, finding no
/// piece at an expected position). They are fatal and never retried.
#[derive(Debug, Clone, Display, Error)]
#[display("invariant violated: {message} at {file}:{line}")]
pub struct InvariantError {
    /// Description of the broken contract.
    pub message: String,
    /// Line number where the violation was raised.
    pub line: u32,
    /// Source file where the violation was raised.
    pub file: &'static str,
}

impl InvariantError {
    /// Creates a new invariant error recording the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A state name was looked up that has no registered instance.
///
/// Unreachable as long as the registry is built over the closed state enum,
/// but reported rather than panicked on.
#[derive(Debug, Clone, Display, Error)]
#[display("no state registered under '{name}'")]
pub struct ConfigError {
    /// The unregistered state name.
    pub name: String,
}

/// Unified error type for controller operations.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// A gateway call failed at the transport level.
    Transport(TransportError),
    /// A controller contract was violated.
    Invariant(InvariantError),
    /// The state registry was misconfigured.
    Config(ConfigError),
}
