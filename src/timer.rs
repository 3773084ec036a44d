//! Cancellable delay backing the opponent-turn polling states.
//!
//! The original polling pattern had no guard against a timer outliving the
//! page; here the timer carries a cancellation signal tied to the controller
//! lifetime, so shutting the controller down wakes any pending wait
//! immediately instead of racing a stale transition.

use tokio::sync::watch;
use tokio::time::{Duration, sleep};
use tracing::debug;

/// Interval between opponent-turn polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Creates a linked timer and cancellation handle.
pub fn poll_timer() -> (PollTimer, CancelHandle) {
    let (tx, rx) = watch::channel(false);
    (PollTimer { cancelled: rx }, CancelHandle { cancelled: tx })
}

/// Awaitable delay that ends early when cancelled.
#[derive(Debug, Clone)]
pub struct PollTimer {
    cancelled: watch::Receiver<bool>,
}

impl PollTimer {
    /// Waits for `duration`. Returns `true` if the full delay elapsed,
    /// `false` if the timer was cancelled first.
    pub async fn wait(&mut self, duration: Duration) -> bool {
        if self.is_cancelled() {
            debug!("timer already cancelled; not waiting");
            return false;
        }
        tokio::select! {
            _ = sleep(duration) => true,
            _ = self.cancelled.changed() => {
                debug!("timer cancelled mid-wait");
                false
            }
        }
    }

    /// Queries the cancellation flag without waiting.
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }
}

/// Cancels every [`PollTimer`] cloned from the same channel.
#[derive(Debug)]
pub struct CancelHandle {
    cancelled: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.cancelled.send(true);
    }
}
