//! Terminal actions surfaced to the embedding page.

/// A navigation the embedding page must perform.
///
/// The core never touches the browser or process environment; when a state
/// machine reaches a point the original client handled with a page reload or
/// a route change, the controller returns one of these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Reload the game view to pick up the authoritative state.
    Refresh,
    /// Navigate to the home route.
    NavigateHome,
}
