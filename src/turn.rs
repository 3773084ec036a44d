//! The ordered set of moves a player commits and submits together.

use crate::board::Move;

/// Committed moves of the turn in progress, stack discipline only.
///
/// The pending move awaiting validation is held separately by the controller;
/// it joins the turn only once the server accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    moves: Vec<Move>,
}

impl Turn {
    /// Creates an empty turn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validated move at the tail.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Removes and returns the most recent move, if any.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Number of committed moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Queries whether no moves have been committed.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The committed moves in commit order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}
