//! Board positions, moves, and the opaque piece handle.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Number of rows on the checkers board.
pub const NUM_ROWS: u8 = 8;
/// Number of columns on the checkers board.
pub const NUM_COLS: u8 = 8;

/// A square on the board, addressed by row and cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Position {
    /// Row index, 0 at the top of the player's view.
    row: u8,
    /// Cell index within the row.
    cell: u8,
}

impl Position {
    /// Queries whether this position lies within the board bounds.
    pub fn is_valid(&self) -> bool {
        self.row < NUM_ROWS && self.cell < NUM_COLS
    }

    /// Mirrors this position across the board, for the opponent's view.
    pub fn inverse(&self) -> Self {
        Self {
            row: NUM_ROWS - self.row - 1,
            cell: NUM_COLS - self.cell - 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.cell)
    }
}

/// A single piece relocation from one position to another.
///
/// Immutable; [`Move::reverse`] produces the inverse relocation used for
/// optimistic rollback and backup-undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Move {
    /// Where the piece starts.
    start: Position,
    /// Where the piece lands.
    end: Position,
}

impl Move {
    /// Produces the move that puts the piece back where it started.
    pub fn reverse(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Queries whether this is a single-square diagonal move.
    pub fn is_simple_move(&self) -> bool {
        self.delta() == (1, 1)
    }

    /// Queries whether this is a jump over an adjacent square.
    pub fn is_jump(&self) -> bool {
        self.delta() == (2, 2)
    }

    fn delta(&self) -> (u8, u8) {
        (
            self.start.row.abs_diff(self.end.row),
            self.start.cell.abs_diff(self.end.cell),
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}

/// Opaque handle to a rendered piece, issued by the board adapter.
///
/// The core never inspects it; it only hands it back to the adapter to move,
/// enable, or disable the piece it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct PieceId(u32);
