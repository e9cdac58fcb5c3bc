//! Error types for match configuration and move application.
//!
//! The engine functions themselves never fail; these only surface where a
//! caller hands in configuration or asks a [`crate::Match`] to commit a move.

use thiserror::Error;

use crate::PlayerId;

/// Errors that can occur while setting up a board or player registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board side outside 4..=30.
    #[error("board size {0} is outside 4..=30")]
    BoardSize(usize),

    /// Both players were given the same symbol.
    #[error("players share the variable symbol '{0}'")]
    DuplicateSymbol(char),

    /// A variable symbol collides with a digit, operator or whitespace.
    #[error("'{0}' cannot be used as a variable symbol")]
    ReservedSymbol(char),

    /// Board text row with the wrong number of cells.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Board text contains a character with no cell meaning.
    #[error("unknown board symbol '{0}'")]
    UnknownSymbol(char),
}

/// Errors that can occur when validating or applying a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// A winning line froze the board.
    #[error("game is already over")]
    GameOver,

    /// The other player is to move.
    #[error("it is not player {0}'s turn")]
    WrongTurn(PlayerId),

    /// Coordinates outside the board.
    #[error("cell ({row},{col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    /// Cells are write-once.
    #[error("cell ({row},{col}) is already occupied")]
    Occupied { row: usize, col: usize },

    /// Empty cells, unknown characters and the opponent's variable cannot be placed.
    #[error("'{0}' cannot be placed by this player")]
    InvalidSymbol(char),

    /// The placement rule found the opponent's variable along a line from the cell.
    #[error("a line from ({row},{col}) already reaches the opponent's variable")]
    BlockedVariable { row: usize, col: usize },
}
