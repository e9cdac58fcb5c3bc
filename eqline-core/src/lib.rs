//! Equation line game logic.
//!
//! Two players take turns dropping digits, operators or their own variable
//! symbol onto a square grid. A player wins when a straight line of placed
//! symbols, read forward or backward, forms an equation in their variable
//! with an integer solution.
//!
//! # Board Layout
//!
//! ```text
//! Cells are stored row-major in a Vec of length size * size.
//!
//!        col 0  col 1  col 2 ...
//! row 0    0      1      2
//! row 1   size  size+1 size+2
//! ...
//!
//! Cell contents:
//!   Empty            ' '
//!   Digit(0-9)       '0'..'9'
//!   Operator         '+' '-' '*' '/' '='
//!   Variable(A|B)    the player's symbol from the Players registry
//! ```
//!
//! # Engine Entry Points
//!
//! - [`validate`]: is a raw run of characters a winning equation?
//! - [`find_win`]: scan a board for the first winning line.
//! - [`can_place_variable`]: may a player drop their variable on a cell?
//!
//! All three are pure and total: an invalid equation or an out-of-range
//! coordinate yields `None` / `false`, never an error.

pub mod equation;
pub mod error;
pub mod game;
pub mod normalize;
pub mod placement;
pub mod players;
pub mod protocol;
pub mod scan;

mod poly;

#[cfg(feature = "wasm")]
pub mod wasm;

use num::BigInt;
use serde::{Deserialize, Serialize};

pub use crate::equation::{solve_equation, validate, Rejection};
pub use crate::error::{ConfigError, MoveError};
pub use crate::game::{Match, MoveOutcome};
pub use crate::normalize::normalize;
pub use crate::placement::can_place_variable;
pub use crate::players::Players;
pub use crate::protocol::Message;
pub use crate::scan::find_win;

/// Shortest run that is ever tested as an equation (e.g. `x+1=2`).
pub const MIN_EQ_LEN: usize = 5;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 30;

/// Board side used when none is configured.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Character used for empty cells when a board is rendered as text.
pub const EMPTY_CHAR: char = ' ';

/// The 8 ray directions as (row step, col step), in scan order.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),   // east
    (1, 0),   // south
    (1, 1),   // south-east
    (1, -1),  // south-west
    (0, -1),  // west
    (-1, 0),  // north
    (-1, -1), // north-west
    (-1, 1),  // north-east
];

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::A => PlayerId::B,
            PlayerId::B => PlayerId::A,
        }
    }

    /// Both players, A first.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::A, PlayerId::B].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::A => write!(f, "A"),
            PlayerId::B => write!(f, "B"),
        }
    }
}

/// Arithmetic operators and the equals sign.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl Operator {
    /// All operators, in display order.
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Eq,
    ];

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Eq => '=',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '=' => Some(Operator::Eq),
            _ => None,
        }
    }
}

/// Contents of a single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Digit(u8),
    Operator(Operator),
    Variable(PlayerId),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Interpret a typed character. Player symbols are resolved through the
    /// registry; anything that is not a digit, an operator or a registered
    /// symbol yields `None`.
    pub fn from_char(ch: char, players: &Players) -> Option<Cell> {
        if let Some(d) = ch.to_digit(10) {
            return Some(Cell::Digit(d as u8));
        }
        if let Some(op) = Operator::from_char(ch) {
            return Some(Cell::Operator(op));
        }
        players.player_for(ch).map(Cell::Variable)
    }

    /// The character shown for this cell, `None` for empty cells.
    pub fn to_char(self, players: &Players) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Digit(d) => char::from_digit(d as u32, 10),
            Cell::Operator(op) => Some(op.as_char()),
            Cell::Variable(p) => Some(players.symbol(p)),
        }
    }
}

/// A request to place a symbol on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub player: PlayerId,
    pub row: usize,
    pub col: usize,
    pub symbol: Cell,
}

/// A winning line found on the board.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct WinResult {
    pub winner: PlayerId,
    /// Cells of the run in walk order.
    pub coordinates: Vec<(usize, usize)>,
    /// The text that validated (the run as written, or reversed).
    pub equation_text: String,
    #[serde(serialize_with = "serialize_solution")]
    pub solution: BigInt,
}

/// Solutions can exceed 64 bits on large boards, so they travel as decimal
/// strings.
fn serialize_solution<S: serde::Serializer>(value: &BigInt, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&value.to_string())
}

/// Square game board.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given side length (4..=30).
    pub fn new(size: usize) -> Result<Board, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::BoardSize(size));
        }
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build a board from text rows. Spaces and `.` are empty cells.
    ///
    /// ```
    /// use eqline_core::{Board, Players};
    ///
    /// let players = Players::default();
    /// let board = Board::from_rows(&["....", "x+2=", "....", "...."], &players).unwrap();
    /// assert_eq!(board.size(), 4);
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S], players: &Players) -> Result<Board, ConfigError> {
        let mut board = Board::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.as_ref().chars().collect();
            if chars.len() != board.size {
                return Err(ConfigError::RowLength {
                    row: r,
                    expected: board.size,
                    found: chars.len(),
                });
            }
            for (c, ch) in chars.into_iter().enumerate() {
                let cell = if ch == EMPTY_CHAR || ch == '.' {
                    Cell::Empty
                } else {
                    Cell::from_char(ch, players).ok_or(ConfigError::UnknownSymbol(ch))?
                };
                board.cells[r * board.size + c] = cell;
            }
        }
        Ok(board)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a signed coordinate lies on the board.
    #[inline]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Get a cell, `None` if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Signed-coordinate lookup used by ray walks.
    #[inline]
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.cells[row as usize * self.size + col as usize])
        } else {
            None
        }
    }

    /// Check if a cell is empty. Out-of-range cells are not empty.
    #[inline]
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Empty)
    }

    /// Put a symbol on an empty cell.
    ///
    /// Cells are write-once; only [`Board::clear`] empties them again.
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), MoveError> {
        match self.get(row, col) {
            None => Err(MoveError::OutOfBounds { row, col }),
            Some(existing) if !existing.is_empty() => Err(MoveError::Occupied { row, col }),
            Some(_) => {
                self.cells[row * self.size + col] = cell;
                Ok(())
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Render as text rows, empty cells as spaces.
    pub fn to_rows(&self, players: &Players) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|c| c.to_char(players).unwrap_or(EMPTY_CHAR))
                    .collect()
            })
            .collect()
    }
}
