//! Match state: board, turn order and the frozen result once someone wins.

use tracing::debug;

use crate::error::{ConfigError, MoveError};
use crate::placement::can_place_variable;
use crate::protocol::Message;
use crate::scan::find_win;
use crate::{Board, Cell, Move, PlayerId, Players, WinResult};

/// Result of a committed move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// No winning line yet; `next` is to move.
    Continue { next: PlayerId },
    /// The match is over. `assisted` is set when the move completed a line
    /// for the player who did not make it.
    Won { win: WinResult, assisted: bool },
}

/// One game between two players on a single board.
#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    players: Players,
    turn: PlayerId,
    winner: Option<WinResult>,
}

impl Match {
    /// Start a match on an empty board, player A to move.
    pub fn new(board_size: usize, players: Players) -> Result<Match, ConfigError> {
        Ok(Match {
            board: Board::new(board_size)?,
            players,
            turn: PlayerId::A,
            winner: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn current_turn(&self) -> PlayerId {
        self.turn
    }

    pub fn winner(&self) -> Option<&WinResult> {
        self.winner.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Build a move from a typed character.
    pub fn parse_move(&self, player: PlayerId, row: usize, col: usize, ch: char) -> Result<Move, MoveError> {
        let symbol = Cell::from_char(ch, &self.players).ok_or(MoveError::InvalidSymbol(ch))?;
        Ok(Move {
            player,
            row,
            col,
            symbol,
        })
    }

    /// Check a move without committing it.
    pub fn check_move(&self, mov: &Move) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if mov.player != self.turn {
            return Err(MoveError::WrongTurn(mov.player));
        }
        let (row, col) = (mov.row, mov.col);
        match self.board.get(row, col) {
            None => return Err(MoveError::OutOfBounds { row, col }),
            Some(cell) if !cell.is_empty() => return Err(MoveError::Occupied { row, col }),
            Some(_) => {}
        }
        match mov.symbol {
            Cell::Empty => Err(MoveError::InvalidSymbol(crate::EMPTY_CHAR)),
            Cell::Variable(owner) if owner != mov.player => {
                Err(MoveError::InvalidSymbol(self.players.symbol(owner)))
            }
            Cell::Variable(_) => {
                if can_place_variable(&self.board, row, col, mov.player, mov.player.opponent()) {
                    Ok(())
                } else {
                    Err(MoveError::BlockedVariable { row, col })
                }
            }
            Cell::Digit(_) | Cell::Operator(_) => Ok(()),
        }
    }

    /// Commit a move and look for a winning line.
    ///
    /// The mover's lines are checked first, then the opponent's.
    pub fn apply(&mut self, mov: Move) -> Result<MoveOutcome, MoveError> {
        self.check_move(&mov)?;
        self.board.place(mov.row, mov.col, mov.symbol)?;
        debug!(player = %mov.player, row = mov.row, col = mov.col, "move applied");

        let mover = mov.player;
        let found = self
            .players
            .find_win(&self.board, mover)
            .map(|win| (win, false))
            .or_else(|| {
                self.players
                    .find_win(&self.board, mover.opponent())
                    .map(|win| (win, true))
            });

        match found {
            Some((win, assisted)) => {
                debug!(winner = %win.winner, assisted, "match over");
                self.winner = Some(win.clone());
                Ok(MoveOutcome::Won { win, assisted })
            }
            None => {
                self.turn = mover.opponent();
                Ok(MoveOutcome::Continue { next: self.turn })
            }
        }
    }

    /// Clear the board and start over with player A.
    pub fn reset(&mut self) {
        self.board.clear();
        self.turn = PlayerId::A;
        self.winner = None;
    }

    /// Apply a relayed message. Only `move` and `reset` change the match;
    /// other messages are ignored.
    pub fn handle(&mut self, msg: &Message) -> Result<Option<MoveOutcome>, MoveError> {
        match *msg {
            Message::Move {
                player,
                row,
                col,
                symbol,
            } => {
                let mov = self.parse_move(player, row, col, symbol)?;
                self.apply(mov).map(Some)
            }
            Message::Reset => {
                self.reset();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
