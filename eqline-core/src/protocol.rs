//! Messages exchanged between participants and the relay.
//!
//! Every message is a JSON object tagged by `"type"`:
//!
//! ```text
//! {"type":"init","player":"A","board_size":6}
//! {"type":"move","player":"B","row":2,"col":3,"char":"="}
//! {"type":"reset_request"}
//! {"type":"reset"}
//! {"type":"opponent_left"}
//! {"type":"full"}
//! {"type":"error","message":"..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::{Move, PlayerId, Players};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Seat assignment sent to a participant when it joins.
    Init { player: PlayerId, board_size: usize },

    /// A placed symbol. The relay overwrites `player` with the sender's seat.
    Move {
        player: PlayerId,
        row: usize,
        col: usize,
        #[serde(rename = "char")]
        symbol: char,
    },

    /// A participant asks to start over.
    ResetRequest,

    /// Both participants clear their boards.
    Reset,

    /// The other participant disconnected.
    OpponentLeft,

    /// Both seats are taken.
    Full,

    /// The relay could not understand a message.
    Error { message: String },
}

impl Message {
    /// Wire form of a move. `None` for an empty cell, which is never a move.
    pub fn from_move(mov: &Move, players: &Players) -> Option<Message> {
        let symbol = mov.symbol.to_char(players)?;
        Some(Message::Move {
            player: mov.player,
            row: mov.row,
            col: mov.col,
            symbol,
        })
    }
}
