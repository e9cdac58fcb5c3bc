//! Two-seat message relay.
//!
//! The relay does not referee: it assigns seats, stamps moves with the
//! sender's seat and fans them out. Each participant's match applies the
//! relayed moves itself. Participants are reached through unbounded mpsc
//! channels so the relay can be driven without any sockets.

use std::sync::Mutex;

use eqline_core::{Message, PlayerId};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Outgoing queue of one participant.
pub type Outbox = mpsc::UnboundedSender<Message>;

pub struct Relay {
    board_size: usize,
    /// Index 0 is seat A, index 1 seat B.
    seats: Mutex<[Option<Outbox>; 2]>,
}

fn seat_index(player: PlayerId) -> usize {
    match player {
        PlayerId::A => 0,
        PlayerId::B => 1,
    }
}

fn deliver(player: PlayerId, outbox: &Outbox, msg: Message) {
    if outbox.send(msg).is_err() {
        warn!(%player, "participant outbox closed");
    }
}

impl Relay {
    pub fn new(board_size: usize) -> Relay {
        Relay {
            board_size,
            seats: Mutex::new([None, None]),
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of taken seats.
    pub fn occupied(&self) -> usize {
        self.lock().iter().filter(|s| s.is_some()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, [Option<Outbox>; 2]> {
        self.seats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seat a new participant in the first free seat and send it `init`.
    /// When both seats are taken the participant gets `full` and `None`.
    #[instrument(skip(self, outbox))]
    pub fn join(&self, outbox: Outbox) -> Option<PlayerId> {
        let mut seats = self.lock();
        let Some(player) = PlayerId::all().find(|&p| seats[seat_index(p)].is_none()) else {
            info!("relay full, refusing participant");
            let _ = outbox.send(Message::Full);
            return None;
        };
        deliver(
            player,
            &outbox,
            Message::Init {
                player,
                board_size: self.board_size,
            },
        );
        seats[seat_index(player)] = Some(outbox);
        info!(%player, "participant joined");
        Some(player)
    }

    /// Free a seat and tell whoever is left.
    #[instrument(skip(self))]
    pub fn leave(&self, player: PlayerId) {
        let mut seats = self.lock();
        seats[seat_index(player)] = None;
        info!(%player, "participant left");
        let other = player.opponent();
        if let Some(outbox) = &seats[seat_index(other)] {
            deliver(other, outbox, Message::OpponentLeft);
        }
    }

    /// Handle a raw text frame from `sender`.
    pub fn handle_text(&self, sender: PlayerId, text: &str) {
        match serde_json::from_str::<Message>(text) {
            Ok(msg) => self.handle(sender, msg),
            Err(e) => {
                warn!(%sender, error = %e, "unparseable message");
                self.reply(sender, Message::Error {
                    message: format!("invalid message: {e}"),
                });
            }
        }
    }

    /// Route a parsed message from `sender`.
    #[instrument(skip(self))]
    pub fn handle(&self, sender: PlayerId, msg: Message) {
        match msg {
            Message::Move { row, col, symbol, .. } => {
                debug!(row, col, %symbol, "relaying move");
                self.broadcast(Message::Move {
                    player: sender,
                    row,
                    col,
                    symbol,
                });
            }
            Message::ResetRequest => self.broadcast(Message::Reset),
            other => {
                warn!(?other, "unexpected message from participant");
                self.reply(sender, Message::Error {
                    message: "unexpected message type".to_string(),
                });
            }
        }
    }

    fn reply(&self, player: PlayerId, msg: Message) {
        if let Some(outbox) = &self.lock()[seat_index(player)] {
            deliver(player, outbox, msg);
        }
    }

    fn broadcast(&self, msg: Message) {
        let seats = self.lock();
        for player in PlayerId::all() {
            if let Some(outbox) = &seats[seat_index(player)] {
                deliver(player, outbox, msg.clone());
            }
        }
    }
}
