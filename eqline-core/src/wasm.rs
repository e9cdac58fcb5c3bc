//! WASM bindings for eqline-core
//!
//! Provides a JavaScript-friendly API over a local match.

use wasm_bindgen::prelude::*;

use crate::{Match, MoveOutcome, PlayerId, Players, DEFAULT_BOARD_SIZE};

fn player_from_js(player: u8) -> Option<PlayerId> {
    match player {
        0 => Some(PlayerId::A),
        1 => Some(PlayerId::B),
        _ => None,
    }
}

/// WASM-friendly wrapper around Match
#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Create a match. Symbols default to 'x' and 'y', size to 6.
    #[wasm_bindgen(constructor)]
    pub fn new(size: Option<usize>, symbol_a: Option<char>, symbol_b: Option<char>) -> Result<WasmMatch, JsError> {
        let players = Players::new(symbol_a.unwrap_or('x'), symbol_b.unwrap_or('y'))?;
        let inner = Match::new(size.unwrap_or(DEFAULT_BOARD_SIZE), players)?;
        Ok(WasmMatch { inner })
    }

    /// Board side length
    pub fn size(&self) -> usize {
        self.inner.board().size()
    }

    /// Player to move (0 = A, 1 = B)
    #[wasm_bindgen(js_name = currentTurn)]
    pub fn current_turn(&self) -> u8 {
        self.inner.current_turn() as u8
    }

    /// Board as an array of strings, empty cells as spaces
    pub fn rows(&self) -> Vec<String> {
        self.inner.board().to_rows(self.inner.players())
    }

    /// Symbols the player to move may place, as a string
    pub fn palette(&self) -> String {
        let players = self.inner.players();
        players.palette(self.inner.current_turn()).into_iter().collect()
    }

    /// Check a move without applying it
    #[wasm_bindgen(js_name = canPlace)]
    pub fn can_place(&self, row: usize, col: usize, ch: char) -> bool {
        let player = self.inner.current_turn();
        self.inner
            .parse_move(player, row, col, ch)
            .and_then(|mov| self.inner.check_move(&mov))
            .is_ok()
    }

    /// Apply a move for the player to move.
    /// Returns null while the game continues, or the WinResult as an object.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, row: usize, col: usize, ch: char) -> Result<JsValue, JsError> {
        let player = self.inner.current_turn();
        let mov = self.inner.parse_move(player, row, col, ch)?;
        match self.inner.apply(mov)? {
            MoveOutcome::Continue { .. } => Ok(JsValue::NULL),
            MoveOutcome::Won { win, .. } => Ok(serde_wasm_bindgen::to_value(&win)?),
        }
    }

    /// Winning line of the finished match, or null
    pub fn winner(&self) -> Result<JsValue, JsError> {
        match self.inner.winner() {
            Some(win) => Ok(serde_wasm_bindgen::to_value(win)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Solution of `raw` for a player (0 = A, 1 = B) as a decimal string, or undefined
    pub fn validate(&self, raw: &str, player: u8) -> Option<String> {
        let player = player_from_js(player)?;
        self.inner
            .players()
            .validate(raw, player)
            .map(|solution| solution.to_string())
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Clear the board, player A to move
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
