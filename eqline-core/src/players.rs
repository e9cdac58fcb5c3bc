//! Player registry: the fixed, two-entry mapping between player ids and
//! their variable symbols.

use num::BigInt;

use crate::error::ConfigError;
use crate::{equation, placement, scan, Board, Operator, PlayerId, WinResult};

/// Immutable symbol assignment for one match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Players {
    a: char,
    b: char,
}

impl Players {
    /// Build a registry. Symbols must differ from each other and from digits,
    /// operators and whitespace.
    pub fn new(a: char, b: char) -> Result<Players, ConfigError> {
        for ch in [a, b] {
            if ch.is_ascii_digit() || ch.is_whitespace() || ch == '.' || Operator::from_char(ch).is_some() {
                return Err(ConfigError::ReservedSymbol(ch));
            }
        }
        if a == b {
            return Err(ConfigError::DuplicateSymbol(a));
        }
        Ok(Players { a, b })
    }

    /// Variable symbol of a player.
    #[inline]
    pub fn symbol(&self, player: PlayerId) -> char {
        match player {
            PlayerId::A => self.a,
            PlayerId::B => self.b,
        }
    }

    /// Player owning a symbol, if any.
    #[inline]
    pub fn player_for(&self, symbol: char) -> Option<PlayerId> {
        if symbol == self.a {
            Some(PlayerId::A)
        } else if symbol == self.b {
            Some(PlayerId::B)
        } else {
            None
        }
    }

    /// Symbols `player` may place: digits, operators, then their own variable.
    pub fn palette(&self, player: PlayerId) -> Vec<char> {
        ('0'..='9')
            .chain(Operator::ALL.iter().map(|op| op.as_char()))
            .chain(std::iter::once(self.symbol(player)))
            .collect()
    }

    /// Check a raw run as a winning equation for `player`.
    pub fn validate(&self, raw: &str, player: PlayerId) -> Option<BigInt> {
        equation::validate(raw, self.symbol(player), self.symbol(player.opponent()))
    }

    /// Scan the board for the first winning line of `player`.
    pub fn find_win(&self, board: &Board, player: PlayerId) -> Option<WinResult> {
        scan::find_win(board, self, self.symbol(player))
    }

    /// Placement rule for `mover` dropping their variable at `(row, col)`.
    pub fn can_place_variable(&self, board: &Board, row: usize, col: usize, mover: PlayerId) -> bool {
        placement::can_place_variable(board, row, col, mover, mover.opponent())
    }
}

impl Default for Players {
    fn default() -> Self {
        Players { a: 'x', b: 'y' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbols() {
        let players = Players::default();
        assert_eq!(players.symbol(PlayerId::A), 'x');
        assert_eq!(players.symbol(PlayerId::B), 'y');
        assert_eq!(players.player_for('x'), Some(PlayerId::A));
        assert_eq!(players.player_for('y'), Some(PlayerId::B));
        assert_eq!(players.player_for('z'), None);
    }

    #[test]
    fn test_rejects_bad_symbols() {
        assert_eq!(Players::new('x', 'x'), Err(ConfigError::DuplicateSymbol('x')));
        assert_eq!(Players::new('1', 'y'), Err(ConfigError::ReservedSymbol('1')));
        assert_eq!(Players::new('x', '='), Err(ConfigError::ReservedSymbol('=')));
        assert_eq!(Players::new(' ', 'y'), Err(ConfigError::ReservedSymbol(' ')));
        assert!(Players::new('a', 'b').is_ok());
    }

    #[test]
    fn test_palette() {
        let players = Players::new('p', 'q').unwrap();
        let palette: String = players.palette(PlayerId::B).into_iter().collect();
        assert_eq!(palette, "0123456789+-*/=q");
        assert!(!players.palette(PlayerId::A).contains(&'q'));
    }

    #[test]
    fn test_custom_symbols_validate() {
        let players = Players::new('p', 'q').unwrap();
        assert_eq!(players.validate("p+1=3", PlayerId::A), Some(BigInt::from(2)));
        assert_eq!(players.validate("q*3=12", PlayerId::B), Some(BigInt::from(4)));
        // the other player's variable spoils the line
        assert_eq!(players.validate("p+q=3", PlayerId::A), None);
        // default symbols carry no meaning here
        assert_eq!(players.validate("x+1=3", PlayerId::A), None);
    }
}
