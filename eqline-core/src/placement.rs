//! Variable placement rule.
//!
//! A player may drop their variable on a cell only if, along each of the 8
//! rays from that cell, the nearest occupied cell is not the opponent's
//! variable. Digits, operators and the mover's own variable all shield the
//! cell from anything further along the ray.

use crate::{Board, Cell, PlayerId, DIRECTIONS};

/// Check whether `mover` may place their variable at `(row, col)`.
///
/// Out-of-range or occupied targets are never legal, and neither is a call
/// naming the same player as mover and opponent.
pub fn can_place_variable(
    board: &Board,
    row: usize,
    col: usize,
    mover: PlayerId,
    opponent: PlayerId,
) -> bool {
    if mover == opponent || !board.is_empty(row, col) {
        return false;
    }
    DIRECTIONS
        .iter()
        .all(|&step| nearest_is_not(board, (row as isize, col as isize), step, opponent))
}

fn nearest_is_not(
    board: &Board,
    (row, col): (isize, isize),
    (dr, dc): (isize, isize),
    opponent: PlayerId,
) -> bool {
    let (mut r, mut c) = (row + dr, col + dc);
    while let Some(cell) = board.get_signed(r, c) {
        match cell {
            Cell::Empty => {}
            Cell::Variable(p) => return p != opponent,
            _ => return true,
        }
        r += dr;
        c += dc;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Players;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows, &Players::default()).unwrap()
    }

    fn allowed(b: &Board, row: usize, col: usize, mover: PlayerId) -> bool {
        can_place_variable(b, row, col, mover, mover.opponent())
    }

    #[test]
    fn test_empty_board_allows_everywhere() {
        let b = Board::new(6).unwrap();
        for row in 0..6 {
            for col in 0..6 {
                assert!(allowed(&b, row, col, PlayerId::A));
                assert!(allowed(&b, row, col, PlayerId::B));
            }
        }
    }

    #[test]
    fn test_blocked_by_opponent_in_line() {
        let b = board(&["y.....", "......", "......", "......", "......", "......"]);
        // same row, far end
        assert!(!allowed(&b, 0, 5, PlayerId::A));
        // same column
        assert!(!allowed(&b, 4, 0, PlayerId::A));
        // diagonal
        assert!(!allowed(&b, 3, 3, PlayerId::A));
        // knight's move away is off every ray
        assert!(allowed(&b, 1, 2, PlayerId::A));
        // own variable never blocks
        assert!(allowed(&b, 0, 5, PlayerId::B));
    }

    #[test]
    fn test_shielded_by_nearer_symbol() {
        let b = board(&["y.3...", "......", "......", "......", "......", "......"]);
        assert!(allowed(&b, 0, 4, PlayerId::A));
        assert!(!allowed(&b, 0, 1, PlayerId::A));

        let b = board(&["y.x...", "......", "......", "......", "......", "......"]);
        assert!(allowed(&b, 0, 4, PlayerId::A));
    }

    #[test]
    fn test_every_direction_blocks() {
        let b = board(&[".....", ".....", "..y..", ".....", "....."]);
        for row in 0..5 {
            for col in 0..5 {
                if (row, col) == (2, 2) {
                    continue;
                }
                // every cell of a 5x5 board lies on a ray from the centre
                // except the eight knight's-move cells
                let dr = (row as isize - 2).abs();
                let dc = (col as isize - 2).abs();
                let on_ray = dr == 0 || dc == 0 || dr == dc;
                assert_eq!(allowed(&b, row, col, PlayerId::A), !on_ray, "({row},{col})");
            }
        }
    }

    #[test]
    fn test_same_player_twice_is_refused() {
        let b = Board::new(6).unwrap();
        assert!(!can_place_variable(&b, 2, 2, PlayerId::A, PlayerId::A));
        assert!(!can_place_variable(&b, 2, 2, PlayerId::B, PlayerId::B));
        assert!(can_place_variable(&b, 2, 2, PlayerId::A, PlayerId::B));
    }

    #[test]
    fn test_out_of_range_and_occupied() {
        let b = board(&["1...", "....", "....", "...."]);
        assert!(!allowed(&b, 4, 0, PlayerId::A));
        assert!(!allowed(&b, 0, 4, PlayerId::A));
        assert!(!allowed(&b, 0, 0, PlayerId::A));
    }
}
