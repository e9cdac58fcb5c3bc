//! Win detection.
//!
//! Every cell is tried as the origin of a ray in each of the 8 directions.
//! Walking a ray accumulates a run of placed symbols; as soon as the run is
//! [`MIN_EQ_LEN`] long, every extension is validated as written and then
//! reversed. An empty cell or the board edge ends the ray.
//!
//! The first win in (origin row-major, direction, run length, forward before
//! reversed) order is reported, so repeated scans of the same board agree.

use num::BigInt;
use tracing::debug;

use crate::equation::validate;
use crate::{Board, Players, WinResult, DIRECTIONS, MIN_EQ_LEN};

/// Find the first winning line for the player whose symbol is `variable`.
///
/// Returns `None` when no line wins, or when `variable` belongs to no player.
pub fn find_win(board: &Board, players: &Players, variable: char) -> Option<WinResult> {
    let winner = players.player_for(variable)?;
    let opponent = players.symbol(winner.opponent());
    let size = board.size() as isize;

    for r0 in 0..size {
        for c0 in 0..size {
            for &(dr, dc) in &DIRECTIONS {
                if let Some((coordinates, equation_text, solution)) =
                    scan_ray(board, players, (r0, c0), (dr, dc), variable, opponent)
                {
                    debug!(%winner, equation = %equation_text, %solution, "winning line");
                    return Some(WinResult {
                        winner,
                        coordinates,
                        equation_text,
                        solution,
                    });
                }
            }
        }
    }
    None
}

type RayWin = (Vec<(usize, usize)>, String, BigInt);

fn scan_ray(
    board: &Board,
    players: &Players,
    (mut r, mut c): (isize, isize),
    (dr, dc): (isize, isize),
    variable: char,
    opponent: char,
) -> Option<RayWin> {
    let mut raw = String::new();
    let mut coords = Vec::new();

    // An empty cell or the edge ends the run; that run was already tested
    // when its last cell was appended, so there is nothing more to check.
    while let Some(ch) = board.get_signed(r, c).and_then(|cell| cell.to_char(players)) {
        raw.push(ch);
        coords.push((r as usize, c as usize));
        if coords.len() >= MIN_EQ_LEN {
            if let Some((text, solution)) = check_both_ways(&raw, variable, opponent) {
                return Some((coords, text, solution));
            }
        }
        r += dr;
        c += dc;
    }
    None
}

/// Validate a run as written, then reversed.
fn check_both_ways(raw: &str, variable: char, opponent: char) -> Option<(String, BigInt)> {
    if let Some(solution) = validate(raw, variable, opponent) {
        return Some((raw.to_string(), solution));
    }
    let reversed: String = raw.chars().rev().collect();
    validate(&reversed, variable, opponent).map(|solution| (reversed, solution))
}
