//! Randomized checks of win detection and the placement rule.

use eqline_core::{
    can_place_variable, find_win, validate, Board, Cell, Match, MoveOutcome, PlayerId, Players,
    DIRECTIONS,
};
use rand::prelude::*;

const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '-', '*', '/', '=', '=', 'x', 'y',
];

fn random_board(rng: &mut impl Rng, players: &Players) -> Board {
    let size = rng.random_range(5..=8);
    let rows: Vec<String> = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    if rng.random_bool(0.3) {
                        '.'
                    } else {
                        ALPHABET[rng.random_range(0..ALPHABET.len())]
                    }
                })
                .collect()
        })
        .collect();
    Board::from_rows(&rows, players).unwrap()
}

/// Nearest occupied cell along every ray, computed the slow way.
fn brute_force_allowed(board: &Board, row: usize, col: usize, opponent: PlayerId) -> bool {
    let n = board.size() as isize;
    for (dr, dc) in DIRECTIONS {
        for k in 1..n {
            let (r, c) = (row as isize + dr * k, col as isize + dc * k);
            if !board.in_bounds(r, c) {
                break;
            }
            match board.get(r as usize, c as usize).unwrap() {
                Cell::Empty => continue,
                Cell::Variable(p) if p == opponent => return false,
                _ => break,
            }
        }
    }
    true
}

#[test]
fn test_found_wins_are_sound() {
    let players = Players::default();
    let mut rng = rand::rng();
    let mut wins = 0;

    for _ in 0..300 {
        let board = random_board(&mut rng, &players);
        for player in PlayerId::all() {
            let symbol = players.symbol(player);
            let Some(win) = find_win(&board, &players, symbol) else {
                continue;
            };
            wins += 1;
            assert_eq!(win.winner, player);
            assert!(win.coordinates.len() >= 5);

            // the cells form one straight contiguous line
            let (r0, c0) = win.coordinates[0];
            let (r1, c1) = win.coordinates[1];
            let (dr, dc) = (r1 as isize - r0 as isize, c1 as isize - c0 as isize);
            assert!(DIRECTIONS.contains(&(dr, dc)));
            for (k, &(r, c)) in win.coordinates.iter().enumerate() {
                assert_eq!(r as isize, r0 as isize + dr * k as isize);
                assert_eq!(c as isize, c0 as isize + dc * k as isize);
            }

            // the reported text is the line as written or reversed
            let text: String = win
                .coordinates
                .iter()
                .map(|&(r, c)| board.get(r, c).unwrap().to_char(&players).unwrap())
                .collect();
            let reversed: String = text.chars().rev().collect();
            assert!(win.equation_text == text || win.equation_text == reversed);

            let opponent = players.symbol(player.opponent());
            assert!(!win.equation_text.contains(opponent));
            assert_eq!(validate(&win.equation_text, symbol, opponent), Some(win.solution.clone()));

            // scanning again gives the same answer
            assert_eq!(find_win(&board, &players, symbol), Some(win));
        }
    }
    println!("{wins} wins checked");
}

#[test]
fn test_cells_off_the_winning_line_do_not_matter() {
    let players = Players::default();
    let mut rng = rand::rng();
    let mut checked = 0;

    for _ in 0..300 {
        let board = random_board(&mut rng, &players);
        for player in PlayerId::all() {
            let symbol = players.symbol(player);
            let Some(win) = find_win(&board, &players, symbol) else {
                continue;
            };

            // empty a random subset of the cells outside the line
            let rows: Vec<String> = board
                .to_rows(&players)
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    row.chars()
                        .enumerate()
                        .map(|(c, ch)| {
                            if !win.coordinates.contains(&(r, c)) && rng.random_bool(0.5) {
                                '.'
                            } else {
                                ch
                            }
                        })
                        .collect()
                })
                .collect();
            let thinned = Board::from_rows(&rows, &players).unwrap();

            assert_eq!(find_win(&thinned, &players, symbol), Some(win), "{rows:?}");
            checked += 1;
        }
    }
    println!("{checked} thinned boards checked");
}

#[test]
fn test_placement_matches_brute_force() {
    let players = Players::default();
    let mut rng = rand::rng();

    for _ in 0..200 {
        let board = random_board(&mut rng, &players);
        for row in 0..board.size() {
            for col in 0..board.size() {
                for mover in PlayerId::all() {
                    let expected =
                        board.is_empty(row, col) && brute_force_allowed(&board, row, col, mover.opponent());
                    assert_eq!(
                        can_place_variable(&board, row, col, mover, mover.opponent()),
                        expected,
                        "({row},{col}) for {mover}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_random_matches() {
    let players = Players::default();
    let mut rng = rand::rng();

    for _ in 0..50 {
        let mut m = Match::new(6, players).unwrap();
        let mut placed = 0;

        while !m.is_over() && placed < 36 {
            let player = m.current_turn();
            let row = rng.random_range(0..6);
            let col = rng.random_range(0..6);
            let mut candidates: Vec<char> = "0123456789+-*/=".chars().collect();
            candidates.push(players.symbol(player));
            let ch = candidates[rng.random_range(0..candidates.len())];

            let mov = m.parse_move(player, row, col, ch).unwrap();
            let legal = m.check_move(&mov).is_ok();
            match m.apply(mov) {
                Ok(MoveOutcome::Continue { next }) => {
                    assert!(legal);
                    assert_eq!(next, player.opponent());
                    placed += 1;
                }
                Ok(MoveOutcome::Won { win, assisted }) => {
                    assert!(legal);
                    assert_eq!(assisted, win.winner != player);
                    assert_eq!(m.winner(), Some(&win));
                    placed += 1;
                }
                Err(_) => {
                    assert!(!legal);
                    assert_eq!(m.current_turn(), player);
                }
            }
            assert_eq!(m.board().filled(), placed);
        }
    }
}
