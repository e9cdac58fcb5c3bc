//! Fixture-driven checks of the engine entry points.
//!
//! Loads `tests/fixtures/cases.json` and verifies:
//! - `validate` on raw character runs
//! - `find_win` on whole boards (text, solution and coordinates)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eqline_core::{find_win, validate, Board, Players};
use num::BigInt;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Cases {
    version: String,
    equations: Vec<EquationCase>,
    boards: Vec<BoardCase>,
}

#[derive(Debug, Deserialize)]
struct EquationCase {
    raw: String,
    variable: char,
    opponent: char,
    solution: Option<String>,
    description: String,
}

#[derive(Debug, Deserialize)]
struct BoardCase {
    rows: Vec<String>,
    variable: char,
    win: Option<WinCase>,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WinCase {
    equation_text: String,
    solution: String,
    coordinates: Vec<[usize; 2]>,
}

fn load_cases() -> Cases {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cases.json");
    let file = File::open(&path).expect("Failed to open fixture file");
    serde_json::from_reader(BufReader::new(file)).expect("Failed to parse fixture JSON")
}

fn parse_solution(text: &str) -> BigInt {
    text.parse().expect("fixture solution is not an integer")
}

#[test]
fn test_equation_fixtures() {
    let cases = load_cases();
    assert_eq!(cases.version, "1");

    let mut failures = Vec::new();
    for case in &cases.equations {
        let expected = case.solution.as_deref().map(parse_solution);
        let actual = validate(&case.raw, case.variable, case.opponent);
        if actual != expected {
            failures.push(format!(
                "{} ({:?}): expected {:?}, got {:?}",
                case.description, case.raw, expected, actual
            ));
        }
    }
    assert!(failures.is_empty(), "equation failures:\n{}", failures.join("\n"));
}

#[test]
fn test_board_fixtures() {
    let cases = load_cases();
    let players = Players::default();

    for case in &cases.boards {
        let board = Board::from_rows(&case.rows, &players).expect("fixture board is valid");
        let found = find_win(&board, &players, case.variable);

        match (&case.win, found) {
            (None, None) => {}
            (Some(expected), Some(win)) => {
                assert_eq!(win.equation_text, expected.equation_text, "{}", case.description);
                assert_eq!(win.solution, parse_solution(&expected.solution), "{}", case.description);
                let coords: Vec<[usize; 2]> = win.coordinates.iter().map(|&(r, c)| [r, c]).collect();
                assert_eq!(coords, expected.coordinates, "{}", case.description);
                assert_eq!(players.symbol(win.winner), case.variable, "{}", case.description);
            }
            (expected, found) => panic!(
                "{}: expected {:?}, found {:?}",
                case.description,
                expected.as_ref().map(|w| &w.equation_text),
                found.map(|w| w.equation_text)
            ),
        }
    }
}
