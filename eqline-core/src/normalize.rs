//! Implicit multiplication.
//!
//! Players write `2x` or `x3` on the board; the parser only understands
//! explicit `*`, so adjacent number/variable tokens get one inserted.

use crate::Operator;

/// Turn a raw run into an expression string with explicit multiplication.
///
/// Keeps digits, operators and `variable`; every other character is dropped.
///
/// ```
/// use eqline_core::normalize;
///
/// assert_eq!(normalize("2x=10", 'x'), "2*x=10");
/// assert_eq!(normalize("x12+3=x", 'x'), "x*12+3=x");
/// ```
pub fn normalize(raw: &str, variable: char) -> String {
    let kept: Vec<char> = raw
        .chars()
        .filter(|&ch| ch.is_ascii_digit() || ch == variable || Operator::from_char(ch).is_some())
        .collect();

    let mut out = String::with_capacity(kept.len() * 2);
    let mut i = 0;
    while i < kept.len() {
        let ch = kept[i];
        if ch.is_ascii_digit() {
            let start = i;
            while i < kept.len() && kept[i].is_ascii_digit() {
                i += 1;
            }
            out.extend(&kept[start..i]);
            if kept.get(i) == Some(&variable) {
                out.push('*');
            }
        } else if ch == variable {
            out.push(ch);
            if kept.get(i + 1).is_some_and(|c| c.is_ascii_digit()) {
                out.push('*');
            }
            i += 1;
        } else {
            out.push(ch);
            i += 1;
        }
    }
    out
}
