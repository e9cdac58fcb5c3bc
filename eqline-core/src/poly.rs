//! Exact Laurent polynomials in one unknown, and their integer roots.
//!
//! Every expression the parser accepts reduces to `Σ c_k · v^k` with
//! rational `c_k` and integer (possibly negative) `k`: divisors are always a
//! single signed literal or the signed variable, so division never leaves
//! this ring. Zero coefficients are never stored, which makes derived
//! equality structural equality of the normal form.

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num::{BigInt, BigRational, FromPrimitive, Integer, One, Signed, ToPrimitive, Zero};

/// Bisection steps per isolating interval; f64 runs out of bits well before.
const BISECT_STEPS: usize = 200;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub(crate) struct Laurent {
    /// exponent -> non-zero coefficient
    terms: BTreeMap<i32, BigRational>,
}

impl Laurent {
    pub fn zero() -> Laurent {
        Laurent::default()
    }

    pub fn integer(value: BigInt) -> Laurent {
        let mut p = Laurent::zero();
        p.add_term(0, BigRational::from_integer(value));
        p
    }

    pub fn variable() -> Laurent {
        let mut p = Laurent::zero();
        p.add_term(1, BigRational::one());
        p
    }

    fn add_term(&mut self, exp: i32, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        let entry = self.terms.entry(exp).or_insert_with(BigRational::zero);
        *entry += coeff;
        if entry.is_zero() {
            self.terms.remove(&exp);
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// True if some term carries a non-zero power of the unknown.
    #[inline]
    pub fn has_variable(&self) -> bool {
        self.terms.keys().any(|&e| e != 0)
    }

    /// True if the expression is undefined at zero.
    #[inline]
    pub fn has_negative_power(&self) -> bool {
        self.terms.keys().next().is_some_and(|&e| e < 0)
    }

    /// Divide by a monomial. `None` for a zero or multi-term divisor.
    pub fn checked_div(&self, divisor: &Laurent) -> Option<Laurent> {
        if divisor.terms.len() != 1 {
            return None;
        }
        let (&exp, coeff) = divisor.terms.iter().next()?;
        let mut out = Laurent::zero();
        for (&e, c) in &self.terms {
            out.add_term(e - exp, c / coeff);
        }
        Some(out)
    }

    /// Integer solutions of `self = 0`, ascending.
    ///
    /// Returns `None` when every value solves it (the zero polynomial).
    pub fn integer_roots(&self) -> Option<Vec<BigInt>> {
        let (&lo, &hi) = match (self.terms.keys().next(), self.terms.keys().next_back()) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return None,
        };

        // Dividing out v^lo leaves a polynomial with a non-zero constant term.
        let lcm = self
            .terms
            .values()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let mut coeffs = vec![BigInt::zero(); (hi - lo) as usize + 1];
        for (&e, c) in &self.terms {
            coeffs[(e - lo) as usize] = (c * BigRational::from_integer(lcm.clone())).to_integer();
        }

        let mut roots = roots_with_constant_term(&coeffs);
        if lo > 0 {
            roots.push(BigInt::zero());
        }
        roots.sort();
        roots.dedup();
        Some(roots)
    }
}

impl Add for Laurent {
    type Output = Laurent;

    fn add(mut self, rhs: Laurent) -> Laurent {
        for (e, c) in rhs.terms {
            self.add_term(e, c);
        }
        self
    }
}

impl Neg for Laurent {
    type Output = Laurent;

    fn neg(self) -> Laurent {
        Laurent {
            terms: self.terms.into_iter().map(|(e, c)| (e, -c)).collect(),
        }
    }
}

impl Sub for Laurent {
    type Output = Laurent;

    fn sub(self, rhs: Laurent) -> Laurent {
        self + (-rhs)
    }
}

impl Mul for Laurent {
    type Output = Laurent;

    fn mul(self, rhs: Laurent) -> Laurent {
        let mut out = Laurent::zero();
        for (ea, ca) in &self.terms {
            for (eb, cb) in &rhs.terms {
                out.add_term(ea + eb, ca * cb);
            }
        }
        out
    }
}

/// Integer roots of `a[0] + a[1]·v + … + a[n]·v^n` where `a[0] != 0`.
fn roots_with_constant_term(a: &[BigInt]) -> Vec<BigInt> {
    match a.len() {
        0 | 1 => Vec::new(),
        2 => {
            let (q, r) = (-&a[0]).div_rem(&a[1]);
            if r.is_zero() {
                vec![q]
            } else {
                Vec::new()
            }
        }
        3 => quadratic_roots(&a[2], &a[1], &a[0]),
        _ => numeric_roots(a),
    }
}

/// Exact integer roots of `a·v² + b·v + c`.
fn quadratic_roots(a: &BigInt, b: &BigInt, c: &BigInt) -> Vec<BigInt> {
    let disc = b * b - BigInt::from(4) * a * c;
    if disc.is_negative() {
        return Vec::new();
    }
    let s = disc.sqrt();
    if &s * &s != disc {
        return Vec::new();
    }
    let two_a = a * BigInt::from(2);
    [-b - &s, -b + &s]
        .into_iter()
        .filter_map(|numer| {
            let (q, r) = numer.div_rem(&two_a);
            r.is_zero().then_some(q)
        })
        .collect()
}

/// Degree three and up: isolate real roots in f64, then confirm each
/// nearby integer exactly.
fn numeric_roots(a: &[BigInt]) -> Vec<BigInt> {
    let floats: Option<Vec<f64>> = a
        .iter()
        .map(|c| c.to_f64().filter(|f| f.is_finite()))
        .collect();
    let Some(floats) = floats else {
        return Vec::new();
    };

    let mut roots = Vec::new();
    for approx in real_roots(&floats) {
        if !approx.is_finite() {
            continue;
        }
        let base = approx.round();
        for delta in [-1.0, 0.0, 1.0] {
            if let Some(candidate) = BigInt::from_f64(base + delta) {
                if evaluate(a, &candidate).is_zero() {
                    roots.push(candidate);
                }
            }
        }
    }
    roots
}

/// Horner evaluation with exact integers.
fn evaluate(a: &[BigInt], v: &BigInt) -> BigInt {
    a.iter()
        .rev()
        .fold(BigInt::zero(), |acc, c| acc * v + c)
}

fn evaluate_f64(a: &[f64], v: f64) -> f64 {
    a.iter().rev().fold(0.0, |acc, c| acc * v + c)
}

/// Approximate real roots (and critical points, which catch roots of even
/// multiplicity) of a polynomial with non-zero leading coefficient.
fn real_roots(a: &[f64]) -> Vec<f64> {
    let n = a.len() - 1;
    match n {
        0 => return Vec::new(),
        1 => return vec![-a[0] / a[1]],
        _ => {}
    }

    let lead = a[n];
    let bound = 1.0
        + a[..n]
            .iter()
            .map(|c| (c / lead).abs())
            .fold(0.0, f64::max);

    let derivative: Vec<f64> = a[1..]
        .iter()
        .enumerate()
        .map(|(i, c)| c * (i + 1) as f64)
        .collect();
    let critical = real_roots(&derivative);

    let mut points = vec![-bound, bound];
    points.extend(critical.iter().copied().filter(|p| p.abs() < bound));
    points.sort_by(f64::total_cmp);

    let mut roots: Vec<f64> = points
        .windows(2)
        .filter_map(|w| bisect(a, w[0], w[1]))
        .collect();
    roots.extend(critical);
    roots
}

fn bisect(a: &[f64], mut lo: f64, mut hi: f64) -> Option<f64> {
    let mut f_lo = evaluate_f64(a, lo);
    let f_hi = evaluate_f64(a, hi);
    if f_lo == 0.0 {
        return Some(lo);
    }
    if f_hi == 0.0 {
        return Some(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return None;
    }
    for _ in 0..BISECT_STEPS {
        let mid = lo + (hi - lo) / 2.0;
        if mid == lo || mid == hi {
            break;
        }
        let f_mid = evaluate_f64(a, mid);
        if f_mid == 0.0 {
            return Some(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Some(lo + (hi - lo) / 2.0)
}
