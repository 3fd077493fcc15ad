//! Minimal polynomial extraction by bounded integer-relation search.
//!
//! - `extract_minimal_polynomial`: monic cubic `x³ + a x² + b x + c` with
//!   `a, b, c ∈ [-B, B]` vanishing at α within tolerance.
//! - `find_monic_relation`: the same search for any degree `d ≥ 1`; the free
//!   coefficients run through an odometer and the constant term is solved by
//!   rounding, so a degree-d search costs `(2B+1)^(d-1)` evaluations.
//! - `find_quadratic_relation`: primitive non-monic `A x² + B x + C` with
//!   `1 <= A <= bound` and `|B|, |C| <= bound`, irreducible over ℚ.
//!
//! Candidates are accepted when `|p(α)| <= tol · max(1, |α|^d)`. The smallest
//! `Σ|c_i|` wins; ties break lexicographically (highest coefficient first) so
//! repeated searches return the same relation.

use std::fmt;

use serde::Serialize;

use crate::cfg::ClassifyCfg;

/// Monic cubic `x³ + a x² + b x + c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MinimalPolynomial {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl MinimalPolynomial {
    #[inline]
    pub fn new(a: i64, b: i64, c: i64) -> Self {
        Self { a, b, c }
    }

    /// Horner evaluation in f64.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        ((x + self.a as f64) * x + self.b as f64) * x + self.c as f64
    }

    /// Derivative `3x² + 2a x + b`.
    #[inline]
    pub fn eval_derivative(&self, x: f64) -> f64 {
        (3.0 * x + 2.0 * self.a as f64) * x + self.b as f64
    }

    /// `(a, b, c)` as an array, highest degree first (leading 1 omitted).
    #[inline]
    pub fn coefficients(&self) -> [i64; 3] {
        [self.a, self.b, self.c]
    }

    /// Integer roots; a monic cubic is reducible over ℚ iff this is non-empty.
    pub fn integer_roots(&self) -> Vec<i64> {
        if self.c == 0 {
            // x (x² + a x + b): remaining integer roots divide b, or are -a when b = 0
            let mut roots = vec![0];
            if self.b == 0 {
                roots.push(-self.a);
            } else {
                roots.extend(
                    divisors(self.b)
                        .into_iter()
                        .filter(|&r| r * r + self.a * r + self.b == 0),
                );
            }
            roots.sort_unstable();
            roots.dedup();
            return roots;
        }
        let mut roots: Vec<i64> = divisors(self.c)
            .into_iter()
            .filter(|&r| {
                let r = r as i128;
                ((r + self.a as i128) * r + self.b as i128) * r + self.c as i128 == 0
            })
            .collect();
        roots.sort_unstable();
        roots
    }

    #[inline]
    pub fn is_irreducible(&self) -> bool {
        self.integer_roots().is_empty()
    }

    /// Quotient `x² + b1 x + c1` of division by `x - r`; `None` unless `r` is a
    /// root.
    pub fn deflate(&self, r: i64) -> Option<(i64, i64)> {
        let b1 = self.a.checked_add(r)?;
        let c1 = self.b.checked_add(r.checked_mul(b1)?)?;
        let remainder = self.c.checked_add(r.checked_mul(c1)?)?;
        (remainder == 0).then_some((b1, c1))
    }
}

impl fmt::Display for MinimalPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_monic(&self.coefficients()))
    }
}

/// Monic relation `x^d + c_{d-1} x^{d-1} + … + c_0` found for α.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntegerRelation {
    /// `[c_{d-1}, …, c_0]`, highest degree first; the leading 1 is implicit.
    pub coefficients: Vec<i64>,
    /// `|p(α)|` at the accepted candidate.
    pub residual: f64,
}

impl IntegerRelation {
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(1.0, |acc, &c| acc * x + c as f64)
    }

    /// Narrow to a cubic when the degree is 3.
    pub fn as_cubic(&self) -> Option<MinimalPolynomial> {
        match self.coefficients[..] {
            [a, b, c] => Some(MinimalPolynomial::new(a, b, c)),
            _ => None,
        }
    }
}

impl fmt::Display for IntegerRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_monic(&self.coefficients))
    }
}

/// Degree-3 search with `cfg.coefficient_bound` and `cfg.precision`.
pub fn extract_minimal_polynomial(alpha: f64, cfg: &ClassifyCfg) -> Option<MinimalPolynomial> {
    let rel = find_monic_relation(alpha, 3, cfg.coefficient_bound, cfg.precision)?;
    rel.as_cubic()
}

/// Bounded search for a monic integer relation of exactly `degree`.
///
/// Returns `None` for `degree == 0`, non-finite α, or when no candidate within
/// `[-bound, bound]` satisfies the tolerance.
pub fn find_monic_relation(
    alpha: f64,
    degree: usize,
    bound: i64,
    tol: f64,
) -> Option<IntegerRelation> {
    if degree == 0 || bound < 0 || !alpha.is_finite() {
        return None;
    }
    // powers[i] = α^i
    let powers: Vec<f64> = (0..=degree)
        .scan(1.0, |acc, i| {
            let p = if i == 0 { 1.0 } else { *acc * alpha };
            *acc = p;
            Some(p)
        })
        .collect();
    let lead = powers[degree];
    let threshold = tol * 1f64.max(lead.abs());
    if !threshold.is_finite() {
        return None;
    }

    // free[k] is the coefficient of α^(degree-1-k), k < degree-1
    let n_free = degree - 1;
    let mut free = vec![-bound; n_free];
    let mut best: Option<(i64, Vec<i64>, f64)> = None;
    loop {
        let partial = free
            .iter()
            .enumerate()
            .fold(lead, |acc, (k, &ck)| acc + ck as f64 * powers[degree - 1 - k]);
        let c0 = (-partial).round();
        if c0.abs() <= bound as f64 {
            let residual = (partial + c0).abs();
            if residual <= threshold {
                let mut coeffs = free.clone();
                coeffs.push(c0 as i64);
                let weight: i64 = coeffs.iter().map(|c| c.abs()).sum();
                let better = match &best {
                    None => true,
                    Some((w, cs, _)) => (weight, &coeffs) < (*w, cs),
                };
                if better {
                    best = Some((weight, coeffs, residual));
                }
            }
        }
        if !odometer_step(&mut free, bound) {
            break;
        }
    }
    best.map(|(_, coefficients, residual)| {
        tracing::trace!(degree, ?coefficients, residual, "relation_found");
        IntegerRelation {
            coefficients,
            residual,
        }
    })
}

/// Bounded search for an irreducible integer quadratic `A x² + B x + C`
/// vanishing at α, with `1 <= A <= bound` and `|B|, |C| <= bound`.
///
/// Only primitive triples with a positive non-square discriminant are
/// candidates; a rational α never qualifies. Acceptance uses
/// `tol · max(1, α²)` and the smallest `A + |B| + |C|` wins.
pub fn find_quadratic_relation(alpha: f64, bound: i64, tol: f64) -> Option<(i64, i64, i64)> {
    if bound < 1 || !alpha.is_finite() {
        return None;
    }
    let square = alpha * alpha;
    let threshold = tol * 1f64.max(square);
    if !threshold.is_finite() {
        return None;
    }
    let mut best: Option<(i64, (i64, i64, i64))> = None;
    for a in 1..=bound {
        for b in -bound..=bound {
            let partial = a as f64 * square + b as f64 * alpha;
            let c = (-partial).round();
            if c.abs() > bound as f64 || (partial + c).abs() > threshold {
                continue;
            }
            let c = c as i64;
            if gcd(gcd(a, b), c) != 1 || !irrational_roots(a, b, c) {
                continue;
            }
            let weight = a + b.abs() + c.abs();
            if best.map_or(true, |(w, abc)| (weight, (a, b, c)) < (w, abc)) {
                best = Some((weight, (a, b, c)));
            }
        }
    }
    let (_, abc) = best?;
    tracing::trace!(?abc, "quadratic_relation_found");
    Some(abc)
}

/// Discriminant `b² - 4ac` positive and not a perfect square.
fn irrational_roots(a: i64, b: i64, c: i64) -> bool {
    let disc = (b as i128) * (b as i128) - 4 * (a as i128) * (c as i128);
    if disc <= 0 {
        return false;
    }
    let r = (disc as f64).sqrt().round() as i128;
    !(r - 1..=r + 1).any(|k| k >= 0 && k * k == disc)
}

fn gcd(x: i64, y: i64) -> i64 {
    let (mut x, mut y) = (x.unsigned_abs(), y.unsigned_abs());
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x as i64
}

/// Advance `digits` through `[-bound, bound]^n`; false once exhausted.
fn odometer_step(digits: &mut [i64], bound: i64) -> bool {
    for d in digits.iter_mut().rev() {
        if *d < bound {
            *d += 1;
            return true;
        }
        *d = -bound;
    }
    false
}

/// Signed divisors of `n` (empty for 0).
fn divisors(n: i64) -> Vec<i64> {
    let m = n.unsigned_abs();
    let mut out = Vec::new();
    let mut d: u64 = 1;
    while d.saturating_mul(d) <= m {
        if m % d == 0 {
            for v in [d, m / d] {
                let v = v as i64;
                out.push(v);
                out.push(-v);
            }
        }
        d += 1;
    }
    out.sort_unstable();
    out.dedup();
    out
}

fn format_monic(coeffs: &[i64]) -> String {
    let degree = coeffs.len();
    let mut s = monomial(degree);
    for (k, &c) in coeffs.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let power = degree - 1 - k;
        let sign = if c < 0 { " - " } else { " + " };
        let mag = c.unsigned_abs();
        s.push_str(sign);
        if power == 0 {
            s.push_str(&mag.to_string());
        } else if mag == 1 {
            s.push_str(&monomial(power));
        } else {
            s.push_str(&format!("{mag}{}", monomial(power)));
        }
    }
    s
}

fn monomial(power: usize) -> String {
    match power {
        0 => "1".to_string(),
        1 => "x".to_string(),
        p => format!("x^{p}"),
    }
}
