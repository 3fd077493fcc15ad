//! Continued fractions: the rational and quadratic tests of the classifier.
//!
//! Model
//! - `expand` produces the trusted partial quotients of α in f64. The leading
//!   term `a0` (with `q = 1`) is always kept; later terms stop when the fraction terminates, when a term leaves the exact i64
//!   range, or once `q_k² · ε · max(1,|α|)` exceeds `cf_noise_margin` (beyond
//!   that point rounding error dominates the tail `x_k`).
//! - Rational: the first convergent `p/q` with `q <= max_denominator` within
//!   tolerance of α.
//! - Quadratic (Lagrange): the trusted terms are eventually periodic. The
//!   period is turned back into an exact quadratic `A x² + B x + C` through the
//!   Möbius maps of the preperiod and period blocks, and the certificate is kept
//!   only if its root reproduces α.
//! - A certificate can also be built from integer coefficients found by a
//!   relation search (`QuadraticCertificate::from_coefficients`).

use serde::Serialize;

use crate::cfg::ClassifyCfg;

/// Convergent `p/q` (lowest terms, `q > 0`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Convergent {
    pub p: i128,
    pub q: i128,
}

/// Trusted expansion `[a0; a1, a2, …]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuedFraction {
    pub terms: Vec<i64>,
    pub convergents: Vec<Convergent>,
    /// True if the remainder vanished (α is a finite continued fraction in f64).
    pub terminated: bool,
}

/// `α ≈ numerator / denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RationalCertificate {
    pub numerator: i64,
    pub denominator: i64,
    pub error: f64,
}

/// Where a quadratic certificate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadraticSource {
    /// Eventually periodic continued fraction.
    PeriodicExpansion,
    /// Bounded search for `A x² + B x + C`.
    IntegerRelation,
    /// Quadratic factor of a reducible cubic relation.
    CubicFactor,
}

/// `A α² + B α + C ≈ 0`, with the continued-fraction period when the
/// certificate came from the expansion (both empty otherwise).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuadraticCertificate {
    pub source: QuadraticSource,
    pub preperiod: Vec<i64>,
    pub period: Vec<i64>,
    /// `(A, B, C)`, gcd-reduced with `A > 0`.
    pub coefficients: (i64, i64, i64),
    /// Root of the periodic continued fraction (or of the quadratic) closest
    /// to α, evaluated in f64.
    pub reconstructed: f64,
    pub error: f64,
}

impl QuadraticCertificate {
    pub fn eval(&self, x: f64) -> f64 {
        let (a, b, c) = self.coefficients;
        (a as f64 * x + b as f64) * x + c as f64
    }

    /// Certificate for `A x² + B x + C` with real irrational roots; the
    /// coefficients are gcd-reduced with `A > 0`. `None` for a degenerate or
    /// rational-rooted quadratic.
    pub fn from_coefficients(
        alpha: f64,
        (a, b, c): (i64, i64, i64),
        source: QuadraticSource,
    ) -> Option<Self> {
        let coefficients = normalize(a as i128, b as i128, c as i128)?;
        let (a, b, c) = coefficients;
        let disc = (b as i128) * (b as i128) - 4 * (a as i128) * (c as i128);
        let root = (disc as f64).sqrt();
        if disc <= 0 || (root.round() as i128).pow(2) == disc {
            return None;
        }
        let reconstructed = [(-b as f64 + root), (-b as f64 - root)]
            .map(|n| n / (2.0 * a as f64))
            .into_iter()
            .min_by(|x, y| (x - alpha).abs().total_cmp(&(y - alpha).abs()))?;
        Some(Self {
            source,
            preperiod: Vec::new(),
            period: Vec::new(),
            coefficients,
            reconstructed,
            error: (reconstructed - alpha).abs(),
        })
    }
}

/// Trusted partial quotients of α.
pub fn expand(alpha: f64, cfg: &ClassifyCfg) -> ContinuedFraction {
    let mut terms = Vec::new();
    let mut convergents = Vec::new();
    let mut terminated = false;
    let scale = 1f64.max(alpha.abs());
    // (p_{k-1}, p_{k-2}), (q_{k-1}, q_{k-2})
    let (mut p1, mut p0) = (1i128, 0i128);
    let (mut q1, mut q0) = (0i128, 1i128);
    let mut x = alpha;

    for _ in 0..cfg.cf_max_terms {
        if !x.is_finite() {
            break;
        }
        let f = x.floor();
        if f.abs() >= 9_007_199_254_740_992.0 {
            break;
        }
        let a = f as i64;
        let Some((p, q)) = next_convergent(a, (p1, p0), (q1, q0)) else {
            break;
        };
        let qf = q as f64;
        if !terms.is_empty() && qf * qf * f64::EPSILON * scale > cfg.cf_noise_margin {
            break;
        }
        terms.push(a);
        convergents.push(Convergent { p, q });
        (p1, p0, q1, q0) = (p, p1, q, q1);

        let frac = x - f;
        if frac <= f64::EPSILON * 1f64.max(x.abs()) {
            terminated = true;
            break;
        }
        x = 1.0 / frac;
    }
    ContinuedFraction {
        terms,
        convergents,
        terminated,
    }
}

/// Rational test via convergents.
pub fn rational_certificate(
    alpha: f64,
    cf: &ContinuedFraction,
    cfg: &ClassifyCfg,
) -> Option<RationalCertificate> {
    let tol = cfg.precision * 1f64.max(alpha.abs());
    cf.convergents
        .iter()
        .take_while(|c| c.q <= cfg.max_denominator as i128)
        .find_map(|c| {
            let error = (alpha - c.p as f64 / c.q as f64).abs();
            if error > tol {
                return None;
            }
            Some(RationalCertificate {
                numerator: i64::try_from(c.p).ok()?,
                denominator: i64::try_from(c.q).ok()?,
                error,
            })
        })
}

/// Smallest `(preperiod, period)` such that the terms repeat with that period
/// over the whole tail, the preperiod is at most a third of the window, and
/// the tail spans at least `max(min_tail, 2·period)` terms.
pub fn find_period(terms: &[i64], min_tail: usize) -> Option<(usize, usize)> {
    let n = terms.len();
    for s in 0..=n / 3 {
        let tail = n - s;
        for p in 1..=tail / 2 {
            if tail < min_tail.max(2 * p) {
                continue;
            }
            if (s..n - p).all(|k| terms[k] == terms[k + p]) {
                return Some((s, p));
            }
        }
    }
    None
}

/// Quadratic test: periodic trusted expansion plus exact reconstruction.
pub fn quadratic_certificate(
    alpha: f64,
    cf: &ContinuedFraction,
    cfg: &ClassifyCfg,
) -> Option<QuadraticCertificate> {
    if cf.terminated {
        return None;
    }
    let (s, p) = find_period(&cf.terms, cfg.cf_min_tail)?;
    let preperiod = &cf.terms[..s];
    let period = &cf.terms[s..s + p];

    // α = (p1 y + p0) / (q1 y + q0) for the tail y = [period; y]
    let (pp1, pp0, pq1, pq0) = block_matrix(preperiod)?;
    // y = (P1 y + P0) / (Q1 y + Q0)  ⇒  Q1 y² + (Q0 - P1) y - P0 = 0
    let (bp1, bp0, bq1, bq0) = block_matrix(period)?;
    let r = bq0.checked_sub(bp1)?;
    let s_coef = bp0.checked_neg()?;

    let (rf, q1f, p0f) = (r as f64, bq1 as f64, bp0 as f64);
    let disc = rf * rf + 4.0 * q1f * p0f;
    if q1f <= 0.0 || disc < 0.0 {
        return None;
    }
    let y = (-rf + disc.sqrt()) / (2.0 * q1f);
    let reconstructed = (pp1 as f64 * y + pp0 as f64) / (pq1 as f64 * y + pq0 as f64);
    let error = (reconstructed - alpha).abs();
    if !(error <= cfg.precision * 1f64.max(alpha.abs())) {
        return None;
    }

    let coefficients = substitute(bq1, r, s_coef, (pp1, pp0, pq1, pq0))?;
    tracing::debug!(s, p, ?coefficients, error, "quadratic_period");
    Some(QuadraticCertificate {
        source: QuadraticSource::PeriodicExpansion,
        preperiod: preperiod.to_vec(),
        period: period.to_vec(),
        coefficients,
        reconstructed,
        error,
    })
}

#[inline]
fn next_convergent(a: i64, p: (i128, i128), q: (i128, i128)) -> Option<(i128, i128)> {
    let a = a as i128;
    let pn = a.checked_mul(p.0)?.checked_add(p.1)?;
    let qn = a.checked_mul(q.0)?.checked_add(q.1)?;
    Some((pn, qn))
}

/// Last two convergents `(p_{n-1}, p_{n-2}, q_{n-1}, q_{n-2})` of a block; the
/// empty block is the identity map.
fn block_matrix(block: &[i64]) -> Option<(i128, i128, i128, i128)> {
    let (mut p1, mut p0, mut q1, mut q0) = (1i128, 0i128, 0i128, 1i128);
    for &a in block {
        let (p, q) = next_convergent(a, (p1, p0), (q1, q0))?;
        (p1, p0, q1, q0) = (p, p1, q, q1);
    }
    Some((p1, p0, q1, q0))
}

/// Substitute `y = (q0 α - p0) / (p1 - q1 α)` into `Q1 y² + R y + S = 0` and
/// clear denominators; returns reduced `(A, B, C)` with `A > 0`.
fn substitute(
    big_q1: i128,
    r: i128,
    s: i128,
    (p1, p0, q1, q0): (i128, i128, i128, i128),
) -> Option<(i64, i64, i64)> {
    let mul = |x: i128, y: i128| x.checked_mul(y);
    let a = mul(mul(big_q1, q0)?, q0)?
        .checked_sub(mul(mul(r, q0)?, q1)?)?
        .checked_add(mul(mul(s, q1)?, q1)?)?;
    let b = mul(mul(-2 * big_q1, q0)?, p0)?
        .checked_add(mul(r, mul(q0, p1)?.checked_add(mul(p0, q1)?)?)?)?
        .checked_sub(mul(mul(2 * s, p1)?, q1)?)?;
    let c = mul(mul(big_q1, p0)?, p0)?
        .checked_sub(mul(mul(r, p0)?, p1)?)?
        .checked_add(mul(mul(s, p1)?, p1)?)?;
    normalize(a, b, c)
}

/// Divide out the content and make the leading coefficient positive.
fn normalize(a: i128, b: i128, c: i128) -> Option<(i64, i64, i64)> {
    if a == 0 {
        return None;
    }
    let g = gcd(gcd(a.unsigned_abs(), b.unsigned_abs()), c.unsigned_abs()) as i128;
    let sign = if a < 0 { -1 } else { 1 };
    let norm = |x: i128| i64::try_from(sign * x / g).ok();
    Some((norm(a)?, norm(b)?, norm(c)?))
}

fn gcd(mut x: u128, mut y: u128) -> u128 {
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x
}
