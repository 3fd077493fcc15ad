//! Projective triples `(v1, v2, v3)` and the single HAPD step on them.
//!
//! - A triple stands for the projective point `[v1 : v2 : v3]`; HAPD starts at
//!   `(α, α², 1)`.
//! - `integer_parts` extracts `(⌊v1/v3⌋, ⌊v2/v3⌋)` with mathematical floor and
//!   refuses degenerate denominators instead of producing NaN/Inf.
//! - `advance` applies the reduction step for a given pair of integer parts.

use serde::Serialize;

use crate::hapd::HapdStep;

/// Largest magnitude for which an f64 floor converts to i64 exactly.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Point in projective 3-space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triple {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
}

impl Triple {
    #[inline]
    pub fn new(v1: f64, v2: f64, v3: f64) -> Self {
        Self { v1, v2, v3 }
    }

    /// Initial triple `(α, α², 1)`.
    #[inline]
    pub fn from_alpha(alpha: f64) -> Self {
        Self::new(alpha, alpha * alpha, 1.0)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.v1.is_finite() && self.v2.is_finite() && self.v3.is_finite()
    }

    /// `(⌊v1/v3⌋, ⌊v2/v3⌋)`, or `None` if `|v3| < eps` or a quotient does not
    /// fit an i64 exactly.
    pub fn integer_parts(&self, eps: f64) -> Option<HapdStep> {
        if !(self.v3.abs() >= eps) {
            return None;
        }
        let a1 = exact_floor(self.v1 / self.v3)?;
        let a2 = exact_floor(self.v2 / self.v3)?;
        Some(HapdStep { a1, a2 })
    }

    /// One reduction step:
    /// `r1 = v1 - a1 v3`, `r2 = v2 - a2 v3`, `v3' = v3 - a1 r1 - a2 r2`.
    #[inline]
    pub fn advance(&self, step: HapdStep) -> Triple {
        let a1 = step.a1 as f64;
        let a2 = step.a2 as f64;
        let r1 = self.v1 - a1 * self.v3;
        let r2 = self.v2 - a2 * self.v3;
        let v3 = self.v3 - a1 * r1 - a2 * r2;
        Triple::new(r1, r2, v3)
    }

    /// Component-wise match: `|x - y| <= tol · max(1, |x|, |y|)`.
    #[inline]
    pub fn approx_eq(&self, other: &Triple, tol: f64) -> bool {
        close(self.v1, other.v1, tol) && close(self.v2, other.v2, tol) && close(self.v3, other.v3, tol)
    }

    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.v1, self.v2, self.v3]
    }
}

#[inline]
fn close(x: f64, y: f64, tol: f64) -> bool {
    (x - y).abs() <= tol * 1f64.max(x.abs()).max(y.abs())
}

#[inline]
fn exact_floor(q: f64) -> Option<i64> {
    if !q.is_finite() {
        return None;
    }
    let f = q.floor();
    if f.abs() >= EXACT_INT_LIMIT {
        return None;
    }
    Some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        let t = Triple::new(-0.5, -2.25, 1.0);
        let s = t.integer_parts(1e-12).unwrap();
        assert_eq!(s, HapdStep { a1: -1, a2: -3 });
        // negative denominator flips the quotient sign
        let t = Triple::new(0.3, 2.5, -1.0);
        let s = t.integer_parts(1e-12).unwrap();
        assert_eq!(s, HapdStep { a1: -1, a2: -3 });
    }

    #[test]
    fn degenerate_denominator_is_refused() {
        assert!(Triple::new(1.0, 1.0, 0.0).integer_parts(1e-12).is_none());
        assert!(Triple::new(1.0, 1.0, 1e-15).integer_parts(1e-12).is_none());
        assert!(Triple::new(1e300, 1.0, 1.0).integer_parts(1e-12).is_none());
        assert!(Triple::new(f64::NAN, 1.0, 1.0).integer_parts(1e-12).is_none());
    }

    #[test]
    fn advance_matches_formula() {
        let t = Triple::new(1.5, 2.25, 1.0);
        let s = t.integer_parts(1e-12).unwrap();
        assert_eq!(s, HapdStep { a1: 1, a2: 2 });
        let n = t.advance(s);
        // r1 = 0.5, r2 = 0.25, v3 = 1 - 0.5 - 0.5 = 0
        assert!((n.v1 - 0.5).abs() < 1e-15);
        assert!((n.v2 - 0.25).abs() < 1e-15);
        assert!(n.v3.abs() < 1e-15);
    }

    #[test]
    fn boundary_alphas_do_not_produce_nan() {
        for alpha in [0.0, 1.0, -1.0] {
            let t = Triple::from_alpha(alpha);
            let s = t.integer_parts(1e-12).unwrap();
            let n = t.advance(s);
            assert!(n.is_finite(), "alpha={alpha} gave {n:?}");
        }
    }

    #[test]
    fn approx_eq_is_relative_for_large_values() {
        let a = Triple::new(1e6, 1.0, 0.0);
        let b = Triple::new(1e6 + 1e-5, 1.0, 1e-11);
        assert!(a.approx_eq(&b, 1e-10));
        let c = Triple::new(1e6, 1.0, 1e-8);
        assert!(!a.approx_eq(&c, 1e-10));
    }
}
