//! Real roots of monic cubics (eigenvalues of the companion matrix).
//!
//! Closed form on the depressed cubic `t³ + p t + q` with `x = t - a/3`:
//! trigonometric method when the discriminant is non-negative (three real
//! roots, possibly repeated), Cardano otherwise (one real root). Every root is
//! then polished with a few Newton steps on the original cubic.

use std::f64::consts::PI;

use crate::poly::MinimalPolynomial;

const NEWTON_STEPS: usize = 4;

/// Real roots of `x³ + a x² + b x + c`, ascending.
pub fn real_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;
    let shift = -a / 3.0;
    let disc = -4.0 * p * p * p - 27.0 * q * q;

    let mut roots = if disc >= 0.0 {
        let r = (-p / 3.0).max(0.0).sqrt();
        let cos_arg = if r < 1e-15 {
            0.0
        } else {
            (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0)
        };
        let theta = cos_arg.acos();
        let two_r = 2.0 * r;
        vec![
            two_r * (theta / 3.0).cos() + shift,
            two_r * ((theta + 2.0 * PI) / 3.0).cos() + shift,
            two_r * ((theta + 4.0 * PI) / 3.0).cos() + shift,
        ]
    } else {
        let sqrt_disc = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = (-q / 2.0 + sqrt_disc).cbrt();
        let v = (-q / 2.0 - sqrt_disc).cbrt();
        vec![u + v + shift]
    };

    for x in roots.iter_mut() {
        *x = polish(*x, a, b, c);
    }
    roots.sort_by(|x, y| x.total_cmp(y));
    roots
}

/// Eigenvalues of the companion matrix of `p`: the root closest to `alpha`
/// first, the others ascending.
pub fn eigenvalues_for(alpha: f64, p: &MinimalPolynomial) -> Vec<f64> {
    let mut roots = real_roots(p.a as f64, p.b as f64, p.c as f64);
    if let Some(k) = nearest(&roots, alpha) {
        let first = roots.remove(k);
        roots.insert(0, first);
    }
    roots
}

/// Index of the root closest to `x`.
pub fn nearest(roots: &[f64], x: f64) -> Option<usize> {
    roots
        .iter()
        .enumerate()
        .min_by(|(_, r), (_, s)| (*r - x).abs().total_cmp(&(*s - x).abs()))
        .map(|(k, _)| k)
}

fn polish(mut x: f64, a: f64, b: f64, c: f64) -> f64 {
    for _ in 0..NEWTON_STEPS {
        let f = ((x + a) * x + b) * x + c;
        let df = (3.0 * x + 2.0 * a) * x + b;
        if df == 0.0 || !df.is_finite() {
            break;
        }
        let next = x - f / df;
        if !next.is_finite() {
            break;
        }
        // keep the closed-form value if Newton wanders (near double roots)
        let f_next = ((next + a) * next + b) * next + c;
        if f_next.abs() > f.abs() {
            break;
        }
        x = next;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "got {got:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn three_distinct_real_roots() {
        // (x - 1)(x - 2)(x + 3) = x³ - 7x + 6
        assert_roots(&real_roots(0.0, -7.0, 6.0), &[-3.0, 1.0, 2.0]);
    }

    #[test]
    fn single_real_root_cardano() {
        let roots = real_roots(0.0, -1.0, -1.0);
        assert_roots(&roots, &[1.324_717_957_244_746]);
        let roots = real_roots(0.0, 0.0, -2.0);
        assert_roots(&roots, &[2f64.cbrt()]);
    }

    #[test]
    fn repeated_roots() {
        // (x - 1)² (x + 2) = x³ - 3x + 2
        let roots = real_roots(0.0, -3.0, 2.0);
        assert_eq!(roots.len(), 3);
        assert!((roots[0] + 2.0).abs() < 1e-9);
        assert!((roots[1] - 1.0).abs() < 1e-6);
        assert!((roots[2] - 1.0).abs() < 1e-6);
        // x³
        assert_roots(&real_roots(0.0, 0.0, 0.0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn shifted_cubic() {
        // (x - 10)(x - 11)(x - 12) = x³ - 33x² + 362x - 1320
        assert_roots(&real_roots(-33.0, 362.0, -1320.0), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn eigenvalues_put_matching_root_first() {
        let p = MinimalPolynomial::new(0, -7, 6);
        let ev = eigenvalues_for(1.0001, &p);
        assert!((ev[0] - 1.0).abs() < 1e-9);
        assert!((ev[1] + 3.0).abs() < 1e-9);
        assert!((ev[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn matches_nalgebra_companion_spectrum() {
        use crate::companion::companion_matrix;
        let p = MinimalPolynomial::new(-2, -5, 6); // (x-1)(x+2)(x-3)
        let c = companion_matrix(&p);
        let mut ev: Vec<f64> = c.complex_eigenvalues().iter().map(|z| z.re).collect();
        ev.sort_by(|x, y| x.total_cmp(y));
        assert_roots(&real_roots(-2.0, -5.0, 6.0), &ev);
    }
}
