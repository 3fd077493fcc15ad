//! Matrix powers, recurrence check, and the combined verification.

use nalgebra::Matrix3;

use crate::cfg::ClassifyCfg;
use crate::poly::MinimalPolynomial;
use crate::roots::eigenvalues_for;

use super::types::{MatrixVerificationResult, TraceRelation};

/// Companion matrix with characteristic polynomial `x³ + a x² + b x + c`.
#[rustfmt::skip]
pub fn companion_matrix(p: &MinimalPolynomial) -> Matrix3<f64> {
    let (a, b, c) = (p.a as f64, p.b as f64, p.c as f64);
    Matrix3::new(
        0.0, 0.0, -c,
        1.0, 0.0, -b,
        0.0, 1.0, -a,
    )
}

/// `[tr(C^0), tr(C^1), …, tr(C^n)]` by repeated multiplication.
pub fn matrix_traces(p: &MinimalPolynomial, n: usize) -> Vec<f64> {
    let c = companion_matrix(p);
    let mut power = Matrix3::<f64>::identity();
    let mut traces = Vec::with_capacity(n + 1);
    traces.push(power.trace());
    for _ in 0..n {
        power = power * c;
        traces.push(power.trace());
    }
    traces
}

/// Trace relations for `k = 1..=n`. Expected values for `k = 1, 2` come from
/// Newton's identities, for `k >= 3` from the recurrence on the prior actual
/// traces.
pub fn trace_relations(p: &MinimalPolynomial, n: usize) -> Vec<TraceRelation> {
    let t = matrix_traces(p, n);
    let (a, b, c) = (p.a as f64, p.b as f64, p.c as f64);
    (1..=n)
        .map(|k| {
            let terms: [f64; 3] = match k {
                1 => [-a, 0.0, 0.0],
                2 => [a * a, -2.0 * b, 0.0],
                _ => [-a * t[k - 1], -b * t[k - 2], -c * t[k - 3]],
            };
            let expected = terms.iter().sum::<f64>();
            let actual = t[k];
            let scale = terms
                .iter()
                .fold(1f64.max(actual.abs()), |m, x| m.max(x.abs()));
            TraceRelation {
                k,
                actual,
                expected,
                difference: actual - expected,
                scale,
            }
        })
        .collect()
}

/// Verify that `p` certifies α as a cubic irrational.
pub fn verify(alpha: f64, p: MinimalPolynomial, cfg: &ClassifyCfg) -> MatrixVerificationResult {
    let trace_relations = trace_relations(&p, cfg.trace_count());
    let traces_agree = trace_relations
        .iter()
        .all(|r| r.holds(cfg.trace_tolerance));

    let eigenvalues = eigenvalues_for(alpha, &p);
    let alpha_residual = p.eval(alpha).abs();
    let scale = 1f64.max(alpha.abs());
    let alpha_is_eigenvalue = alpha_residual <= cfg.precision * scale.powi(3)
        && eigenvalues
            .first()
            .is_some_and(|ev| (ev - alpha).abs() <= cfg.precision * scale);

    let is_irreducible = p.is_irreducible();
    let is_cubic_irrational = traces_agree && alpha_is_eigenvalue && is_irreducible;
    tracing::debug!(
        poly = %p,
        traces_agree,
        alpha_is_eigenvalue,
        is_irreducible,
        alpha_residual,
        "matrix_verification"
    );
    MatrixVerificationResult {
        minimal_polynomial: p,
        trace_relations,
        eigenvalues,
        alpha_residual,
        traces_agree,
        alpha_is_eigenvalue,
        is_irreducible,
        is_cubic_irrational,
    }
}
