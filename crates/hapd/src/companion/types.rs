use nalgebra::Matrix3;
use serde::Serialize;

use crate::poly::MinimalPolynomial;

/// One checked power `k`: `actual = tr(C^k)`, `expected` from the recurrence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TraceRelation {
    pub k: usize,
    pub actual: f64,
    pub expected: f64,
    pub difference: f64,
    /// Magnitude the difference is measured against.
    pub scale: f64,
}

impl TraceRelation {
    #[inline]
    pub fn holds(&self, tol: f64) -> bool {
        self.difference.abs() <= tol * self.scale
    }
}

/// Algebraic certificate for a cubic candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatrixVerificationResult {
    pub minimal_polynomial: MinimalPolynomial,
    pub trace_relations: Vec<TraceRelation>,
    /// Real eigenvalues of the companion matrix; the one matching α first.
    pub eigenvalues: Vec<f64>,
    /// `|α³ + aα² + bα + c|`.
    pub alpha_residual: f64,
    pub traces_agree: bool,
    pub alpha_is_eigenvalue: bool,
    pub is_irreducible: bool,
    pub is_cubic_irrational: bool,
}

impl MatrixVerificationResult {
    /// Largest `|difference|` over the checked powers.
    pub fn max_trace_difference(&self) -> f64 {
        self.trace_relations
            .iter()
            .map(|r| r.difference.abs())
            .fold(0.0, f64::max)
    }

    /// Companion matrix of the certified polynomial.
    pub fn companion(&self) -> Matrix3<f64> {
        super::companion_matrix(&self.minimal_polynomial)
    }
}
