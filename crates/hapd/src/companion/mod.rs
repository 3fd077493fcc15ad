//! Companion matrix and trace-recurrence verification.
//!
//! Purpose
//! - Given a monic cubic `x³ + a x² + b x + c`, build its companion matrix `C`,
//!   compute `tr(C^k)` by repeated multiplication, and check every trace
//!   against Newton's identities / the order-3 recurrence
//!   `tr(C^k) = -a tr(C^(k-1)) - b tr(C^(k-2)) - c tr(C^(k-3))`, `tr(C^0) = 3`.
//! - Cross-check that α is an eigenvalue of `C` (closed-form roots from
//!   `crate::roots`) and that the cubic is irreducible over ℚ.
//!
//! Numerics
//! - Powers are f64 `Matrix3` products; entries stay exact only below 2⁵³, so
//!   differences are compared against the magnitude of the terms involved.
//!
//! Code cross-refs: `MinimalPolynomial`, `roots::eigenvalues_for`, `ClassifyCfg`.

mod types;
mod verify;

pub use types::{MatrixVerificationResult, TraceRelation};
pub use verify::{companion_matrix, matrix_traces, trace_relations, verify};
