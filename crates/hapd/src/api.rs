//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is a convenience surface for the CLI, benches and experiments, not a
//!   stable public API. Breaking changes are allowed.
//! - Prefer these re-exports over deep module paths for consistency.

// Entry points and configuration
pub use crate::cfg::{ClassifyCfg, PRECISION_PRESETS};
pub use crate::classify::{
    classify, classify_with, Classification, ClassifyError, CubicIrrationalResult,
};
// HAPD
pub use crate::hapd::{run_hapd, run_hapd_from, HapdResult, HapdStatus, HapdStep};
pub use crate::triple::Triple;
// Algebraic verification
pub use crate::companion::{
    companion_matrix, matrix_traces, trace_relations, verify, MatrixVerificationResult,
    TraceRelation,
};
pub use crate::poly::{
    extract_minimal_polynomial, find_monic_relation, find_quadratic_relation, IntegerRelation,
    MinimalPolynomial,
};
pub use crate::roots::{eigenvalues_for, real_roots};
// Continued fractions
pub use crate::cf::{
    expand as cf_expand, ContinuedFraction, QuadraticCertificate, QuadraticSource,
    RationalCertificate,
};
// Seeded inputs
pub use crate::samples::{draw_sample, draw_samples, Family, ReplayToken, Sample, SampleCfg};
