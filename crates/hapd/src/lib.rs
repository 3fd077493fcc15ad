//! Cubic-irrational classifier built on HAPD.
//!
//! Given a real α, decide whether it is rational, a quadratic irrational, a
//! cubic irrational, of higher algebraic degree, or unclassified within bounds
//! ("transcendental"), and return the certificates that justify the answer.
//!
//! Pipeline (leaf-first)
//! - `triple`: projective triples and the reduction step.
//! - `hapd`: periodicity detection on the triple sequence.
//! - `poly`: bounded integer-relation search for the minimal polynomial.
//! - `companion`: companion matrix, trace recurrence, verification.
//! - `roots`: real roots of the cubic (eigenvalues of the companion matrix).
//! - `cf`: continued fractions for the rational and quadratic tests.
//! - `classify`: the entry point tying everything together.
//!
//! Everything is single-threaded, synchronous, and bounded by `ClassifyCfg`.
//! Results are plain data; nothing is shared between requests.

pub mod api;
pub mod cf;
pub mod cfg;
pub mod classify;
pub mod companion;
pub mod hapd;
pub mod poly;
pub mod roots;
pub mod samples;
pub mod triple;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::ClassifyCfg;
pub use classify::{classify, classify_with, Classification, ClassifyError, CubicIrrationalResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{ClassifyCfg, PRECISION_PRESETS};
    pub use crate::classify::{
        classify, classify_with, Classification, ClassifyError, CubicIrrationalResult,
    };
    pub use crate::companion::{MatrixVerificationResult, TraceRelation};
    pub use crate::hapd::{HapdResult, HapdStatus, HapdStep};
    pub use crate::poly::MinimalPolynomial;
    pub use crate::triple::Triple;
}
