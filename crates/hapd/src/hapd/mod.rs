//! HAPD: Hermite Algorithm for Periodicity Detection.
//!
//! Purpose
//! - Iterate the projective triple `(α, α², 1)` under the reduction step of
//!   `crate::triple`, record the integer-part pair of every step, and stop at
//!   the first triple that repeats an earlier one within tolerance.
//!
//! Behavior
//! - Bounded by `ClassifyCfg::max_iterations`; never panics. Degenerate
//!   denominators and non-finite values end the run with `HapdStatus::Degenerate`.
//! - History is scanned linearly per step (O(n²) over a run, fine at the
//!   default cap of 1000).
//!
//! Code cross-refs: `Triple`, `ClassifyCfg`, `classify::classify_with`.

mod iter;
mod types;

pub use iter::{run_hapd, run_hapd_from};
pub use types::{HapdResult, HapdStatus, HapdStep};
