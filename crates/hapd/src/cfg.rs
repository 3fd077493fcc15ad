//! Classifier configuration (tolerances and search bounds).
//!
//! Policy
//! - Every tolerance and loop bound used by the classifier lives here, so that
//!   callers can tune a request without touching algorithm code.
//! - Defaults match the values the reference UI offers: precision `1e-10`,
//!   1000 HAPD iterations, coefficients in `[-100, 100]`.
//! - All loops in the crate are bounded by one of these fields; a request
//!   always terminates.

use serde::Serialize;

/// Recognized precision presets (coarse, default, fine).
pub const PRECISION_PRESETS: [f64; 3] = [1e-6, 1e-10, 1e-14];

/// Classifier configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassifyCfg {
    /// Main tolerance used by HAPD matching, relation search and root checks.
    pub precision: f64,
    /// Hard cap on HAPD steps.
    pub max_iterations: usize,
    /// `|v3|` below this stops HAPD as degenerate.
    pub degenerate_eps: f64,
    /// Coefficient range `[-B, B]` of the degree-3 relation search.
    pub coefficient_bound: i64,
    /// Number of traces `tr(C^k)`, `k = 1..=N`, checked by the verifier (≥ 7).
    pub trace_terms: usize,
    /// Scaled tolerance for `actual - expected` in the trace recurrence.
    pub trace_tolerance: f64,
    /// Largest denominator accepted by the rational test.
    pub max_denominator: i64,
    /// Upper bound on continued-fraction terms expanded.
    pub cf_max_terms: usize,
    /// Stop expanding once `q_k² · ε · max(1,|α|)` exceeds this.
    pub cf_noise_margin: f64,
    /// Minimum periodic tail length before a period is trusted; the tail must
    /// also cover the period twice.
    pub cf_min_tail: usize,
    /// Coefficient range of the degree-2 relation search (`0` disables it).
    pub quadratic_bound: i64,
    /// Highest degree tried by the higher-degree relation search.
    pub max_degree: usize,
    /// Coefficient range for degrees 4..=`max_degree`.
    pub higher_degree_bound: i64,
}

impl Default for ClassifyCfg {
    fn default() -> Self {
        Self {
            precision: 1e-10,
            max_iterations: 1000,
            degenerate_eps: 1e-12,
            coefficient_bound: 100,
            trace_terms: 12,
            trace_tolerance: 1e-6,
            max_denominator: 1000,
            cf_max_terms: 64,
            cf_noise_margin: 1e-4,
            cf_min_tail: 4,
            quadratic_bound: 100,
            max_degree: 4,
            higher_degree_bound: 24,
        }
    }
}

impl ClassifyCfg {
    #[inline]
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }
    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    /// Trace count actually used by the verifier.
    #[inline]
    pub(crate) fn trace_count(&self) -> usize {
        self.trace_terms.max(7)
    }
}
