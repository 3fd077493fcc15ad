//! Classifier: rational → quadratic → cubic → higher degree → transcendental.
//!
//! Behavior
//! - Input validation is the only fail-fast path (`ClassifyError`). Every
//!   numeric edge case inside the pipeline ends up in the result's flags,
//!   `Option`s and `HapdStatus`.
//! - HAPD always runs so the step sequence is available to consumers; the
//!   tests themselves short-circuit in priority order, so at most one flag is
//!   set.
//! - The quadratic stage tries the continued-fraction period first and a
//!   bounded degree-2 relation second. A reducible cubic relation that has α
//!   as an eigenvalue is split, and its quadratic factor certifies α.
//! - The flags are heuristic within the configured bounds. A number can pass
//!   an earlier test by numerical accident (e.g. a rational approximation
//!   within tolerance); the priority order decides, nothing else.
//!   "Transcendental" means "unclassified within bounds".

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::cf::{self, QuadraticCertificate, QuadraticSource, RationalCertificate};
use crate::cfg::ClassifyCfg;
use crate::companion::{self, MatrixVerificationResult};
use crate::hapd::{run_hapd, HapdResult};
use crate::poly::{
    extract_minimal_polynomial, find_monic_relation, find_quadratic_relation, IntegerRelation,
};

/// Rejected caller input.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("alpha must be a finite real number, got {0}")]
    NonFiniteAlpha(f64),
    #[error("precision must be positive and finite, got {0}")]
    InvalidPrecision(f64),
    #[error("max_iterations must be at least 1")]
    ZeroIterations,
}

/// Final class of α.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Rational,
    Quadratic,
    Cubic,
    HigherDegree,
    Transcendental,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Rational,
        Classification::Quadratic,
        Classification::Cubic,
        Classification::HigherDegree,
        Classification::Transcendental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Rational => "rational",
            Classification::Quadratic => "quadratic",
            Classification::Cubic => "cubic",
            Classification::HigherDegree => "higher_degree",
            Classification::Transcendental => "transcendental",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything computed for one α; plain data for rendering/charting code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CubicIrrationalResult {
    pub alpha: f64,
    pub cfg: ClassifyCfg,
    pub hapd_result: HapdResult,
    /// Present when the cubic stage ran and a degree-3 relation was found.
    pub matrix_result: Option<MatrixVerificationResult>,
    pub rational: Option<RationalCertificate>,
    pub quadratic: Option<QuadraticCertificate>,
    /// Degree ≥ 4 relation backing `is_higher_degree`, if one was found.
    pub higher_degree_relation: Option<IntegerRelation>,
    pub is_rational: bool,
    pub is_quadratic: bool,
    pub is_cubic: bool,
    pub is_higher_degree: bool,
    pub is_transcendental: bool,
}

impl CubicIrrationalResult {
    /// First set flag in priority order.
    pub fn classification(&self) -> Classification {
        let flags = [
            self.is_rational,
            self.is_quadratic,
            self.is_cubic,
            self.is_higher_degree,
            self.is_transcendental,
        ];
        flags
            .iter()
            .position(|&f| f)
            .map(|k| Classification::ALL[k])
            .unwrap_or(Classification::Transcendental)
    }

    /// Number of flags set (1 for every result built by `classify_with`).
    pub fn flag_count(&self) -> usize {
        [
            self.is_rational,
            self.is_quadratic,
            self.is_cubic,
            self.is_higher_degree,
            self.is_transcendental,
        ]
        .iter()
        .filter(|&&f| f)
        .count()
    }
}

/// Classify α with the default configuration, overriding precision and the
/// HAPD iteration cap.
pub fn classify(
    alpha: f64,
    precision: f64,
    max_iterations: usize,
) -> Result<CubicIrrationalResult, ClassifyError> {
    let cfg = ClassifyCfg::default()
        .with_precision(precision)
        .with_max_iterations(max_iterations);
    classify_with(alpha, &cfg)
}

/// Classify α with a full configuration.
pub fn classify_with(
    alpha: f64,
    cfg: &ClassifyCfg,
) -> Result<CubicIrrationalResult, ClassifyError> {
    validate(alpha, cfg)?;

    let mut out = CubicIrrationalResult {
        alpha,
        cfg: *cfg,
        hapd_result: run_hapd(alpha, cfg),
        matrix_result: None,
        rational: None,
        quadratic: None,
        higher_degree_relation: None,
        is_rational: false,
        is_quadratic: false,
        is_cubic: false,
        is_higher_degree: false,
        is_transcendental: false,
    };

    let expansion = cf::expand(alpha, cfg);
    out.rational = cf::rational_certificate(alpha, &expansion, cfg);
    if out.rational.is_some() {
        out.is_rational = true;
        return Ok(finish(out));
    }

    out.quadratic = cf::quadratic_certificate(alpha, &expansion, cfg).or_else(|| {
        let abc = find_quadratic_relation(alpha, cfg.quadratic_bound, cfg.precision)?;
        QuadraticCertificate::from_coefficients(alpha, abc, QuadraticSource::IntegerRelation)
    });
    if out.quadratic.is_some() {
        out.is_quadratic = true;
        return Ok(finish(out));
    }

    let cubic = extract_minimal_polynomial(alpha, cfg);
    out.matrix_result = cubic.map(|p| companion::verify(alpha, p, cfg));
    let verified = out
        .matrix_result
        .as_ref()
        .is_some_and(|m| m.is_cubic_irrational);
    if out.hapd_result.is_periodic() && verified {
        out.is_cubic = true;
        return Ok(finish(out));
    }

    out.quadratic = out
        .matrix_result
        .as_ref()
        .and_then(|m| cubic_factor_certificate(alpha, m, cfg));
    if out.quadratic.is_some() {
        out.is_quadratic = true;
        return Ok(finish(out));
    }

    if cubic.is_none() {
        out.higher_degree_relation = (4..=cfg.max_degree)
            .find_map(|d| find_monic_relation(alpha, d, cfg.higher_degree_bound, cfg.precision));
    }
    if out.higher_degree_relation.is_some() || !out.hapd_result.is_periodic() {
        out.is_higher_degree = true;
        return Ok(finish(out));
    }

    out.is_transcendental = true;
    Ok(finish(out))
}

/// A reducible cubic that has α as an eigenvalue splits as `(x - r) q(x)`; when
/// α is not the integer root `r` it is a root of the quadratic factor `q`.
fn cubic_factor_certificate(
    alpha: f64,
    m: &MatrixVerificationResult,
    cfg: &ClassifyCfg,
) -> Option<QuadraticCertificate> {
    if m.is_irreducible || !m.alpha_is_eigenvalue {
        return None;
    }
    let p = m.minimal_polynomial;
    let tol = cfg.precision * 1f64.max(alpha.abs());
    p.integer_roots()
        .into_iter()
        .filter(|&r| (alpha - r as f64).abs() > tol)
        .find_map(|r| {
            let (b1, c1) = p.deflate(r)?;
            let source = QuadraticSource::CubicFactor;
            QuadraticCertificate::from_coefficients(alpha, (1, b1, c1), source)
                .filter(|q| q.error <= tol)
        })
}

fn validate(alpha: f64, cfg: &ClassifyCfg) -> Result<(), ClassifyError> {
    if !alpha.is_finite() {
        return Err(ClassifyError::NonFiniteAlpha(alpha));
    }
    if !(cfg.precision.is_finite() && cfg.precision > 0.0) {
        return Err(ClassifyError::InvalidPrecision(cfg.precision));
    }
    if cfg.max_iterations == 0 {
        return Err(ClassifyError::ZeroIterations);
    }
    Ok(())
}

fn finish(out: CubicIrrationalResult) -> CubicIrrationalResult {
    tracing::debug!(
        alpha = out.alpha,
        class = %out.classification(),
        hapd_steps = out.hapd_result.sequence.len(),
        "classified"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hapd::HapdStatus;
    use crate::poly::MinimalPolynomial;

    const PLASTIC: f64 = 1.324_717_957_244_746;

    fn run(alpha: f64) -> CubicIrrationalResult {
        classify(alpha, 1e-10, 1000).unwrap()
    }

    #[test]
    fn small_rationals() {
        for q in 1..=12i64 {
            for p in -30..=30i64 {
                if gcd(p.unsigned_abs(), q as u64) != 1 {
                    continue;
                }
                let r = run(p as f64 / q as f64);
                assert!(r.is_rational, "{p}/{q}");
                assert!(!r.is_cubic && !r.is_quadratic, "{p}/{q}");
                let cert = r.rational.unwrap();
                assert_eq!((cert.numerator, cert.denominator), (p, q));
                assert_eq!(r.flag_count(), 1);
            }
        }
    }

    #[test]
    fn zero_and_one_are_rational() {
        for alpha in [0.0, 1.0] {
            let r = run(alpha);
            assert!(r.is_rational);
            assert_eq!(r.classification(), Classification::Rational);
            assert_eq!(r.hapd_result.triples.len(), r.hapd_result.sequence.len() + 1);
        }
    }

    #[test]
    fn golden_ratio_is_quadratic() {
        let r = run((1.0 + 5f64.sqrt()) / 2.0);
        assert!(r.is_quadratic);
        assert!(!r.is_rational && !r.is_cubic);
        assert_eq!(r.quadratic.unwrap().coefficients, (1, -1, -1));
        assert!(r.matrix_result.is_none());
    }

    #[test]
    fn surds_with_long_periods_are_quadratic() {
        for (alpha, coefficients) in [
            (10f64.sqrt(), (1, 0, -10)),
            (26f64.sqrt(), (1, 0, -26)),
            (37f64.sqrt(), (1, 0, -37)),
            (50f64.sqrt(), (1, 0, -50)),
            ((1.0 + 10f64.sqrt()) / 2.0, (4, -4, -9)),
        ] {
            let r = run(alpha);
            assert!(r.is_quadratic, "alpha={alpha} class={}", r.classification());
            assert_eq!(r.quadratic.unwrap().coefficients, coefficients, "alpha={alpha}");
        }
    }

    #[test]
    fn quadratic_relation_backs_up_the_expansion() {
        let cfg = ClassifyCfg {
            cf_min_tail: 64,
            ..ClassifyCfg::default()
        };
        let r = classify_with((1.0 + 10f64.sqrt()) / 2.0, &cfg).unwrap();
        assert!(r.is_quadratic);
        let q = r.quadratic.unwrap();
        assert_eq!(q.source, QuadraticSource::IntegerRelation);
        assert_eq!(q.coefficients, (4, -4, -9));
    }

    #[test]
    fn reducible_cubic_relation_yields_its_quadratic_factor() {
        // no periodic expansion and no direct degree-2 search: only x³ - 26x is left
        let cfg = ClassifyCfg {
            cf_min_tail: 64,
            quadratic_bound: 0,
            ..ClassifyCfg::default()
        };
        let r = classify_with(26f64.sqrt(), &cfg).unwrap();
        assert!(r.is_quadratic, "{}", r.classification());
        assert!(!r.is_transcendental);
        let m = r.matrix_result.as_ref().unwrap();
        assert_eq!(m.minimal_polynomial, MinimalPolynomial::new(0, -26, 0));
        assert!(!m.is_irreducible);
        let q = r.quadratic.as_ref().unwrap();
        assert_eq!(q.source, QuadraticSource::CubicFactor);
        assert_eq!(q.coefficients, (1, 0, -26));
        assert_eq!(r.flag_count(), 1);
    }

    #[test]
    fn large_integers_are_rational() {
        for alpha in [1e12, -1e12, 1e15] {
            let r = run(alpha);
            assert!(r.is_rational, "alpha={alpha} class={}", r.classification());
            let cert = r.rational.unwrap();
            assert_eq!((cert.numerator, cert.denominator), (alpha as i64, 1));
        }
    }

    #[test]
    fn seeded_samples_match_their_family() {
        use crate::samples::{draw_samples, Family, SampleCfg};
        let cfg = ClassifyCfg::default();
        for family in [Family::Rational, Family::Quadratic, Family::Cubic] {
            let sample_cfg = SampleCfg {
                family,
                ..SampleCfg::default()
            };
            let misses: Vec<String> = draw_samples(sample_cfg, 1, 100)
                .into_iter()
                .filter_map(|s| {
                    let got = classify_with(s.alpha, &cfg).unwrap().classification();
                    (got != s.expected).then(|| format!("{} -> {got}", s.label))
                })
                .collect();
            assert!(misses.is_empty(), "{family:?}: {misses:?}");
        }
    }

    #[test]
    fn plastic_number_is_cubic() {
        let r = run(PLASTIC);
        assert!(r.is_cubic, "{:?}", r.classification());
        assert!(r.hapd_result.is_periodic());
        assert!(r.hapd_result.sequence.len() <= 1000);
        let m = r.matrix_result.as_ref().unwrap();
        assert!(m.is_cubic_irrational);
        assert_eq!(m.minimal_polynomial, MinimalPolynomial::new(0, -1, -1));
        assert!((m.eigenvalues[0] - PLASTIC).abs() < 1e-10);
        assert_eq!(r.flag_count(), 1);
    }

    #[test]
    fn cube_roots_are_cubic() {
        for (alpha, poly) in [
            (2f64.cbrt(), MinimalPolynomial::new(0, 0, -2)),
            (3f64.cbrt() + 1.0, MinimalPolynomial::new(-3, 3, -4)),
            (-(5f64.cbrt()), MinimalPolynomial::new(0, 0, 5)),
        ] {
            let r = run(alpha);
            assert!(r.is_cubic, "alpha={alpha} class={}", r.classification());
            assert_eq!(r.matrix_result.unwrap().minimal_polynomial, poly);
        }
    }

    #[test]
    fn fourth_root_of_two_is_higher_degree() {
        let r = run(2f64.powf(0.25));
        assert!(r.is_higher_degree, "{}", r.classification());
        let rel = r.higher_degree_relation.unwrap();
        assert_eq!(rel.coefficients, vec![0, 0, 0, -2]);
        assert!(r.matrix_result.is_none());
    }

    #[test]
    fn pi_and_e_fall_back_to_transcendental() {
        for alpha in [std::f64::consts::PI, std::f64::consts::E] {
            let r = run(alpha);
            assert!(r.is_transcendental, "alpha={alpha} class={}", r.classification());
            assert_eq!(r.flag_count(), 1);
        }
    }

    #[test]
    fn hapd_cap_without_period_means_higher_degree() {
        let r = classify(PLASTIC, 1e-10, 1).unwrap();
        assert_eq!(r.hapd_result.status, HapdStatus::IterationCap);
        assert!(!r.is_cubic);
        assert!(r.is_higher_degree);
        // the cubic certificate is still reported
        assert!(r.matrix_result.unwrap().is_cubic_irrational);
    }

    #[test]
    fn classify_is_idempotent() {
        for alpha in [PLASTIC, std::f64::consts::PI, 0.75, 2f64.sqrt()] {
            let a = run(alpha);
            let b = run(alpha);
            assert_eq!(a.hapd_result, b.hapd_result);
            assert_eq!(a.matrix_result, b.matrix_result);
            assert_eq!(a.classification(), b.classification());
        }
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert_eq!(
            classify(f64::NAN, 1e-10, 1000).unwrap_err().to_string(),
            "alpha must be a finite real number, got NaN"
        );
        assert!(matches!(
            classify(f64::INFINITY, 1e-10, 1000),
            Err(ClassifyError::NonFiniteAlpha(_))
        ));
        assert_eq!(
            classify(1.5, 0.0, 1000).unwrap_err(),
            ClassifyError::InvalidPrecision(0.0)
        );
        assert_eq!(
            classify(1.5, 1e-10, 0).unwrap_err(),
            ClassifyError::ZeroIterations
        );
    }

    #[test]
    fn precision_presets_on_plastic_number() {
        for precision in [1e-10, 1e-14] {
            let r = classify(PLASTIC, precision, 1000).unwrap();
            assert!(r.is_cubic, "precision={precision} class={}", r.classification());
        }
        // coarse precision accepts the convergent 820/619 (error ≈ 7.6e-7)
        let r = classify(PLASTIC, crate::cfg::PRECISION_PRESETS[0], 1000).unwrap();
        assert!(r.is_rational);
        let cert = r.rational.unwrap();
        assert_eq!((cert.numerator, cert.denominator), (820, 619));
    }

    fn gcd(mut x: u64, mut y: u64) -> u64 {
        while y != 0 {
            (x, y) = (y, x % y);
        }
        x
    }
}
