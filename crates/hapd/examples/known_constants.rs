//! Classification table for a handful of well-known constants.
//!
//! Purpose
//! - Quick, code-backed sanity check of the classifier across all five classes.
//! - Prints the certificate that justified each answer.
//!
//! Run: cargo run -p hapd --example known_constants

use std::time::Instant;

use hapd::prelude::*;

fn main() {
    let inputs: [(&str, f64); 9] = [
        ("3/7", 3.0 / 7.0),
        ("golden ratio", (1.0 + 5f64.sqrt()) / 2.0),
        ("sqrt 7", 7f64.sqrt()),
        ("plastic number", 1.324_717_957_244_746),
        ("cbrt 2", 2f64.cbrt()),
        ("2 cos(2π/9)", 2.0 * (2.0 * std::f64::consts::PI / 9.0).cos()),
        ("2^(1/4)", 2f64.powf(0.25)),
        ("pi", std::f64::consts::PI),
        ("e", std::f64::consts::E),
    ];
    let cfg = ClassifyCfg::default();
    for (name, alpha) in inputs {
        let start = Instant::now();
        let r = classify_with(alpha, &cfg).expect("finite input");
        let elapsed = start.elapsed().as_secs_f64() * 1e3;
        let evidence = if let Some(q) = &r.rational {
            format!("{}/{}", q.numerator, q.denominator)
        } else if let Some(q) = &r.quadratic {
            format!("{:?} period={:?}", q.coefficients, q.period)
        } else if let Some(m) = r.matrix_result.as_ref().filter(|_| r.is_cubic) {
            format!("{} eigenvalues={:?}", m.minimal_polynomial, m.eigenvalues)
        } else if let Some(rel) = &r.higher_degree_relation {
            rel.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{name:>16} alpha={alpha:<20.15} class={:<15} hapd_steps={:<4} {evidence} ({elapsed:.2} ms)",
            r.classification().as_str(),
            r.hapd_result.sequence.len(),
        );
    }
}
