//! The HAPD loop.

use crate::cfg::ClassifyCfg;
use crate::triple::Triple;

use super::types::{HapdResult, HapdStatus};

/// Run HAPD from `(α, α², 1)`.
pub fn run_hapd(alpha: f64, cfg: &ClassifyCfg) -> HapdResult {
    run_hapd_from(Triple::from_alpha(alpha), cfg)
}

/// Run HAPD from an arbitrary starting triple.
pub fn run_hapd_from(start: Triple, cfg: &ClassifyCfg) -> HapdResult {
    let mut sequence = Vec::new();
    let mut triples = vec![start];
    let mut status = HapdStatus::IterationCap;
    let mut found: Option<(usize, usize)> = None;

    if !start.is_finite() {
        status = HapdStatus::Degenerate;
    } else {
        for i in 0..cfg.max_iterations {
            let cur = triples[i];
            let Some(step) = cur.integer_parts(cfg.degenerate_eps) else {
                status = HapdStatus::Degenerate;
                break;
            };
            let next = cur.advance(step);
            if !next.is_finite() {
                status = HapdStatus::Degenerate;
                break;
            }
            sequence.push(step);
            let repeat = triples
                .iter()
                .position(|prev| next.approx_eq(prev, cfg.precision));
            triples.push(next);
            if let Some(j) = repeat {
                found = Some((i + 1, j));
                status = HapdStatus::Periodic;
                break;
            }
        }
    }

    let (periodic_index, period_length, preperiod_length) = match found {
        Some((idx, j)) => (Some(idx), idx - j, j),
        None => (None, 0, 0),
    };
    tracing::debug!(
        steps = sequence.len(),
        ?status,
        ?periodic_index,
        period_length,
        "hapd_stop"
    );
    HapdResult {
        sequence,
        triples,
        periodic_index,
        period_length,
        preperiod_length,
        status,
    }
}
