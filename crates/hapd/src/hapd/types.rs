//! Result types of a HAPD run.

use serde::Serialize;

use crate::triple::Triple;

/// Integer parts `(⌊v1/v3⌋, ⌊v2/v3⌋)` extracted at one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HapdStep {
    pub a1: i64,
    pub a2: i64,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HapdStatus {
    /// A triple repeated an earlier one within tolerance.
    Periodic,
    /// `max_iterations` steps without a repeat.
    IterationCap,
    /// `v3` vanished or a value left the finite/exact range.
    Degenerate,
}

/// Full record of a run.
///
/// Invariants:
/// - `triples.len() == sequence.len() + 1` (the initial triple is included).
/// - `periodic_index.is_none()` iff `period_length == 0`.
/// - When found, `preperiod_length + period_length == periodic_index`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HapdResult {
    pub sequence: Vec<HapdStep>,
    pub triples: Vec<Triple>,
    /// Index in `triples` of the first triple that repeats an earlier one.
    pub periodic_index: Option<usize>,
    pub period_length: usize,
    pub preperiod_length: usize,
    pub status: HapdStatus,
}

impl HapdResult {
    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.periodic_index.is_some()
    }

    /// Steps of the periodic part (empty when no period was found).
    pub fn period(&self) -> &[HapdStep] {
        match self.periodic_index {
            Some(end) => &self.sequence[self.preperiod_length..end],
            None => &[],
        }
    }

    /// Steps before the periodic part (the whole sequence when no period).
    pub fn preperiod(&self) -> &[HapdStep] {
        if self.is_periodic() {
            &self.sequence[..self.preperiod_length]
        } else {
            &self.sequence
        }
    }
}
