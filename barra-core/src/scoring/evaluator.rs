//! Attempt evaluator: best successful weight per movement.

use std::collections::BTreeMap;

use crate::domain::{Entry, Modality, Movement};

/// Heaviest good lift for `movement`, or 0.0 when there is none.
///
/// Missing attempts are not an error; they simply never count.
pub fn best_lift(entry: &Entry, movement: Movement) -> f64 {
    entry
        .attempts(movement)
        .iter()
        .filter_map(|a| a.good_weight())
        .fold(0.0, f64::max)
}

/// Best lifts for exactly the movements `modality` requires.
pub fn best_lifts(entry: &Entry, modality: Modality) -> BTreeMap<Movement, f64> {
    modality
        .movements()
        .map(|m| (m, best_lift(entry, m)))
        .collect()
}
