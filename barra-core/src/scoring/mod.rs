//! Per-entry scoring: best lifts, disqualification, totals, point scores.

pub mod evaluator;
pub mod points;
pub mod total;

pub use evaluator::{best_lift, best_lifts};
pub use points::{PointScorer, ScoreError, ScoreInput};
pub use total::{
    evaluate_total, score_entry, score_modality, ModalityResult, ScoringError, TotalOutcome,
};
