//! Point-score adapter contract.
//!
//! The engine never computes a point score itself. It hands normalized
//! inputs to a [`PointScorer`] and treats the returned number opaquely,
//! apart from checking it is finite and non-negative.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{Equipment, EventType, Modality, Movement, Sex};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoreError {
    #[error("no point coefficients for {sex} {equipment} {event}")]
    MissingCoefficients {
        sex: Sex,
        equipment: Equipment,
        event: EventType,
    },
    #[error("point formula undefined for bodyweight {bodyweight}")]
    OutOfDomain { bodyweight: f64 },
    #[error("point scorer failed: {0}")]
    Failed(String),
}

/// Inputs for one qualified result.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    /// Best lifts for exactly the modality's movements.
    pub lifts: &'a BTreeMap<Movement, f64>,
    pub bodyweight: f64,
    pub sex: Sex,
    pub equipment: Equipment,
    pub modality: Modality,
}

impl ScoreInput<'_> {
    pub fn total(&self) -> f64 {
        self.lifts.values().sum()
    }

    pub fn event_type(&self) -> EventType {
        self.modality.event_type()
    }
}

/// External point formula. Must be deterministic and monotonic in each lift.
pub trait PointScorer: Send + Sync {
    fn score(&self, input: &ScoreInput<'_>) -> Result<f64, ScoreError>;
}

impl<F> PointScorer for F
where
    F: Fn(&ScoreInput<'_>) -> Result<f64, ScoreError> + Send + Sync,
{
    fn score(&self, input: &ScoreInput<'_>) -> Result<f64, ScoreError> {
        self(input)
    }
}
