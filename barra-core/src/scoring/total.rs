//! Disqualification and total calculation, one modality at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Entry, EntryId, Modality, Movement};
use crate::records::RecordMark;

use super::evaluator::best_lifts;
use super::points::{PointScorer, ScoreError, ScoreInput};

/// Failure to produce a point score for a qualified result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    #[error("entry {id} ({modality}): bodyweight is required for a point score")]
    MissingBodyweight { id: EntryId, modality: Modality },
    #[error("entry {id} ({modality}): {source}")]
    Scorer {
        id: EntryId,
        modality: Modality,
        #[source]
        source: ScoreError,
    },
    #[error("entry {id} ({modality}): point score {value} is not finite and non-negative")]
    InvalidScore {
        id: EntryId,
        modality: Modality,
        value: f64,
    },
}

/// Disqualification decision and total for one modality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalOutcome {
    pub is_disqualified: bool,
    pub total: f64,
}

/// One entry scored under one modality. Always a fresh value; recomputed
/// from the ledger on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityResult {
    pub entry: Entry,
    pub modality: Modality,
    /// Every modality the entry resolved to, this one included.
    pub entry_modalities: Vec<Modality>,
    pub best_by_movement: BTreeMap<Movement, f64>,
    pub total: f64,
    pub is_disqualified: bool,
    pub point_score: f64,
    #[serde(default)]
    pub records: Vec<RecordMark>,
}

impl ModalityResult {
    pub fn best(&self, movement: Movement) -> f64 {
        self.best_by_movement.get(&movement).copied().unwrap_or(0.0)
    }

    pub fn is_qualified(&self) -> bool {
        !self.is_disqualified
    }
}

/// Disqualified iff a required movement has no good lift. Movements outside
/// the modality are never looked at.
pub fn evaluate_total(modality: Modality, best: &BTreeMap<Movement, f64>) -> TotalOutcome {
    let lifts: Vec<f64> = modality
        .movements()
        .map(|m| best.get(&m).copied().unwrap_or(0.0))
        .collect();

    if lifts.iter().any(|w| *w <= 0.0) {
        TotalOutcome { is_disqualified: true, total: 0.0 }
    } else {
        TotalOutcome { is_disqualified: false, total: lifts.iter().sum() }
    }
}

/// Score `entry` under a single modality.
///
/// The scorer is only consulted for qualified results; a disqualified result
/// carries total 0 and point score 0.
pub fn score_modality(
    entry: &Entry,
    modality: Modality,
    entry_modalities: &[Modality],
    scorer: &dyn PointScorer,
) -> Result<ModalityResult, ScoringError> {
    let best_by_movement = best_lifts(entry, modality);
    let outcome = evaluate_total(modality, &best_by_movement);

    let point_score = if outcome.is_disqualified {
        0.0
    } else {
        let bodyweight = entry
            .bodyweight
            .ok_or(ScoringError::MissingBodyweight { id: entry.id, modality })?;
        let input = ScoreInput {
            lifts: &best_by_movement,
            bodyweight,
            sex: entry.sex,
            equipment: entry.equipment,
            modality,
        };
        let value = scorer.score(&input).map_err(|source| ScoringError::Scorer {
            id: entry.id,
            modality,
            source,
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ScoringError::InvalidScore { id: entry.id, modality, value });
        }
        value
    };

    Ok(ModalityResult {
        entry: entry.clone(),
        modality,
        entry_modalities: entry_modalities.to_vec(),
        best_by_movement,
        total: outcome.total,
        is_disqualified: outcome.is_disqualified,
        point_score,
        records: Vec::new(),
    })
}

/// Fan an entry out into one independent result per resolved modality.
pub fn score_entry(
    entry: &Entry,
    modalities: &[Modality],
    scorer: &dyn PointScorer,
) -> Result<Vec<ModalityResult>, ScoringError> {
    modalities
        .iter()
        .map(|m| score_modality(entry, *m, modalities, scorer))
        .collect()
}
