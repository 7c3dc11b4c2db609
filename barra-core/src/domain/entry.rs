//! One athlete's competition record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::attempt::Attempt;
use super::athlete::{Equipment, Sex};
use super::ids::EntryId;
use super::modality::{resolve_modalities, Modality, ModalityError, ModalityPolicy};
use super::movement::Movement;

/// Attempts per movement in a standard meet.
pub const STANDARD_ATTEMPTS: usize = 3;
/// Attempts per movement when the meet allows a fourth (record) attempt.
pub const WITH_FOURTH_ATTEMPT: usize = 4;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EntryError {
    #[error("entry {id}: {movement} has {count} attempts (max {max})")]
    TooManyAttempts {
        id: EntryId,
        movement: Movement,
        count: usize,
        max: usize,
    },
    #[error("entry {id}: {movement} attempt {index} has negative weight {weight}")]
    NegativeWeight {
        id: EntryId,
        movement: Movement,
        index: usize,
        weight: f64,
    },
    #[error("entry {id}: bodyweight {value} is not a positive number")]
    InvalidBodyweight { id: EntryId, value: f64 },
    #[error("entry {id}: {source}")]
    Modality {
        id: EntryId,
        #[source]
        source: ModalityError,
    },
}

/// Snapshot of an athlete's registration, weigh-in and attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    pub sex: Sex,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub bodyweight: Option<f64>,
    pub division: String,
    pub weight_class: String,
    pub equipment: Equipment,
    /// Declared modality string, e.g. "AST" or "A, S".
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub squat: Vec<Attempt>,
    #[serde(default)]
    pub bench: Vec<Attempt>,
    #[serde(default)]
    pub deadlift: Vec<Attempt>,
}

impl Entry {
    pub fn new(
        id: impl Into<EntryId>,
        name: impl Into<String>,
        sex: Sex,
        division: impl Into<String>,
        weight_class: impl Into<String>,
        equipment: Equipment,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: None,
            sex,
            birth_date: None,
            bodyweight: None,
            division: division.into(),
            weight_class: weight_class.into(),
            equipment,
            modality: String::new(),
            squat: Vec::new(),
            bench: Vec::new(),
            deadlift: Vec::new(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_bodyweight(mut self, bodyweight: f64) -> Self {
        self.bodyweight = Some(bodyweight);
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = modality.into();
        self
    }

    pub fn with_attempts(mut self, movement: Movement, attempts: Vec<Attempt>) -> Self {
        *self.attempts_mut(movement) = attempts;
        self
    }

    pub fn attempts(&self, movement: Movement) -> &[Attempt] {
        match movement {
            Movement::Squat => &self.squat,
            Movement::Bench => &self.bench,
            Movement::Deadlift => &self.deadlift,
        }
    }

    fn attempts_mut(&mut self, movement: Movement) -> &mut Vec<Attempt> {
        match movement {
            Movement::Squat => &mut self.squat,
            Movement::Bench => &mut self.bench,
            Movement::Deadlift => &mut self.deadlift,
        }
    }

    /// Team name, trimmed. Blank names count as no team.
    pub fn team_name(&self) -> Option<&str> {
        self.team.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn modalities(&self, policy: ModalityPolicy) -> Result<Vec<Modality>, EntryError> {
        resolve_modalities(&self.modality, policy)
            .map_err(|source| EntryError::Modality { id: self.id, source })
    }

    /// True if any attempt in the given movements carries a declared weight.
    pub fn has_declared_attempt(&self, modality: Modality) -> bool {
        modality
            .movements()
            .any(|m| self.attempts(m).iter().any(|a| a.declared_weight().is_some()))
    }

    /// Structural checks on the ledger. Short attempt lists are fine (missing
    /// slots are simply not attempted); longer than `max_attempts` is not.
    pub fn validate(&self, max_attempts: usize) -> Result<(), EntryError> {
        for movement in Movement::ALL {
            let attempts = self.attempts(movement);
            if attempts.len() > max_attempts {
                return Err(EntryError::TooManyAttempts {
                    id: self.id,
                    movement,
                    count: attempts.len(),
                    max: max_attempts,
                });
            }
            for (i, attempt) in attempts.iter().enumerate() {
                if let Some(weight) = attempt.weight {
                    if weight < 0.0 || !weight.is_finite() {
                        return Err(EntryError::NegativeWeight {
                            id: self.id,
                            movement,
                            index: i + 1,
                            weight,
                        });
                    }
                }
            }
        }

        if let Some(bw) = self.bodyweight {
            if bw <= 0.0 || !bw.is_finite() {
                return Err(EntryError::InvalidBodyweight { id: self.id, value: bw });
            }
        }
        Ok(())
    }
}
