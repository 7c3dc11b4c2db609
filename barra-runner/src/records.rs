//! Record table lookup over configured records.
//!
//! A lift sets a record in every stored row it beats, as long as the row
//! matches the athlete's sex, weight class, equipment, the movement and the
//! modality, and the row's division is the athlete's own or the open
//! division.

use serde::{Deserialize, Serialize};
use tracing::debug;

use barra_core::domain::{Equipment, Modality, Movement, Sex};
use barra_core::records::{RecordCheck, RecordError, RecordLookup, RecordQuery};

/// One standing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub sex: Sex,
    pub division: String,
    pub weight_class: String,
    pub equipment: Equipment,
    pub movement: Movement,
    pub modality: Modality,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct RecordTable {
    rows: Vec<RecordRow>,
    open_division: String,
}

impl RecordTable {
    pub fn new(rows: Vec<RecordRow>, open_division: impl Into<String>) -> Self {
        Self {
            rows,
            open_division: open_division.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn applies(&self, row: &RecordRow, query: &RecordQuery) -> bool {
        let athlete = &query.athlete;
        row.sex == athlete.sex
            && row.equipment == athlete.equipment
            && row.movement == query.movement
            && row.modality == query.modality
            && same_label(&row.weight_class, &athlete.weight_class)
            && (same_label(&row.division, &athlete.division)
                || same_label(&row.division, &self.open_division))
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl RecordLookup for RecordTable {
    fn check_record(&self, query: &RecordQuery) -> Result<RecordCheck, RecordError> {
        if !query.weight.is_finite() || query.weight <= 0.0 {
            return Err(RecordError::Lookup(format!("invalid lift weight {}", query.weight)));
        }

        let mut record_divisions: Vec<String> = self
            .rows
            .iter()
            .filter(|row| self.applies(row, query) && query.weight > row.weight)
            .map(|row| row.division.clone())
            .collect();
        record_divisions.sort();
        record_divisions.dedup();

        if !record_divisions.is_empty() {
            debug!(
                movement = %query.movement,
                weight = query.weight,
                divisions = ?record_divisions,
                "lift beats standing record"
            );
        }
        Ok(RecordCheck {
            is_record: !record_divisions.is_empty(),
            record_divisions,
        })
    }
}
