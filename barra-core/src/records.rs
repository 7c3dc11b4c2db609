//! Record annotation contract.
//!
//! Record lookups are external. The engine builds one query per good lift of
//! each qualified result, keyed by `(entry, modality, movement, weight)`, and
//! folds the answers back into fresh results. The lookup itself may run in
//! any order or in parallel; [`apply_record_checks`] only runs once every
//! answer is in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::{age_on, EntryId, Equipment, Modality, Movement, Sex};
use crate::scoring::ModalityResult;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record lookup unavailable: {0}")]
    Unavailable(String),
    #[error("record lookup failed: {0}")]
    Lookup(String),
}

/// Athlete attributes a record lookup may need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteContext {
    pub sex: Sex,
    pub age: Option<u32>,
    pub weight_class: String,
    pub division: String,
    pub equipment: Equipment,
    pub modality_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub weight: f64,
    pub movement: Movement,
    pub athlete: AthleteContext,
    pub modality: Modality,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCheck {
    pub is_record: bool,
    pub record_divisions: Vec<String>,
}

/// External record database.
pub trait RecordLookup: Send + Sync {
    fn check_record(&self, query: &RecordQuery) -> Result<RecordCheck, RecordError>;
}

/// A lookup that never reports a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecords;

impl RecordLookup for NoRecords {
    fn check_record(&self, _query: &RecordQuery) -> Result<RecordCheck, RecordError> {
        Ok(RecordCheck::default())
    }
}

/// Join key for lookup answers. Weight is held in grams so the key is `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub entry: EntryId,
    pub modality: Modality,
    pub movement: Movement,
    pub grams: u64,
}

impl RecordKey {
    pub fn new(entry: EntryId, modality: Modality, movement: Movement, weight: f64) -> Self {
        Self {
            entry,
            modality,
            movement,
            grams: (weight * 1000.0).round() as u64,
        }
    }
}

/// A good lift that set a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMark {
    pub movement: Movement,
    pub weight: f64,
    pub divisions: Vec<String>,
}

/// One query per distinct good lift of every qualified result.
///
/// Disqualified results are skipped; a bombed-out lifter has no official
/// lifts to put in the record book.
pub fn record_queries(
    results: &[ModalityResult],
    as_of: NaiveDate,
) -> Vec<(RecordKey, RecordQuery)> {
    let mut queries = BTreeMap::new();
    for result in results.iter().filter(|r| r.is_qualified()) {
        let entry = &result.entry;
        let athlete = AthleteContext {
            sex: entry.sex,
            age: entry.birth_date.map(|b| age_on(b, as_of)),
            weight_class: entry.weight_class.clone(),
            division: entry.division.clone(),
            equipment: entry.equipment,
            modality_string: entry.modality.clone(),
        };
        for movement in result.modality.movements() {
            for weight in entry.attempts(movement).iter().filter_map(|a| a.good_weight()) {
                let key = RecordKey::new(entry.id, result.modality, movement, weight);
                queries.entry(key).or_insert_with(|| RecordQuery {
                    weight,
                    movement,
                    athlete: athlete.clone(),
                    modality: result.modality,
                });
            }
        }
    }
    queries.into_iter().collect()
}

/// Fold lookup answers into fresh results. Lifts without an answer, or whose
/// answer is "not a record", carry no mark.
pub fn apply_record_checks(
    results: &[ModalityResult],
    checks: &BTreeMap<RecordKey, RecordCheck>,
) -> Vec<ModalityResult> {
    results
        .iter()
        .map(|result| {
            let mut annotated = result.clone();
            annotated.records = marks_for(result, checks);
            annotated
        })
        .collect()
}

fn marks_for(
    result: &ModalityResult,
    checks: &BTreeMap<RecordKey, RecordCheck>,
) -> Vec<RecordMark> {
    if result.is_disqualified {
        return Vec::new();
    }
    let mut marks: Vec<RecordMark> = Vec::new();
    for movement in result.modality.movements() {
        for weight in result.entry.attempts(movement).iter().filter_map(|a| a.good_weight()) {
            let key = RecordKey::new(result.entry.id, result.modality, movement, weight);
            let Some(check) = checks.get(&key).filter(|c| c.is_record) else {
                continue;
            };
            if marks.iter().any(|m| m.movement == movement && m.weight == weight) {
                continue;
            }
            marks.push(RecordMark {
                movement,
                weight,
                divisions: check.record_divisions.clone(),
            });
        }
    }
    marks
}

/// Sequential annotation: query every good lift, treat failures as "not a
/// record", and return fresh results.
pub fn annotate_records(
    results: &[ModalityResult],
    lookup: &dyn RecordLookup,
    as_of: NaiveDate,
) -> Vec<ModalityResult> {
    let checks: BTreeMap<RecordKey, RecordCheck> = record_queries(results, as_of)
        .into_iter()
        .map(|(key, query)| (key, check_or_default(lookup, &query)))
        .collect();
    apply_record_checks(results, &checks)
}

/// Run one lookup, logging and swallowing failures.
pub fn check_or_default(lookup: &dyn RecordLookup, query: &RecordQuery) -> RecordCheck {
    match lookup.check_record(query) {
        Ok(check) => check,
        Err(err) => {
            warn!(
                movement = %query.movement,
                weight = query.weight,
                modality = %query.modality,
                error = %err,
                "record lookup failed, treating lift as not a record"
            );
            RecordCheck::default()
        }
    }
}
