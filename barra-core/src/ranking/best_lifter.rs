//! Best Lifter: cross-weight-class standings by point score.
//!
//! Results are grouped by sex, equipment, age division and event type (full
//! power or bench only). Groups below the minimum population are still
//! ranked, but reported under `no_award`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AgeDivision, EntryId, Equipment, EventType, Sex};
use crate::scoring::ModalityResult;

use super::order::{descending, tie_break};

/// Minimum athletes for a Best Lifter category to be awarded.
pub const DEFAULT_MIN_ATHLETES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BestLifterKey {
    pub sex: Sex,
    pub equipment: Equipment,
    pub age_division: AgeDivision,
    pub event: EventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestLifterStanding {
    pub position: u32,
    pub entry_id: EntryId,
    pub name: String,
    pub team: Option<String>,
    pub division: String,
    pub weight_class: String,
    pub bodyweight: Option<f64>,
    pub total: f64,
    pub point_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestLifterCategory {
    pub key: BestLifterKey,
    pub standings: Vec<BestLifterStanding>,
    pub awarded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestLifterReport {
    pub awarded: Vec<BestLifterCategory>,
    pub no_award: Vec<BestLifterCategory>,
}

impl BestLifterReport {
    pub fn find(&self, key: &BestLifterKey) -> Option<&BestLifterCategory> {
        self.awarded
            .iter()
            .chain(self.no_award.iter())
            .find(|c| c.key == *key)
    }
}

/// Build Best Lifter standings from scored results.
///
/// Only qualified full-power (AST) and bench-only (S) results take part.
/// Ages are evaluated on `as_of`. Ordering: point score desc, lighter
/// bodyweight, earlier registration.
pub fn select_best_lifters(
    results: &[ModalityResult],
    as_of: NaiveDate,
    min_athletes: usize,
) -> BestLifterReport {
    let mut groups: BTreeMap<BestLifterKey, Vec<&ModalityResult>> = BTreeMap::new();
    for result in results.iter().filter(|r| r.is_qualified()) {
        let Some(event) = result.modality.best_lifter_event() else {
            continue;
        };
        let entry = &result.entry;
        let key = BestLifterKey {
            sex: entry.sex,
            equipment: entry.equipment,
            age_division: AgeDivision::from_birth_date(entry.birth_date, as_of),
            event,
        };
        groups.entry(key).or_default().push(result);
    }

    let mut report = BestLifterReport::default();
    for (key, mut members) in groups {
        members.sort_by(|a, b| {
            descending(a.point_score, b.point_score).then_with(|| tie_break(a, b))
        });
        let awarded = members.len() >= min_athletes;
        let standings = members
            .into_iter()
            .enumerate()
            .map(|(i, r)| BestLifterStanding {
                position: i as u32 + 1,
                entry_id: r.entry.id,
                name: r.entry.name.clone(),
                team: r.entry.team_name().map(str::to_string),
                division: r.entry.division.clone(),
                weight_class: r.entry.weight_class.clone(),
                bodyweight: r.entry.bodyweight,
                total: r.total,
                point_score: r.point_score,
            })
            .collect();

        let category = BestLifterCategory { key, standings, awarded };
        if awarded {
            report.awarded.push(category);
        } else {
            debug!(?key, "best lifter category below minimum population");
            report.no_award.push(category);
        }
    }
    report
}
