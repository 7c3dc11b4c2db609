//! Categorizer and per-category ranking.
//!
//! A category is `(division, weight class, equipment, modality)`. Within it,
//! qualified results are ranked by total (ties: lighter bodyweight, then
//! earlier registration) and disqualified results follow in registration
//! order with position 0 on every axis. Each required movement also gets its
//! own ranking among the qualified results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Entry, Equipment, Modality, Movement};
use crate::scoring::ModalityResult;

use super::order::{compare_weight_classes, descending, tie_break};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub division: String,
    pub weight_class: String,
    pub equipment: Equipment,
    pub modality: Modality,
}

impl CategoryKey {
    pub fn of(result: &ModalityResult) -> Self {
        Self {
            division: result.entry.division.clone(),
            weight_class: result.entry.weight_class.clone(),
            equipment: result.entry.equipment,
            modality: result.modality,
        }
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.division
            .cmp(&other.division)
            .then(self.equipment.cmp(&other.equipment))
            .then(self.modality.cmp(&other.modality))
            .then_with(|| compare_weight_classes(&self.weight_class, &other.weight_class))
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 1-based positions within a category. 0 means "not ranked": the result is
/// disqualified or the movement is not part of the modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    pub squat: u32,
    pub bench: u32,
    pub deadlift: u32,
    pub total: u32,
}

impl Positions {
    pub fn movement(&self, movement: Movement) -> u32 {
        match movement {
            Movement::Squat => self.squat,
            Movement::Bench => self.bench,
            Movement::Deadlift => self.deadlift,
        }
    }

    fn set_movement(&mut self, movement: Movement, position: u32) {
        match movement {
            Movement::Squat => self.squat = position,
            Movement::Bench => self.bench = position,
            Movement::Deadlift => self.deadlift = position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub result: ModalityResult,
    pub positions: Positions,
}

impl RankedResult {
    pub fn entry(&self) -> &Entry {
        &self.result.entry
    }
}

/// A ranked category: qualified results first, by total position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    pub results: Vec<RankedResult>,
}

impl Category {
    pub fn qualified(&self) -> impl Iterator<Item = &RankedResult> {
        self.results.iter().filter(|r| r.result.is_qualified())
    }

    pub fn disqualified(&self) -> impl Iterator<Item = &RankedResult> {
        self.results.iter().filter(|r| r.result.is_disqualified)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Whether a result takes part in category listings: qualified, or the
/// athlete at least declared a weight in a required movement. Pure no-shows
/// are left out.
pub fn is_categorized(result: &ModalityResult) -> bool {
    result.is_qualified() || result.entry.has_declared_attempt(result.modality)
}

/// Group results into categories and rank each one. Categories come back in
/// key order.
pub fn categorize(results: &[ModalityResult]) -> Vec<Category> {
    let mut groups: BTreeMap<CategoryKey, Vec<ModalityResult>> = BTreeMap::new();
    for result in results.iter().filter(|r| is_categorized(r)) {
        groups.entry(CategoryKey::of(result)).or_default().push(result.clone());
    }

    debug!(categories = groups.len(), results = results.len(), "categorized results");

    groups
        .into_iter()
        .map(|(key, members)| rank_category(key, members))
        .collect()
}

/// Rank one category's members.
pub fn rank_category(key: CategoryKey, members: Vec<ModalityResult>) -> Category {
    let (mut qualified, mut disqualified): (Vec<_>, Vec<_>) =
        members.into_iter().partition(|r| r.is_qualified());

    qualified.sort_by(|a, b| descending(a.total, b.total).then_with(|| tie_break(a, b)));
    disqualified.sort_by_key(|r| r.entry.id);

    let mut ranked: Vec<RankedResult> = qualified
        .into_iter()
        .enumerate()
        .map(|(i, result)| RankedResult {
            result,
            positions: Positions { total: i as u32 + 1, ..Positions::default() },
        })
        .collect();

    for movement in key.modality.movements() {
        let mut order: Vec<usize> = (0..ranked.len()).collect();
        order.sort_by(|&a, &b| {
            let (ra, rb) = (&ranked[a].result, &ranked[b].result);
            descending(ra.best(movement), rb.best(movement)).then_with(|| tie_break(ra, rb))
        });
        for (pos, idx) in order.into_iter().enumerate() {
            ranked[idx].positions.set_movement(movement, pos as u32 + 1);
        }
    }

    ranked.extend(disqualified.into_iter().map(|result| RankedResult {
        result,
        positions: Positions::default(),
    }));

    Category { key, results: ranked }
}
