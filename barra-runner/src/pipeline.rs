//! Full results pass over one meet snapshot.
//!
//! snapshot -> modality fan-out -> totals and point scores -> record
//! annotation -> categories -> Best Lifter -> team standings.
//!
//! Every call recomputes from the snapshot. Two calls on the same snapshot
//! and config produce equal results, and equal digests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use barra_core::domain::{Entry, EntryError, EntryId, Modality};
use barra_core::ranking::{
    categorize, score_teams, select_best_lifters, BestLifterReport, Category, TeamStandings,
};
use barra_core::records::RecordLookup;
use barra_core::scoring::{score_entry, ModalityResult, PointScorer, ScoringError};

use crate::annotate::annotate;
use crate::config::MeetConfig;
use crate::snapshot::{validate_snapshot, SnapshotError};

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("entry error: {0}")]
    Entry(#[from] EntryError),
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("failed to serialize results for digest: {0}")]
    Digest(#[source] serde_json::Error),
}

/// Complete results of one meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetResults {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub meet: String,
    pub date: NaiveDate,
    pub categories: Vec<Category>,
    pub best_lifters: BestLifterReport,
    pub teams: Vec<TeamStandings>,
    /// BLAKE3 over everything above.
    pub digest: String,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl MeetResults {
    /// Number of ranked results across all categories.
    pub fn result_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn disqualified_count(&self) -> usize {
        self.categories.iter().map(|c| c.disqualified().count()).sum()
    }

    pub fn record_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.results.iter())
            .map(|r| r.result.records.len())
            .sum()
    }
}

#[derive(Serialize)]
struct DigestInput<'a> {
    schema_version: u32,
    meet: &'a str,
    date: NaiveDate,
    categories: &'a [Category],
    best_lifters: &'a BestLifterReport,
    teams: &'a [TeamStandings],
}

/// Resolve every entry's modality string under the configured policy.
pub fn resolve_entries(
    entries: &[Entry],
    config: &MeetConfig,
) -> Result<Vec<(EntryId, Vec<Modality>)>, EntryError> {
    entries
        .iter()
        .map(|e| Ok((e.id, e.modalities(config.meet.unknown_modality)?)))
        .collect()
}

/// Score every entry under every modality it resolved to.
pub fn score_snapshot(
    entries: &[Entry],
    config: &MeetConfig,
    scorer: &dyn PointScorer,
) -> Result<Vec<ModalityResult>, PipelineError> {
    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let modalities = entry.modalities(config.meet.unknown_modality)?;
        results.extend(score_entry(entry, &modalities, scorer)?);
    }
    Ok(results)
}

/// Compute the full results tree for a meet.
pub fn compute_results(
    entries: &[Entry],
    config: &MeetConfig,
    scorer: &dyn PointScorer,
    records: &dyn RecordLookup,
) -> Result<MeetResults, PipelineError> {
    validate_snapshot(entries, config.max_attempts())?;
    let as_of = config.meet.date;

    let scored = score_snapshot(entries, config, scorer)?;
    debug!(entries = entries.len(), results = scored.len(), "scored snapshot");

    let annotated = annotate(&scored, records, as_of, true);

    let categories = categorize(&annotated);
    let best_lifters = select_best_lifters(&annotated, as_of, config.best_lifter.min_athletes);

    let rules = config.team_rules();
    let teams: Vec<TeamStandings> = config
        .team_scopes(entries)
        .iter()
        .map(|scope| score_teams(&categories, scope, &rules))
        .collect();

    let digest = content_digest(&DigestInput {
        schema_version: SCHEMA_VERSION,
        meet: &config.meet.name,
        date: as_of,
        categories: &categories,
        best_lifters: &best_lifters,
        teams: &teams,
    })?;

    let results = MeetResults {
        schema_version: SCHEMA_VERSION,
        meet: config.meet.name.clone(),
        date: as_of,
        categories,
        best_lifters,
        teams,
        digest,
    };

    info!(
        meet = %results.meet,
        categories = results.categories.len(),
        results = results.result_count(),
        disqualified = results.disqualified_count(),
        records = results.record_count(),
        best_lifter_awards = results.best_lifters.awarded.len(),
        team_scopes = results.teams.len(),
        digest = %results.digest,
        "computed meet results"
    );
    Ok(results)
}

fn content_digest(input: &DigestInput<'_>) -> Result<String, PipelineError> {
    let json = serde_json::to_vec(input).map_err(PipelineError::Digest)?;
    Ok(blake3::hash(&json).to_hex().to_string())
}
