//! Results export: JSON and CSV artifacts.
//!
//! - **JSON**: the whole results tree, round-trippable, with schema version
//! - **CSV**: complete results (one row per ranked result), Best Lifter
//!   standings and team standings, for spreadsheets and announcers
//!
//! Unknown schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use barra_core::domain::Movement;
use barra_core::ranking::BestLifterCategory;

use crate::pipeline::{MeetResults, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(results: &MeetResults) -> Result<String> {
    serde_json::to_string_pretty(results).context("failed to serialize MeetResults to JSON")
}

/// Deserialize results from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<MeetResults> {
    let results: MeetResults =
        serde_json::from_str(json).context("failed to deserialize MeetResults from JSON")?;
    if results.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            results.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(results)
}

// ─── CSV export ─────────────────────────────────────────────────────

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn optional_weight(weight: Option<f64>) -> String {
    weight.map(|w| w.to_string()).unwrap_or_default()
}

fn position(p: u32) -> String {
    if p == 0 {
        String::new()
    } else {
        p.to_string()
    }
}

/// Complete results, in category order.
///
/// Columns: division, equipment, modality, weight_class, position, entry_id,
/// name, team, sex, bodyweight, squat, squat_position, bench, bench_position,
/// deadlift, deadlift_position, total, point_score, status, records
pub fn export_results_csv(results: &MeetResults) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "division",
        "equipment",
        "modality",
        "weight_class",
        "position",
        "entry_id",
        "name",
        "team",
        "sex",
        "bodyweight",
        "squat",
        "squat_position",
        "bench",
        "bench_position",
        "deadlift",
        "deadlift_position",
        "total",
        "point_score",
        "status",
        "records",
    ])?;

    for category in &results.categories {
        let key = &category.key;
        for ranked in &category.results {
            let r = &ranked.result;
            let entry = &r.entry;
            let lift = |m: Movement| {
                if key.modality.contains(m) {
                    r.best(m).to_string()
                } else {
                    String::new()
                }
            };
            let records = r
                .records
                .iter()
                .map(|m| format!("{}:{}:{}", m.movement.code(), m.weight, m.divisions.join("/")))
                .collect::<Vec<_>>()
                .join(";");

            wtr.write_record([
                key.division.as_str(),
                key.equipment.label(),
                key.modality.token(),
                key.weight_class.as_str(),
                &position(ranked.positions.total),
                &entry.id.0.to_string(),
                &entry.name,
                entry.team_name().unwrap_or(""),
                entry.sex.code(),
                &optional_weight(entry.bodyweight),
                &lift(Movement::Squat),
                &position(ranked.positions.squat),
                &lift(Movement::Bench),
                &position(ranked.positions.bench),
                &lift(Movement::Deadlift),
                &position(ranked.positions.deadlift),
                &r.total.to_string(),
                &format!("{:.3}", r.point_score),
                if r.is_disqualified { "DQ" } else { "OK" },
                &records,
            ])?;
        }
    }

    finish_csv(wtr)
}

/// Best Lifter standings, awarded categories first.
///
/// Columns: sex, equipment, age_division, event, awarded, position, entry_id,
/// name, team, weight_class, bodyweight, total, point_score
pub fn export_best_lifters_csv(results: &MeetResults) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "sex",
        "equipment",
        "age_division",
        "event",
        "awarded",
        "position",
        "entry_id",
        "name",
        "team",
        "weight_class",
        "bodyweight",
        "total",
        "point_score",
    ])?;

    let report = &results.best_lifters;
    let categories: Vec<&BestLifterCategory> =
        report.awarded.iter().chain(report.no_award.iter()).collect();
    for category in categories {
        let key = &category.key;
        for s in &category.standings {
            wtr.write_record([
                key.sex.code(),
                key.equipment.label(),
                key.age_division.label(),
                &key.event.to_string(),
                if category.awarded { "yes" } else { "no" },
                &s.position.to_string(),
                &s.entry_id.0.to_string(),
                &s.name,
                s.team.as_deref().unwrap_or(""),
                &s.weight_class,
                &optional_weight(s.bodyweight),
                &s.total.to_string(),
                &format!("{:.3}", s.point_score),
            ])?;
        }
    }

    finish_csv(wtr)
}

/// Team standings, one row per team per scope.
///
/// Columns: division, equipment, modality, valid, position, team, points,
/// first_places, second_places, third_places, point_score, athletes
pub fn export_teams_csv(results: &MeetResults) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "division",
        "equipment",
        "modality",
        "valid",
        "position",
        "team",
        "points",
        "first_places",
        "second_places",
        "third_places",
        "point_score",
        "athletes",
    ])?;

    for standings in &results.teams {
        let scope = &standings.scope;
        for team in &standings.teams {
            let athletes = team
                .athletes
                .iter()
                .map(|a| format!("{} ({})", a.name, a.team_points))
                .collect::<Vec<_>>()
                .join("; ");
            wtr.write_record([
                scope.division.as_str(),
                scope.equipment.label(),
                scope.modality.map(|m| m.token()).unwrap_or("ALL"),
                if standings.is_valid { "yes" } else { "no" },
                &position(team.position),
                team.team.as_deref().unwrap_or("(no team)"),
                &team.total_points.to_string(),
                &team.first_places.to_string(),
                &team.second_places.to_string(),
                &team.third_places.to_string(),
                &format!("{:.3}", team.total_point_score),
                &athletes,
            ])?;
        }
    }

    finish_csv(wtr)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Directory name for a meet's artifacts: a slug of the meet name plus its
/// date, so re-running the same meet overwrites the same directory.
pub fn artifact_dir_name(results: &MeetResults) -> String {
    let slug: String = results
        .meet
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "meet" } else { slug };
    format!("{}_{}", slug, results.date.format("%Y%m%d"))
}

/// Save the full artifact set for a meet.
///
/// Creates `{meet}_{date}/` under `output_dir` containing:
/// - `results.json`: the full `MeetResults`
/// - `results.csv`: complete results
/// - `best_lifters.csv`: Best Lifter standings
/// - `teams.csv`: team standings
///
/// Returns the path to the directory.
pub fn save_results(results: &MeetResults, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(artifact_dir_name(results));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let files = [
        ("results.json", export_json(results)?),
        ("results.csv", export_results_csv(results)?),
        ("best_lifters.csv", export_best_lifters_csv(results)?),
        ("teams.csv", export_teams_csv(results)?),
    ];
    for (name, content) in files {
        let path = run_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(run_dir)
}

/// Load results from an artifact directory's results.json.
pub fn load_results(dir: &Path) -> Result<MeetResults> {
    let path = dir.join("results.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}
