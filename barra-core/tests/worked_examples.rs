//! End-to-end checks on hand-computed meets.
//!
//! Each test walks the whole engine: resolve modalities, score, categorize,
//! then Best Lifter or team standings.

use chrono::NaiveDate;

use barra_core::domain::{Attempt, Entry, Equipment, ModalityPolicy, Movement, Sex};
use barra_core::ranking::{categorize, score_teams, select_best_lifters, TeamRules, TeamScope};
use barra_core::scoring::{score_entry, ModalityResult, ScoreError, ScoreInput};

// ── Helpers ──────────────────────────────────────────────────────────

/// Stand-in formula: points per kilo of bodyweight.
fn per_kilo(input: &ScoreInput<'_>) -> Result<f64, ScoreError> {
    Ok(input.total() / input.bodyweight * 10.0)
}

fn score_all(entries: &[Entry]) -> Vec<ModalityResult> {
    entries
        .iter()
        .flat_map(|e| {
            let modalities = e.modalities(ModalityPolicy::Strict).unwrap();
            score_entry(e, &modalities, &per_kilo).unwrap()
        })
        .collect()
}

fn reference_lifter(modality: &str) -> Entry {
    Entry::new(1, "Caio", Sex::Male, "OPEN", "93", Equipment::Raw)
        .with_bodyweight(90.0)
        .with_modality(modality)
        .with_attempts(
            Movement::Squat,
            vec![Attempt::failed(100.0), Attempt::failed(105.0), Attempt::good(110.0)],
        )
        .with_attempts(
            Movement::Bench,
            vec![Attempt::good(80.0), Attempt::failed(82.0), Attempt::empty()],
        )
        .with_attempts(
            Movement::Deadlift,
            vec![Attempt::good(130.0), Attempt::good(135.0), Attempt::passed(140.0)],
        )
}

fn full_power(id: u64, team: &str, bw: f64, lifts: [f64; 3]) -> Entry {
    Entry::new(id, format!("Lifter {id}"), Sex::Female, "OPEN", "63", Equipment::Raw)
        .with_team(team)
        .with_bodyweight(bw)
        .with_birth_date(NaiveDate::from_ymd_opt(1996, 3, 3).unwrap())
        .with_modality("AST")
        .with_attempts(Movement::Squat, vec![Attempt::good(lifts[0])])
        .with_attempts(Movement::Bench, vec![Attempt::good(lifts[1])])
        .with_attempts(Movement::Deadlift, vec![Attempt::good(lifts[2])])
}

// ── Scoring ──────────────────────────────────────────────────────────

#[test]
fn full_power_reference_total() {
    let results = score_all(&[reference_lifter("AST")]);
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(!r.is_disqualified);
    assert_eq!(r.best(Movement::Squat), 110.0);
    assert_eq!(r.best(Movement::Bench), 80.0);
    assert_eq!(r.best(Movement::Deadlift), 135.0);
    assert_eq!(r.total, 325.0);
}

#[test]
fn bench_only_reference_total() {
    let results = score_all(&[reference_lifter("S")]);
    assert_eq!(results[0].total, 80.0);
    assert!(!results[0].is_disqualified);
}

#[test]
fn fan_out_lists_athlete_in_two_categories() {
    let results = score_all(&[reference_lifter("A, S")]);
    assert_eq!(results.len(), 2);

    let categories = categorize(&results);
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().all(|c| c.results[0].positions.total == 1));
    let totals: Vec<f64> = categories.iter().map(|c| c.results[0].result.total).collect();
    assert_eq!(totals, vec![110.0, 80.0]);
}

// ── Team standings ───────────────────────────────────────────────────

#[test]
fn team_example_resolves_tie_on_first_places() {
    // Totals chosen so positions 1..7 fall to X, Y, Y, X, Y, Z, X.
    let entries = vec![
        full_power(1, "X", 62.0, [150.0, 90.0, 190.0]),
        full_power(2, "Y", 62.0, [145.0, 90.0, 190.0]),
        full_power(3, "Y", 62.0, [140.0, 90.0, 190.0]),
        full_power(4, "X", 62.0, [135.0, 90.0, 190.0]),
        full_power(5, "Y", 62.0, [130.0, 90.0, 190.0]),
        full_power(6, "Z", 62.0, [125.0, 90.0, 190.0]),
        full_power(7, "X", 62.0, [120.0, 90.0, 190.0]),
    ];
    let categories = categorize(&score_all(&entries));
    let scope = TeamScope { division: "OPEN".into(), equipment: Equipment::Raw, modality: None };
    let standings = score_teams(&categories, &scope, &TeamRules::default());

    assert!(standings.is_valid);
    let summary: Vec<(String, u32, u32)> = standings
        .teams
        .iter()
        .map(|t| (t.team.clone().unwrap(), t.total_points, t.first_places))
        .collect();
    assert_eq!(
        summary,
        vec![("X".to_string(), 23, 1), ("Y".to_string(), 23, 0), ("Z".to_string(), 5, 0)]
    );
}

// ── Best Lifter ──────────────────────────────────────────────────────

#[test]
fn best_lifter_uses_point_score_not_total() {
    let entries = vec![
        full_power(1, "X", 62.5, [150.0, 90.0, 190.0]),
        full_power(2, "Y", 56.0, [140.0, 85.0, 180.0]),
        full_power(3, "Z", 70.0, [155.0, 95.0, 200.0]),
    ];
    let results = score_all(&entries);
    let report = select_best_lifters(&results, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 3);

    assert_eq!(report.awarded.len(), 1);
    let ids: Vec<u64> = report.awarded[0].standings.iter().map(|s| s.entry_id.0).collect();
    // 405/56 > 430/62.5 > 450/70
    assert_eq!(ids, vec![2, 1, 3]);
}
