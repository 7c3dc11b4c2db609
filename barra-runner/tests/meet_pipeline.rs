//! End-to-end runs over a small meet: config + snapshot in, results out.

use barra_core::domain::{AgeDivision, EntryId, Equipment, EventType, Modality, Movement, Sex};
use barra_core::ranking::BestLifterKey;
use barra_core::records::NoRecords;
use barra_core::scoring::ScoringError;
use barra_runner::{
    compute_results, parse_snapshot, CoefficientScorer, MeetConfig, PipelineError, RecordTable,
};

const CONFIG: &str = r#"
[meet]
name = "Copa Sul"
date = "2024-08-10"

[best_lifter]
min_athletes = 2

[[points]]
sex = "M"
equipment = "raw"
event = "full_power"
a = 1199.72839
b = 1025.18162
c = 0.00921

[[points]]
sex = "M"
equipment = "raw"
event = "single_lift"
a = 320.98041
b = 281.40258
c = 0.01008

[[points]]
sex = "F"
equipment = "raw"
event = "full_power"
a = 610.32796
b = 1045.59282
c = 0.03048

[[records]]
sex = "M"
division = "OPEN"
weight_class = "93"
equipment = "raw"
movement = "squat"
modality = "AST"
weight = 200.0
"#;

const SNAPSHOT: &str = r#"[
    {"id": 1, "name": "Caio", "team": "Forja", "sex": "M", "bodyweight": 90.0,
     "division": "OPEN", "weight_class": "93", "equipment": "raw", "modality": "AST",
     "squat": [200.0, 205.0, -210.0], "bench": [140.0, -145.0, -145.0],
     "deadlift": [240.0, 250.0, null]},
    {"id": 2, "name": "Davi", "team": "Ferro", "sex": "M", "bodyweight": 88.0,
     "division": "OPEN", "weight_class": "93", "equipment": "raw", "modality": "A, S",
     "squat": [190.0, -200.0, -200.0], "bench": [150.0, 155.0, -160.0]},
    {"id": 3, "name": "Enzo", "team": "Aco", "sex": "M", "bodyweight": 92.5,
     "division": "OPEN", "weight_class": "93", "equipment": "raw", "modality": "AST",
     "squat": [180.0], "bench": [-120.0, -120.0, -120.0], "deadlift": [220.0]},
    {"id": 4, "name": "Fabio", "sex": "M", "bodyweight": 91.0,
     "division": "OPEN", "weight_class": "93", "equipment": "raw", "modality": "AST"},
    {"id": 5, "name": "Gabi", "team": "Forja", "sex": "F", "bodyweight": 62.0,
     "division": "OPEN", "weight_class": "63", "equipment": "raw", "modality": "AST",
     "squat": [120.0], "bench": [70.0], "deadlift": [140.0]},
    {"id": 6, "name": "Hugo", "team": "Ferro", "sex": "M", "bodyweight": 82.0,
     "division": "OPEN", "weight_class": "83", "equipment": "raw", "modality": "AST",
     "squat": [180.0], "bench": [120.0], "deadlift": [220.0]}
]"#;

fn run() -> barra_runner::MeetResults {
    let config = MeetConfig::from_toml(CONFIG).unwrap();
    let entries = parse_snapshot(SNAPSHOT, config.max_attempts()).unwrap();
    let scorer = CoefficientScorer::new(&config.points);
    let records = RecordTable::new(config.records.clone(), &config.meet.open_division);
    compute_results(&entries, &config, &scorer, &records).unwrap()
}

#[test]
fn categories_cover_fan_out_and_skip_no_shows() {
    let results = run();
    let keys: Vec<(Modality, &str)> = results
        .categories
        .iter()
        .map(|c| (c.key.modality, c.key.weight_class.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Modality::A, "93"),
            (Modality::S, "93"),
            (Modality::AST, "63"),
            (Modality::AST, "83"),
            (Modality::AST, "93"),
        ]
    );

    let heavy = &results.categories[4];
    let ids: Vec<EntryId> = heavy.results.iter().map(|r| r.entry().id).collect();
    assert_eq!(ids, vec![EntryId(1), EntryId(3)]);
    assert_eq!(heavy.results[0].result.total, 595.0);
    assert_eq!(heavy.results[1].positions.total, 0);
    assert!(heavy.results[1].result.is_disqualified);

    assert_eq!(results.categories[0].results[0].result.total, 190.0);
    assert_eq!(results.categories[1].results[0].result.total, 155.0);
}

#[test]
fn record_lift_is_marked() {
    let results = run();
    let caio = &results.categories[4].results[0].result;
    assert_eq!(caio.records.len(), 1);
    assert_eq!(caio.records[0].movement, Movement::Squat);
    assert_eq!(caio.records[0].weight, 205.0);
    assert_eq!(caio.records[0].divisions, vec!["OPEN".to_string()]);
    assert_eq!(results.record_count(), 1);
}

#[test]
fn best_lifter_awards_by_points() {
    let results = run();
    let key = BestLifterKey {
        sex: Sex::Male,
        equipment: Equipment::Raw,
        age_division: AgeDivision::Open,
        event: EventType::FullPower,
    };
    let category = results.best_lifters.find(&key).unwrap();
    assert!(category.awarded);
    let ids: Vec<EntryId> = category.standings.iter().map(|s| s.entry_id).collect();
    assert_eq!(ids, vec![EntryId(1), EntryId(6)]);

    // One bench-only lifter and one woman: both below the minimum.
    assert_eq!(results.best_lifters.no_award.len(), 2);
}

#[test]
fn team_standings_count_every_category() {
    let results = run();
    assert_eq!(results.teams.len(), 1);
    let standings = &results.teams[0];
    assert!(standings.is_valid);
    assert_eq!(standings.team_count, 3);

    let table: Vec<(&str, u32, u32, u32)> = standings
        .teams
        .iter()
        .map(|t| (t.team.as_deref().unwrap_or(""), t.position, t.total_points, t.first_places))
        .collect();
    assert_eq!(
        table,
        vec![("Ferro", 1, 36, 3), ("Forja", 2, 24, 2), ("Aco", 3, 0, 0)]
    );
}

#[test]
fn same_snapshot_same_digest() {
    assert_eq!(run().digest, run().digest);
}

#[test]
fn missing_coefficients_are_fatal() {
    let config = MeetConfig::from_toml(CONFIG).unwrap();
    let entries = parse_snapshot(SNAPSHOT, config.max_attempts()).unwrap();
    let scorer = CoefficientScorer::new(&config.points[..1]);
    let err = compute_results(&entries, &config, &scorer, &NoRecords).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Scoring(ScoringError::Scorer { id: EntryId(2), .. })
    ));
}

#[test]
fn lenient_policy_scores_unknown_tokens_as_full_power() {
    let config_text = CONFIG.replace(
        "date = \"2024-08-10\"",
        "date = \"2024-08-10\"\nunknown_modality = \"full_power\"",
    );
    let config = MeetConfig::from_toml(&config_text).unwrap();
    let snapshot = SNAPSHOT.replace("\"modality\": \"A, S\"", "\"modality\": \"ASTX\"");
    let entries = parse_snapshot(&snapshot, config.max_attempts()).unwrap();
    let scorer = CoefficientScorer::new(&config.points);
    let results = compute_results(&entries, &config, &scorer, &NoRecords).unwrap();

    // Davi has no deadlift, so full power disqualifies him.
    let heavy = results
        .categories
        .iter()
        .find(|c| c.key.modality == Modality::AST && c.key.weight_class == "93")
        .unwrap();
    let davi = heavy.results.iter().find(|r| r.entry().id == EntryId(2)).unwrap();
    assert!(davi.result.is_disqualified);

    let strict = MeetConfig::from_toml(CONFIG).unwrap();
    assert!(matches!(
        compute_results(&entries, &strict, &scorer, &NoRecords),
        Err(PipelineError::Entry(_))
    ));
}
