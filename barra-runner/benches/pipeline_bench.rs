//! Criterion benchmarks for the full results pipeline.
//!
//! Run with: `cargo bench -p barra-runner`
//!
//! Measures:
//! - Record annotation, parallel vs sequential
//! - A complete `compute_results` pass at several meet sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use barra_core::domain::{Attempt, Entry, Equipment, Modality, Movement, Sex};
use barra_core::records::RecordLookup;
use barra_runner::{
    annotate, compute_results, pipeline::score_snapshot, CoefficientScorer, MeetConfig,
    RecordRow, RecordTable,
};

const CONFIG: &str = r#"
[meet]
name = "Bench Open"
date = "2024-08-10"

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
"#;

const CLASSES: [&str; 5] = ["66", "74", "83", "93", "105"];
const TEAMS: [&str; 6] = ["Forja", "Ferro", "Aco", "Titanio", "Bronze", ""];

fn make_meet(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| {
            let base = 120.0 + (i as f64 * 0.41).sin() * 50.0;
            let modality = if i % 4 == 0 { "A, S" } else { "AST" };
            let class = CLASSES[i % CLASSES.len()];
            let name = format!("Lifter {i}");
            Entry::new(i as u64 + 1, name, Sex::Male, "OPEN", class, Equipment::Raw)
                .with_team(TEAMS[i % TEAMS.len()])
                .with_bodyweight(64.0 + (i % 40) as f64)
                .with_modality(modality)
                .with_attempts(
                    Movement::Squat,
                    vec![
                        Attempt::good(base),
                        Attempt::good(base + 7.5),
                        Attempt::failed(base + 12.5),
                    ],
                )
                .with_attempts(
                    Movement::Bench,
                    vec![Attempt::good(base * 0.7), Attempt::failed(base * 0.75)],
                )
                .with_attempts(
                    Movement::Deadlift,
                    vec![Attempt::good(base * 1.25), Attempt::good(base * 1.3)],
                )
        })
        .collect()
}

fn make_records() -> RecordTable {
    let rows = CLASSES
        .iter()
        .flat_map(|class| {
            Movement::ALL.into_iter().map(move |movement| RecordRow {
                sex: Sex::Male,
                division: "OPEN".into(),
                weight_class: (*class).into(),
                equipment: Equipment::Raw,
                movement,
                modality: Modality::AST,
                weight: 180.0,
            })
        })
        .collect();
    RecordTable::new(rows, "OPEN")
}

fn bench_annotation(c: &mut Criterion) {
    let config = MeetConfig::from_toml(CONFIG).unwrap();
    let scorer = CoefficientScorer::new(&config.points);
    let records = make_records();
    let lookup: &dyn RecordLookup = &records;
    let scored = score_snapshot(&make_meet(2_000), &config, &scorer).unwrap();

    let mut group = c.benchmark_group("annotate");
    for parallel in [false, true] {
        group.bench_with_input(BenchmarkId::from_parameter(parallel), &parallel, |b, &parallel| {
            b.iter(|| annotate(black_box(&scored), lookup, config.meet.date, parallel))
        });
    }
    group.finish();
}

fn bench_compute_results(c: &mut Criterion) {
    let config = MeetConfig::from_toml(CONFIG).unwrap();
    let scorer = CoefficientScorer::new(&config.points);
    let records = make_records();

    let mut group = c.benchmark_group("compute_results");
    for n in [100, 1_000] {
        let meet = make_meet(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &meet, |b, meet| {
            b.iter(|| compute_results(black_box(meet), &config, &scorer, &records).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_annotation, bench_compute_results);
criterion_main!(benches);
