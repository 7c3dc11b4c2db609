//! Barra CLI: compute and check powerlifting meet results.
//!
//! Commands:
//! - `results`: score a meet snapshot, print a summary and save JSON/CSV artifacts
//! - `check`: validate a snapshot against a meet config and list each entry's
//!   resolved modalities

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use barra_core::domain::Modality;
use barra_core::records::{NoRecords, RecordLookup};
use barra_runner::{
    compute_results, load_snapshot, resolve_entries, save_results, CoefficientScorer, MeetConfig,
    MeetResults, RecordTable,
};

#[derive(Parser)]
#[command(name = "barra", about = "Barra: powerlifting meet scoring and rankings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute categories, Best Lifter and team standings for a meet.
    Results {
        /// Path to the meet TOML config.
        #[arg(long)]
        config: PathBuf,

        /// Path to the JSON entry snapshot.
        #[arg(long)]
        entries: PathBuf,

        /// Evaluation date for ages (YYYY-MM-DD). Defaults to the meet date.
        #[arg(long)]
        as_of: Option<String>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the summary only; write no files.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Validate a snapshot and show how each entry's modality resolves.
    Check {
        /// Path to the meet TOML config.
        #[arg(long)]
        config: PathBuf,

        /// Path to the JSON entry snapshot.
        #[arg(long)]
        entries: PathBuf,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Results {
            config,
            entries,
            as_of,
            output_dir,
            dry_run,
        } => run_results(&config, &entries, as_of.as_deref(), &output_dir, dry_run),
        Commands::Check {
            config,
            entries,
            json,
        } => run_check(&config, &entries, json),
    }
}

fn load_config(path: &Path, as_of: Option<&str>) -> Result<MeetConfig> {
    let mut config = MeetConfig::load(path)?;
    if let Some(date) = as_of {
        config.meet.date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid --as-of date '{date}'"))?;
    }
    Ok(config)
}

fn run_results(
    config_path: &Path,
    entries_path: &Path,
    as_of: Option<&str>,
    output_dir: &Path,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config_path, as_of)?;
    if config.points.is_empty() {
        bail!(
            "{} has no [[points]] coefficients; point scores cannot be computed",
            config_path.display()
        );
    }
    let entries = load_snapshot(entries_path, config.max_attempts())?;
    info!(meet = %config.meet.name, entries = entries.len(), "loaded meet");

    let scorer = CoefficientScorer::new(&config.points);
    let table = RecordTable::new(config.records.clone(), config.meet.open_division.clone());
    let records: &dyn RecordLookup = if table.is_empty() { &NoRecords } else { &table };

    let results = compute_results(&entries, &config, &scorer, records)?;
    print_summary(&results);

    if !dry_run {
        let run_dir = save_results(&results, output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_check(config_path: &Path, entries_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path, None)?;
    let entries = load_snapshot(entries_path, config.max_attempts())?;
    let resolved = resolve_entries(&entries, &config)?;

    if json {
        let report: Vec<serde_json::Value> = entries
            .iter()
            .zip(&resolved)
            .map(|(entry, (_, modalities))| {
                serde_json::json!({
                    "id": entry.id,
                    "name": entry.name,
                    "declared": entry.modality,
                    "modalities": modalities,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} entries OK for {}", entries.len(), config.meet.name);
    for (entry, (_, modalities)) in entries.iter().zip(&resolved) {
        println!(
            "  {:>5}  {:<28} {:<10} -> {}",
            entry.id.to_string(),
            entry.name,
            format!("\"{}\"", entry.modality),
            join_tokens(modalities)
        );
    }
    Ok(())
}

fn join_tokens(modalities: &[Modality]) -> String {
    modalities
        .iter()
        .map(|m| m.token())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_summary(results: &MeetResults) {
    println!();
    println!("=== {} ({}) ===", results.meet, results.date);
    println!();

    for category in &results.categories {
        let key = &category.key;
        println!(
            "--- {} {} {} {} ---",
            key.division,
            key.equipment,
            key.modality,
            key.weight_class
        );
        for ranked in &category.results {
            let r = &ranked.result;
            let place = if ranked.positions.total == 0 {
                "DQ".to_string()
            } else {
                ranked.positions.total.to_string()
            };
            let marks = if r.records.is_empty() { "" } else { "  [R]" };
            println!(
                "  {:>3}  {:<28} {:<12} {:>7.1}  {:>8.3}{}",
                place,
                r.entry.name,
                r.entry.team_name().unwrap_or("-"),
                r.total,
                r.point_score,
                marks
            );
        }
    }

    println!();
    println!("--- Best Lifter ---");
    for category in &results.best_lifters.awarded {
        let key = &category.key;
        let winner = &category.standings[0];
        println!(
            "  {} {} {} {}: {} ({:.3})",
            key.sex,
            key.equipment,
            key.age_division.label(),
            key.event,
            winner.name,
            winner.point_score
        );
    }
    if !results.best_lifters.no_award.is_empty() {
        println!(
            "  {} categories below the minimum population",
            results.best_lifters.no_award.len()
        );
    }

    println!();
    for standings in &results.teams {
        let scope = &standings.scope;
        let modality = scope.modality.map(|m| m.token()).unwrap_or("all");
        let status = if standings.is_valid { "" } else { " (not enough teams)" };
        println!(
            "--- Teams {} {} {}{} ---",
            scope.division, scope.equipment, modality, status
        );
        for team in &standings.teams {
            let place = if team.position == 0 {
                "-".to_string()
            } else {
                team.position.to_string()
            };
            println!(
                "  {:>3}  {:<20} {:>4} pts  {}/{}/{}",
                place,
                team.team.as_deref().unwrap_or("(no team)"),
                team.total_points,
                team.first_places,
                team.second_places,
                team.third_places
            );
        }
    }

    println!();
    println!("Digest: {}", results.digest);
}
