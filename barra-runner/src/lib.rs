//! Barra Runner: meet orchestration, adapters and exports.
//!
//! This crate builds on `barra-core` to provide:
//! - TOML meet configuration
//! - Snapshot loading and validation
//! - A coefficient-table point scorer and a record table lookup
//! - Parallel record annotation
//! - The full results pipeline with a content digest
//! - JSON and CSV exports

pub mod annotate;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod points;
pub mod records;
pub mod snapshot;

pub use annotate::annotate;
pub use config::{ConfigError, MeetConfig};
pub use export::{
    export_best_lifters_csv, export_json, export_results_csv, export_teams_csv, import_json,
    load_results, save_results,
};
pub use pipeline::{compute_results, resolve_entries, MeetResults, PipelineError, SCHEMA_VERSION};
pub use points::{CoefficientScorer, PointCoefficients};
pub use records::{RecordRow, RecordTable};
pub use snapshot::{load_snapshot, parse_snapshot, SnapshotError};
