//! Record annotation across a worker pool.
//!
//! Lookups are independent of each other, so they fan out over rayon. The
//! answers are joined back by key once every lookup has returned; results are
//! never mutated while lookups are in flight.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::debug;

use barra_core::records::{
    annotate_records, apply_record_checks, check_or_default, record_queries, RecordCheck,
    RecordKey, RecordLookup,
};
use barra_core::scoring::ModalityResult;

/// Annotate every good lift of every qualified result with its record check.
///
/// With `parallel` off this is [`annotate_records`] on the calling thread.
/// Either way the output is identical for a deterministic lookup.
pub fn annotate(
    results: &[ModalityResult],
    lookup: &dyn RecordLookup,
    as_of: NaiveDate,
    parallel: bool,
) -> Vec<ModalityResult> {
    if !parallel {
        debug!(results = results.len(), "annotating records sequentially");
        return annotate_records(results, lookup, as_of);
    }

    let queries = record_queries(results, as_of);
    let count = queries.len();

    let checks: BTreeMap<RecordKey, RecordCheck> = queries
        .par_iter()
        .map(|(key, query)| (*key, check_or_default(lookup, query)))
        .collect();

    let records = checks.values().filter(|c| c.is_record).count();
    debug!(lookups = count, records, "record lookups complete");

    apply_record_checks(results, &checks)
}
