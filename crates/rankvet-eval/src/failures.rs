//! Per-query failure analysis for complete retrieval misses.

use rankvet_core::types::{QueryFailure, QueryOutcome};
use tracing::debug;

use crate::metrics::recall_at_k;

/// How many retrieved ids and scores a failure record captures.
const CAPTURED_RESULTS: usize = 3;

/// Collect the queries whose top-k retrieval missed every relevant document.
///
/// A query is a failure only when its recall is exactly zero and it has at
/// least one relevant document; queries with no relevance judgments are
/// never flagged. The record keeps the first few retrieved ids and scores
/// so a reader can see what ranked instead.
#[must_use]
pub fn collect_failures(outcomes: &[QueryOutcome], k: usize) -> Vec<QueryFailure> {
    let mut failures = Vec::new();

    for outcome in outcomes {
        let recall = recall_at_k(&outcome.retrieved_ids, &outcome.relevant_ids, k);
        if recall != 0.0 || outcome.relevant_ids.is_empty() {
            continue;
        }

        failures.push(QueryFailure {
            query_id: outcome.query_id.clone(),
            query: outcome.query.clone(),
            relevant_ids: outcome.relevant_ids.clone(),
            retrieved_ids: outcome
                .retrieved_ids
                .iter()
                .take(CAPTURED_RESULTS)
                .cloned()
                .collect(),
            top_scores: outcome
                .scores
                .iter()
                .take(CAPTURED_RESULTS)
                .copied()
                .collect(),
            recall,
        });
    }

    debug!(
        queries = outcomes.len(),
        failures = failures.len(),
        k,
        "collected zero-recall failures"
    );
    failures
}
