//! Batch aggregation of per-query outcomes into one aggregate result.
//!
//! Coverage and redundancy are inherently batch-level: they are computed
//! from a document-frequency map and relevant-id union folded across every
//! query, not averaged from per-query values.

use std::collections::{HashMap, HashSet};

use rankvet_core::types::{AggregateResult, EvaluationReport, QueryEvaluation, QueryOutcome};
use tracing::{debug, warn};

use crate::latency::latency_stats;
use crate::metrics::{diversity_at_k, ndcg_at_k, recall_at_k, reciprocal_rank};

/// Per-query metric values produced while folding a batch.
pub(crate) struct QueryMetrics {
    pub recall: f64,
    pub reciprocal_rank: f64,
    pub ndcg: f64,
    pub diversity: f64,
}

/// Accumulator for one pass over a batch of outcomes.
///
/// Holds the global document-frequency map and relevant-id union alongside
/// the per-metric sums, so coverage and redundancy come from the same fold
/// as the means.
#[derive(Default)]
pub(crate) struct BatchAccumulator<'a> {
    count: usize,
    recall_sum: f64,
    rr_sum: f64,
    ndcg_sum: f64,
    diversity_sum: f64,
    retrieved_counts: HashMap<&'a str, usize>,
    relevant_union: HashSet<&'a str>,
}

impl<'a> BatchAccumulator<'a> {
    /// Fold one outcome in, returning its per-query metrics.
    pub(crate) fn add(&mut self, outcome: &'a QueryOutcome, k: usize) -> QueryMetrics {
        for id in &outcome.relevant_ids {
            self.relevant_union.insert(id.as_str());
        }
        let top_k = &outcome.retrieved_ids[..outcome.retrieved_ids.len().min(k)];
        for id in top_k {
            *self.retrieved_counts.entry(id.as_str()).or_default() += 1;
        }

        let metrics = QueryMetrics {
            recall: recall_at_k(&outcome.retrieved_ids, &outcome.relevant_ids, k),
            reciprocal_rank: reciprocal_rank(&outcome.retrieved_ids, &outcome.relevant_ids),
            ndcg: ndcg_at_k(&outcome.retrieved_ids, &outcome.relevant_ids, k),
            diversity: diversity_at_k(&outcome.retrieved_ids, k),
        };

        self.count += 1;
        self.recall_sum += metrics.recall;
        self.rr_sum += metrics.reciprocal_rank;
        self.ndcg_sum += metrics.ndcg;
        self.diversity_sum += metrics.diversity;
        metrics
    }

    fn total(&self) -> f64 {
        self.count.max(1) as f64
    }

    pub(crate) fn mean_recall(&self) -> f64 {
        self.recall_sum / self.total()
    }

    pub(crate) fn mean_reciprocal_rank(&self) -> f64 {
        self.rr_sum / self.total()
    }

    pub(crate) fn mean_ndcg(&self) -> f64 {
        self.ndcg_sum / self.total()
    }

    fn mean_diversity(&self) -> f64 {
        self.diversity_sum / self.total()
    }

    /// Fraction of the relevant-id union retrieved at least once; 1.0 when
    /// the union is empty.
    pub(crate) fn coverage(&self) -> f64 {
        if self.relevant_union.is_empty() {
            return 1.0;
        }
        let found = self
            .relevant_union
            .iter()
            .filter(|id| self.retrieved_counts.contains_key(*id))
            .count();
        found as f64 / self.relevant_union.len() as f64
    }

    /// Average retrievals per distinct document; 0.0 when nothing was
    /// retrieved.
    fn redundancy(&self) -> f64 {
        if self.retrieved_counts.is_empty() {
            return 0.0;
        }
        let total: usize = self.retrieved_counts.values().sum();
        total as f64 / self.retrieved_counts.len() as f64
    }
}

/// Evaluate a batch of query outcomes at the given top-k cutoff.
///
/// An empty batch yields the zero-valued report rather than an error, so
/// empty runs do not break reporting.
#[must_use]
pub fn evaluate_batch(outcomes: &[QueryOutcome], k: usize) -> EvaluationReport {
    debug!(queries = outcomes.len(), k, "evaluating retrieval batch");

    if outcomes.is_empty() {
        return EvaluationReport {
            k,
            total_queries: 0,
            metrics: AggregateResult::default(),
            per_query: Vec::new(),
        };
    }

    let mut accumulator = BatchAccumulator::default();
    let mut per_query = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        if !outcome.scores.is_empty() && outcome.scores.len() != outcome.retrieved_ids.len() {
            warn!(
                query_id = %outcome.query_id,
                retrieved = outcome.retrieved_ids.len(),
                scores = outcome.scores.len(),
                "score sequence length does not match retrieved sequence"
            );
        }

        let metrics = accumulator.add(outcome, k);
        per_query.push(QueryEvaluation {
            query_id: outcome.query_id.clone(),
            query: outcome.query.clone(),
            recall_at_k: metrics.recall,
            reciprocal_rank: metrics.reciprocal_rank,
            ndcg_at_k: metrics.ndcg,
            diversity_at_k: metrics.diversity,
            latency_ms: outcome.latency_ms,
        });
    }

    let latency = latency_stats(outcomes);
    let metrics = AggregateResult {
        recall_at_k: accumulator.mean_recall(),
        mrr: accumulator.mean_reciprocal_rank(),
        ndcg_at_k: accumulator.mean_ndcg(),
        coverage: accumulator.coverage(),
        redundancy: accumulator.redundancy(),
        diversity_at_k: accumulator.mean_diversity(),
        latency_p50_ms: latency.p50_ms,
        latency_p95_ms: latency.p95_ms,
        latency_p99_ms: latency.p99_ms,
        latency_avg_ms: latency.avg_ms,
    };

    EvaluationReport {
        k,
        total_queries: outcomes.len(),
        metrics,
        per_query,
    }
}
