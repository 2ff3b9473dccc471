//! Bootstrap confidence-interval estimation for the headline metrics.
//!
//! Resampling the query batch with replacement shows how much the batch
//! means would move under a different draw of queries, which is what
//! separates a real quality change from sampling noise.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rankvet_core::config::BootstrapConfig;
use rankvet_core::constants::{CI95_LOWER_PERCENTILE, CI95_UPPER_PERCENTILE};
use rankvet_core::error::EvalError;
use rankvet_core::types::{BootstrapSummary, MetricSummary, QueryOutcome};
use rayon::prelude::*;
use tracing::debug;

use crate::aggregate::BatchAccumulator;
use crate::stats;

/// Headline-metric means of one resampling round.
struct RoundMeans {
    recall: f64,
    mrr: f64,
    ndcg: f64,
    coverage: f64,
}

/// Estimate mean, standard deviation, and 95% confidence interval for
/// recall, MRR, NDCG, and coverage by bootstrap resampling.
///
/// Each round draws `outcomes.len()` queries with replacement and recomputes
/// the batch means exactly as `evaluate_batch` would for that resample.
/// Round `i` derives its sub-seed from `(seed, i)`, so the output is
/// identical for the same inputs and seed whether rounds run in parallel or
/// sequentially. Rejects zero iterations and empty batches: neither input
/// admits a meaningful resample, and callers that did not request bootstrap
/// should not call this at all.
pub fn bootstrap(
    outcomes: &[QueryOutcome],
    k: usize,
    config: &BootstrapConfig,
) -> Result<BootstrapSummary, EvalError> {
    if config.iterations == 0 {
        return Err(EvalError::NoBootstrapRounds);
    }
    if outcomes.is_empty() {
        return Err(EvalError::EmptyBatch);
    }

    debug!(
        queries = outcomes.len(),
        k,
        iterations = config.iterations,
        seed = config.seed,
        parallel = config.parallel,
        "bootstrapping confidence intervals"
    );

    let rounds: Vec<RoundMeans> = if config.parallel {
        (0..config.iterations)
            .into_par_iter()
            .map(|round| resample_round(outcomes, k, round_seed(config.seed, round)))
            .collect()
    } else {
        (0..config.iterations)
            .map(|round| resample_round(outcomes, k, round_seed(config.seed, round)))
            .collect()
    };

    let recall: Vec<f64> = rounds.iter().map(|round| round.recall).collect();
    let mrr: Vec<f64> = rounds.iter().map(|round| round.mrr).collect();
    let ndcg: Vec<f64> = rounds.iter().map(|round| round.ndcg).collect();
    let coverage: Vec<f64> = rounds.iter().map(|round| round.coverage).collect();

    Ok(BootstrapSummary {
        n: rounds.len(),
        recall: summarize(&recall),
        mrr: summarize(&mrr),
        ndcg: summarize(&ndcg),
        coverage: summarize(&coverage),
    })
}

/// Sub-seed for round `round`. Depends only on `(seed, round)`, never on
/// scheduling order.
fn round_seed(seed: u64, round: usize) -> u64 {
    seed ^ (round as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn resample_round(outcomes: &[QueryOutcome], k: usize, seed: u64) -> RoundMeans {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut accumulator = BatchAccumulator::default();
    for _ in 0..outcomes.len() {
        let drawn = &outcomes[rng.gen_range(0..outcomes.len())];
        accumulator.add(drawn, k);
    }
    RoundMeans {
        recall: accumulator.mean_recall(),
        mrr: accumulator.mean_reciprocal_rank(),
        ndcg: accumulator.mean_ndcg(),
        coverage: accumulator.coverage(),
    }
}

/// Mean, population std dev, and empirical-percentile 95% CI over the
/// round means of one metric.
fn summarize(round_means: &[f64]) -> MetricSummary {
    let sorted = stats::sorted_copy(round_means);
    MetricSummary {
        mean: stats::mean(round_means),
        std_dev: stats::std_dev(round_means),
        ci95_lo: stats::percentile(&sorted, CI95_LOWER_PERCENTILE),
        ci95_hi: stats::percentile(&sorted, CI95_UPPER_PERCENTILE),
    }
}
