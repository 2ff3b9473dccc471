use crate::stats::percentile;
use rankvet_core::types::{LatencyStats, QueryOutcome};

/// Latency percentiles and average over a batch.
///
/// Entries with latency <= 0 are treated as "not measured" and skipped,
/// never as a true zero; if none remain, every figure is zero.
#[must_use]
pub fn latency_stats(outcomes: &[QueryOutcome]) -> LatencyStats {
    let mut latencies: Vec<f64> = outcomes
        .iter()
        .map(|outcome| outcome.latency_ms)
        .filter(|latency| *latency > 0.0)
        .collect();

    if latencies.is_empty() {
        return LatencyStats::default();
    }

    let sum: f64 = latencies.iter().sum();
    latencies.sort_by(f64::total_cmp);

    LatencyStats {
        p50_ms: percentile(&latencies, 50.0),
        p95_ms: percentile(&latencies, 95.0),
        p99_ms: percentile(&latencies, 99.0),
        avg_ms: sum / latencies.len() as f64,
    }
}
