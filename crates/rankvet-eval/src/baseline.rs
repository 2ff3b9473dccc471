//! Regression comparison between a current run and a persisted baseline.

use rankvet_core::constants::REGRESSION_TOLERANCE;
use rankvet_core::types::{AggregateResult, BaselineComparison, MetricDelta};

/// Compare a current aggregate against a previously persisted baseline.
///
/// `k` is used only to label the recall metric. Higher-is-better metrics
/// regress when they drop by more than the tolerance; latency p95 regresses
/// when it grows by more than it. The tolerance absorbs floating-point noise
/// between runs and must not be tightened to exact equality.
#[must_use]
pub fn compare_with_baseline(
    current: &AggregateResult,
    baseline: &AggregateResult,
    k: usize,
) -> BaselineComparison {
    let labeled = [
        (
            format!("Recall@{k}"),
            baseline.recall_at_k,
            current.recall_at_k,
            true,
        ),
        ("MRR".to_string(), baseline.mrr, current.mrr, true),
        (
            "Coverage".to_string(),
            baseline.coverage,
            current.coverage,
            true,
        ),
        (
            "Latency p95".to_string(),
            baseline.latency_p95_ms,
            current.latency_p95_ms,
            false,
        ),
    ];

    let mut deltas = Vec::with_capacity(labeled.len());
    let mut has_regression = false;

    for (metric, baseline_value, current_value, higher_is_better) in labeled {
        let delta = current_value - baseline_value;
        let delta_pct = if baseline_value == 0.0 {
            0.0
        } else {
            delta / baseline_value * 100.0
        };
        let regressed = if higher_is_better {
            delta < -REGRESSION_TOLERANCE
        } else {
            delta > REGRESSION_TOLERANCE
        };
        has_regression |= regressed;

        deltas.push(MetricDelta {
            metric,
            baseline: baseline_value,
            current: current_value,
            delta,
            delta_pct,
            higher_is_better,
            regressed,
        });
    }

    BaselineComparison {
        deltas,
        has_regression,
    }
}
