//! Threshold gate over an aggregate result.
//!
//! Each threshold is independently optional: a zero value disables that
//! check entirely. With no thresholds configured the gate passes.

use rankvet_core::config::GateThresholds;
use rankvet_core::constants::GATE_WARNING_BAND;
use rankvet_core::types::{AggregateResult, GateCheck, GateReport, GateVerdict};
use tracing::debug;

/// Evaluate an aggregate result against configured thresholds.
///
/// Recall, MRR, and coverage pass when the value is at or above the
/// threshold; latency p95 passes when at or below. A check that passes
/// within 10% of its threshold is flagged as a warning so near-misses
/// surface before they turn into failures.
#[must_use]
pub fn evaluate_gate(metrics: &AggregateResult, thresholds: &GateThresholds) -> GateReport {
    let mut checks = Vec::new();

    if thresholds.min_recall > 0.0 {
        checks.push(build_check(
            "Recall@K",
            metrics.recall_at_k,
            thresholds.min_recall,
            false,
            "Relevant documents not appearing in top results",
            "Try: chunk size, embedder, or top-k — use compare to measure",
        ));
    }
    if thresholds.min_mrr > 0.0 {
        checks.push(build_check(
            "MRR",
            metrics.mrr,
            thresholds.min_mrr,
            false,
            "First relevant result not ranking high enough",
            "Try: reranking, chunk size — run compare to see what helps",
        ));
    }
    if thresholds.min_coverage > 0.0 {
        checks.push(build_check(
            "Coverage",
            metrics.coverage,
            thresholds.min_coverage,
            false,
            "Some relevant documents never retrieved",
            "Check: is the content indexed? Try a different embedder",
        ));
    }
    if thresholds.max_latency_p95_ms > 0.0 {
        checks.push(build_check(
            "Latency p95",
            metrics.latency_p95_ms,
            thresholds.max_latency_p95_ms,
            true,
            "p95 latency exceeds threshold",
            "Try: faster embedder (TEI), GPU acceleration, or reduce corpus size",
        ));
    }

    let verdict = if checks.iter().all(|c| c.passed) {
        GateVerdict::Pass
    } else {
        GateVerdict::Fail
    };

    debug!(
        checks = checks.len(),
        failed = checks.iter().filter(|c| !c.passed).count(),
        warnings = checks.iter().filter(|c| c.warning).count(),
        "gate evaluated"
    );

    GateReport { verdict, checks }
}

fn build_check(
    metric: &str,
    value: f64,
    threshold: f64,
    lower_is_better: bool,
    issue: &str,
    hint: &str,
) -> GateCheck {
    let (passed, warning) = if lower_is_better {
        let passed = value <= threshold;
        (
            passed,
            passed && value > threshold * (1.0 - GATE_WARNING_BAND),
        )
    } else {
        let passed = value >= threshold;
        (
            passed,
            passed && value < threshold * (1.0 + GATE_WARNING_BAND),
        )
    };

    let advice = if passed {
        hint.to_string()
    } else {
        format!("{issue}. {hint}")
    };

    GateCheck {
        metric: metric.to_string(),
        value,
        threshold,
        passed,
        warning,
        advice: Some(advice),
    }
}
