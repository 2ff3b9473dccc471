use rankvet_core::config::{BootstrapConfig, DiagnosticThresholds, GateThresholds};
use rankvet_core::types::{AggregateResult, EvaluationReport, QueryOutcome};
use rankvet_eval::aggregate::evaluate_batch;
use rankvet_eval::baseline::compare_with_baseline;
use rankvet_eval::bootstrap::bootstrap;
use rankvet_eval::diagnostics::diagnose_scores;
use rankvet_eval::failures::collect_failures;
use rankvet_eval::gate::evaluate_gate;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A small mixed batch: three healthy queries, one partial hit, and one
/// complete miss.
fn sample_batch() -> Vec<QueryOutcome> {
    vec![
        QueryOutcome::new(
            "q-reset",
            "how do I reset my password",
            ids(&["reset.md", "auth.md", "faq.md"]),
            ids(&["reset.md"]),
        )
        .with_scores(vec![0.93, 0.71, 0.52])
        .with_latency(14.0),
        QueryOutcome::new(
            "q-billing",
            "update billing address",
            ids(&["billing.md", "invoice.md", "faq.md"]),
            ids(&["billing.md", "invoice.md"]),
        )
        .with_scores(vec![0.88, 0.84, 0.41])
        .with_latency(18.0),
        QueryOutcome::new(
            "q-export",
            "export data as csv",
            ids(&["export.md", "api.md", "faq.md"]),
            ids(&["export.md"]),
        )
        .with_scores(vec![0.90, 0.62, 0.44])
        .with_latency(11.0),
        QueryOutcome::new(
            "q-sso",
            "configure saml single sign-on",
            ids(&["auth.md", "sso.md", "faq.md"]),
            ids(&["sso.md", "scim.md"]),
        )
        .with_scores(vec![0.74, 0.69, 0.40])
        .with_latency(25.0),
        QueryOutcome::new(
            "q-webhook",
            "retry failed webhooks",
            ids(&["api.md", "faq.md", "export.md"]),
            ids(&["webhooks.md"]),
        )
        .with_scores(vec![0.48, 0.45, 0.39])
        .with_latency(21.0),
    ]
}

/// The same batch after a hypothetical bad deploy: the miss remains, the
/// partial hit degrades, and everything got slower.
fn degraded_batch() -> Vec<QueryOutcome> {
    let mut outcomes = sample_batch();
    outcomes[1].retrieved_ids = ids(&["faq.md", "api.md", "export.md"]);
    outcomes[1].scores = vec![0.51, 0.47, 0.42];
    for outcome in &mut outcomes {
        outcome.latency_ms *= 4.0;
    }
    outcomes
}

#[test]
fn batch_evaluation_produces_bounded_metrics() {
    let report = evaluate_batch(&sample_batch(), 3);

    assert_eq!(report.k, 3);
    assert_eq!(report.total_queries, 5);
    assert_eq!(report.per_query.len(), 5);

    let m = &report.metrics;
    for value in [
        m.recall_at_k,
        m.mrr,
        m.ndcg_at_k,
        m.coverage,
        m.diversity_at_k,
    ] {
        assert!((0.0..=1.0).contains(&value), "metric out of range: {value}");
    }
    assert!(m.redundancy >= 1.0, "every retrieved doc appears at least once");
    assert!(m.latency_p95_ms >= m.latency_p50_ms);
}

#[test]
fn perfectly_ranked_query_scores_ones() {
    let report = evaluate_batch(
        &[QueryOutcome::new(
            "q1",
            "perfect",
            ids(&["a", "b", "c"]),
            ids(&["a", "b"]),
        )],
        3,
    );
    let per_query = &report.per_query[0];
    assert!((per_query.recall_at_k - 1.0).abs() < f64::EPSILON);
    assert!((per_query.reciprocal_rank - 1.0).abs() < f64::EPSILON);
    assert!((per_query.ndcg_at_k - 1.0).abs() < f64::EPSILON);
}

#[test]
fn second_position_hit_is_halved_and_discounted() {
    let report = evaluate_batch(
        &[QueryOutcome::new(
            "q1",
            "offset",
            ids(&["x", "a", "y"]),
            ids(&["a"]),
        )],
        3,
    );
    let per_query = &report.per_query[0];
    assert!((per_query.recall_at_k - 1.0).abs() < f64::EPSILON);
    assert!((per_query.reciprocal_rank - 0.5).abs() < f64::EPSILON);
    assert!((per_query.ndcg_at_k - 0.631).abs() < 1e-3);
}

#[test]
fn healthy_run_passes_the_gate() {
    let report = evaluate_batch(&sample_batch(), 3);
    let thresholds = GateThresholds {
        min_recall: 0.5,
        min_mrr: 0.5,
        min_coverage: 0.5,
        max_latency_p95_ms: 100.0,
    };

    let gate = evaluate_gate(&report.metrics, &thresholds);
    assert!(gate.passed(), "checks: {:?}", gate.checks);
    assert_eq!(gate.checks.len(), 4);
}

#[test]
fn degraded_run_fails_the_gate_with_advice() {
    let report = evaluate_batch(&degraded_batch(), 3);
    let thresholds = GateThresholds {
        min_recall: 0.75,
        min_mrr: 0.0,
        min_coverage: 0.0,
        max_latency_p95_ms: 50.0,
    };

    let gate = evaluate_gate(&report.metrics, &thresholds);
    assert!(!gate.passed());
    assert!(gate.fail_count() >= 1);
    let failed = gate
        .checks
        .iter()
        .find(|c| !c.passed)
        .expect("at least one failed check");
    let advice = failed.advice.as_deref().expect("failed check carries advice");
    assert!(advice.contains(". "), "advice prefixes the issue: {advice}");
}

#[test]
fn aggregate_artifact_round_trips_as_a_baseline() {
    let report = evaluate_batch(&sample_batch(), 3);

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("baseline.json");
    let raw = serde_json::to_string_pretty(&report).expect("serialize report");
    std::fs::write(&path, raw).expect("write baseline artifact");

    let loaded = std::fs::read_to_string(&path).expect("read baseline artifact");
    let baseline: EvaluationReport = serde_json::from_str(&loaded).expect("parse baseline");

    let comparison = compare_with_baseline(&report.metrics, &baseline.metrics, 3);
    assert!(
        !comparison.has_regression,
        "a run compared against itself must not regress"
    );
    assert!(comparison.deltas.iter().all(|d| d.delta.abs() < 1e-12));
}

#[test]
fn baseline_without_latency_fields_is_still_usable() {
    // Artifacts written before latency tracking carry only the six core
    // metrics; missing latency fields deserialize to zero and compare
    // cleanly.
    let raw = r#"{
        "recall_at_k": 0.5,
        "mrr": 0.5,
        "ndcg_at_k": 0.5,
        "coverage": 0.5,
        "redundancy": 1.0,
        "diversity_at_k": 1.0
    }"#;
    let baseline: AggregateResult = serde_json::from_str(raw).expect("parse legacy artifact");
    let current = evaluate_batch(&sample_batch(), 3).metrics;

    let comparison = compare_with_baseline(&current, &baseline, 3);
    let latency = comparison
        .deltas
        .iter()
        .find(|d| d.metric == "Latency p95")
        .expect("latency delta present");
    assert!((latency.baseline - 0.0).abs() < f64::EPSILON);
    assert!((latency.delta_pct - 0.0).abs() < f64::EPSILON);
}

#[test]
fn regression_between_two_runs_is_detected() {
    let before = evaluate_batch(&sample_batch(), 3).metrics;
    let after = evaluate_batch(&degraded_batch(), 3).metrics;

    let comparison = compare_with_baseline(&after, &before, 3);
    assert!(comparison.has_regression);
    let regressions = comparison.regressions();
    assert!(regressions.contains(&"Recall@3"), "regressions: {regressions:?}");
    assert!(regressions.contains(&"Latency p95"), "regressions: {regressions:?}");
}

#[test]
fn bootstrap_is_reproducible_through_the_public_api() {
    let outcomes = sample_batch();
    let config = BootstrapConfig::default().with_iterations(200).with_seed(7);

    let first = bootstrap(&outcomes, 3, &config).expect("bootstrap");
    let second = bootstrap(&outcomes, 3, &config).expect("bootstrap");

    let first_json = serde_json::to_string(&first).expect("serialize summary");
    let second_json = serde_json::to_string(&second).expect("serialize summary");
    assert_eq!(first_json, second_json);

    assert_eq!(first.n, 200);
    assert!(first.recall.ci95_lo <= first.recall.mean);
    assert!(first.recall.mean <= first.recall.ci95_hi);
}

#[test]
fn bootstrap_interval_brackets_the_point_estimate() {
    let outcomes = sample_batch();
    let point = evaluate_batch(&outcomes, 3).metrics;
    let summary = bootstrap(&outcomes, 3, &BootstrapConfig::default().with_iterations(500))
        .expect("bootstrap");

    assert!(summary.recall.ci95_lo <= point.recall_at_k + 1e-9);
    assert!(point.recall_at_k <= summary.recall.ci95_hi + 1e-9);
    assert!(summary.mrr.ci95_lo <= point.mrr + 1e-9);
    assert!(point.mrr <= summary.mrr.ci95_hi + 1e-9);
}

#[test]
fn zero_recall_queries_surface_in_failure_analysis() {
    let failures = collect_failures(&sample_batch(), 3);
    assert_eq!(failures.len(), 1);
    let failure = &failures[0];
    assert_eq!(failure.query_id, "q-webhook");
    assert_eq!(failure.relevant_ids, ids(&["webhooks.md"]));
    assert_eq!(failure.retrieved_ids.len(), 3);
    assert_eq!(failure.top_scores.len(), 3);
    assert!((failure.recall - 0.0).abs() < f64::EPSILON);
}

#[test]
fn score_diagnostics_summarize_an_outcome() {
    let outcomes = sample_batch();
    let diagnostics = diagnose_scores(&outcomes[0].scores, &DiagnosticThresholds::default());

    assert!((diagnostics.min_score - 0.52).abs() < 1e-9);
    assert!((diagnostics.max_score - 0.93).abs() < 1e-9);
    assert!((diagnostics.spread - 0.41).abs() < 1e-9);
    assert!(diagnostics.shape.is_some());
    // Top score above the strong-match threshold reads as high confidence.
    assert!(
        diagnostics
            .insights
            .iter()
            .any(|i| i.contains("Strong top match"))
    );
}
