use anyhow::{Context, Result};
use rankvet_core::config::{BootstrapConfig, DiagnosticThresholds, GateThresholds};
use rankvet_core::types::{
    BaselineComparison, BootstrapSummary, EvaluationReport, GateReport, QueryFailure,
    QueryOutcome, ScoreDiagnostics,
};
use rankvet_eval::aggregate::evaluate_batch;
use rankvet_eval::baseline::compare_with_baseline;
use rankvet_eval::bootstrap::bootstrap;
use rankvet_eval::diagnostics::diagnose_scores;
use rankvet_eval::failures::collect_failures;
use rankvet_eval::gate::evaluate_gate;
use serde::Serialize;

const TOP_K: usize = 3;

#[derive(Debug, Serialize)]
struct RunSummary {
    report: EvaluationReport,
    first_query_diagnostics: ScoreDiagnostics,
    bootstrap: BootstrapSummary,
    gate: GateReport,
    versus_last_week: BaselineComparison,
    failures: Vec<QueryFailure>,
}

fn main() -> Result<()> {
    let outcomes = current_run();
    let report = evaluate_batch(&outcomes, TOP_K);

    let first_query_diagnostics =
        diagnose_scores(&outcomes[0].scores, &DiagnosticThresholds::default());

    let bootstrap_config = BootstrapConfig::default().with_iterations(500).with_seed(42);
    let bootstrap_summary = bootstrap(&outcomes, TOP_K, &bootstrap_config)
        .context("bootstrap resampling over the current run")?;

    let thresholds = GateThresholds {
        min_recall: 0.7,
        min_mrr: 0.6,
        min_coverage: 0.6,
        max_latency_p95_ms: 80.0,
    };
    let gate = evaluate_gate(&report.metrics, &thresholds);

    let baseline_metrics = evaluate_batch(&last_week_run(), TOP_K).metrics;
    let versus_last_week = compare_with_baseline(&report.metrics, &baseline_metrics, TOP_K);

    let failures = collect_failures(&outcomes, TOP_K);

    let summary = RunSummary {
        report,
        first_query_diagnostics,
        bootstrap: bootstrap_summary,
        gate,
        versus_last_week,
        failures,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn outcome(
    id: &str,
    query: &str,
    retrieved: &[&str],
    relevant: &[&str],
    scores: &[f64],
    latency_ms: f64,
) -> QueryOutcome {
    QueryOutcome::new(
        id,
        query,
        retrieved.iter().map(|v| v.to_string()).collect(),
        relevant.iter().map(|v| v.to_string()).collect(),
    )
    .with_scores(scores.to_vec())
    .with_latency(latency_ms)
}

fn current_run() -> Vec<QueryOutcome> {
    vec![
        outcome(
            "q-install",
            "install the agent on debian",
            &["install-linux.md", "install-macos.md", "quickstart.md"],
            &["install-linux.md"],
            &[0.92, 0.64, 0.58],
            17.0,
        ),
        outcome(
            "q-rotate",
            "rotate api credentials",
            &["security.md", "api-keys.md", "quickstart.md"],
            &["api-keys.md"],
            &[0.77, 0.74, 0.41],
            23.0,
        ),
        outcome(
            "q-quota",
            "what happens when I exceed my quota",
            &["limits.md", "billing.md", "pricing.md"],
            &["limits.md", "billing.md"],
            &[0.89, 0.82, 0.60],
            19.0,
        ),
        outcome(
            "q-offline",
            "run fully offline without telemetry",
            &["quickstart.md", "install-linux.md", "faq.md"],
            &["airgap.md"],
            &[0.49, 0.47, 0.45],
            31.0,
        ),
        outcome(
            "q-migrate",
            "migrate from v1 config format",
            &["migration.md", "config.md", "changelog.md"],
            &["migration.md", "config.md"],
            &[0.91, 0.85, 0.52],
            14.0,
        ),
    ]
}

/// Last week's run over the same golden queries, before the index rebuild.
fn last_week_run() -> Vec<QueryOutcome> {
    let mut outcomes = current_run();
    // q-rotate used to rank api-keys.md first.
    outcomes[1].retrieved_ids.swap(0, 1);
    // The rebuild shaved a few milliseconds everywhere.
    for outcome in &mut outcomes {
        outcome.latency_ms += 4.0;
    }
    outcomes
}
