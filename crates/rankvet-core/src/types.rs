use serde::{Deserialize, Serialize};

/// One query's retrieval outcome, as produced by the upstream retrieval run.
///
/// `scores[i]` corresponds to `retrieved_ids[i]`; the two sequences are
/// consumed pairwise. A `latency_ms` of zero means "not measured" and is
/// excluded from latency statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub query_id: String,
    pub query: String,
    pub retrieved_ids: Vec<String>,
    pub relevant_ids: Vec<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(default)]
    pub latency_ms: f64,
}

impl QueryOutcome {
    pub fn new(
        query_id: impl Into<String>,
        query: impl Into<String>,
        retrieved_ids: Vec<String>,
        relevant_ids: Vec<String>,
    ) -> Self {
        Self {
            query_id: query_id.into(),
            query: query.into(),
            retrieved_ids,
            relevant_ids,
            scores: Vec::new(),
            latency_ms: 0.0,
        }
    }

    pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Aggregate metrics for one run. Fractional metrics lie in [0,1];
/// redundancy is >= 0 and unbounded; latency figures are milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub recall_at_k: f64,
    pub mrr: f64,
    pub ndcg_at_k: f64,
    pub coverage: f64,
    pub redundancy: f64,
    pub diversity_at_k: f64,
    #[serde(default)]
    pub latency_p50_ms: f64,
    #[serde(default)]
    pub latency_p95_ms: f64,
    #[serde(default)]
    pub latency_p99_ms: f64,
    #[serde(default)]
    pub latency_avg_ms: f64,
}

/// Per-query metric record carried alongside the aggregate in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEvaluation {
    pub query_id: String,
    pub query: String,
    pub recall_at_k: f64,
    pub reciprocal_rank: f64,
    pub ndcg_at_k: f64,
    pub diversity_at_k: f64,
    pub latency_ms: f64,
}

/// Full output of a batch evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub k: usize,
    pub total_queries: usize,
    pub metrics: AggregateResult,
    pub per_query: Vec<QueryEvaluation>,
}

/// Latency percentiles and average over one batch, milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub avg_ms: f64,
}

/// Distribution shape of a single query's score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreShape {
    Tight,
    Spread,
    Bimodal,
    Normal,
}

impl ScoreShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Spread => "spread",
            Self::Bimodal => "bimodal",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for ScoreShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistical summary of one query's similarity scores.
///
/// `shape` is `None` only for an empty score sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreDiagnostics {
    pub min_score: f64,
    pub max_score: f64,
    pub mean_score: f64,
    pub spread: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub top_gap: f64,
    pub shape: Option<ScoreShape>,
    pub warnings: Vec<String>,
    pub insights: Vec<String>,
}

/// Mean, standard deviation, and 95% confidence interval of one metric
/// across bootstrap rounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub ci95_lo: f64,
    pub ci95_hi: f64,
}

/// Bootstrap estimates for the headline metrics. `n` is the number of
/// resampling rounds, not the number of queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapSummary {
    pub n: usize,
    pub recall: MetricSummary,
    pub mrr: MetricSummary,
    pub ndcg: MetricSummary,
    pub coverage: MetricSummary,
}

/// Movement of one metric between a baseline run and the current run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDelta {
    pub metric: String,
    pub baseline: f64,
    pub current: f64,
    pub delta: f64,
    pub delta_pct: f64,
    pub higher_is_better: bool,
    pub regressed: bool,
}

/// Outcome of comparing a current aggregate against a persisted baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub deltas: Vec<MetricDelta>,
    pub has_regression: bool,
}

impl BaselineComparison {
    /// Names of the metrics that regressed, in delta order.
    pub fn regressions(&self) -> Vec<&str> {
        self.deltas
            .iter()
            .filter(|d| d.regressed)
            .map(|d| d.metric.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    Pass,
    Fail,
}

/// One threshold check. `warning` marks a pass that landed within the
/// near-miss band of its threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCheck {
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub passed: bool,
    pub warning: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

/// Verdict plus the individual checks a gate evaluation performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateReport {
    pub verdict: GateVerdict,
    pub checks: Vec<GateCheck>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.verdict == GateVerdict::Pass
    }

    pub fn fail_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.warning).count()
    }
}

/// A query whose top-k retrieval missed every relevant document.
///
/// `retrieved_ids` and `top_scores` hold at most the first three entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFailure {
    pub query_id: String,
    pub query: String,
    pub relevant_ids: Vec<String>,
    pub retrieved_ids: Vec<String>,
    pub top_scores: Vec<f64>,
    pub recall: f64,
}
