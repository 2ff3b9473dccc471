use crate::constants;
use serde::{Deserialize, Serialize};

/// Tunable thresholds for score-distribution diagnostics.
///
/// The defaults are domain-tuned and must be kept for output compatibility;
/// override individual fields only for experimentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticThresholds {
    #[serde(default = "default_score_low")]
    pub score_low: f64,
    #[serde(default = "default_score_strong")]
    pub score_strong: f64,
    #[serde(default = "default_spread_tight")]
    pub spread_tight: f64,
    #[serde(default = "default_spread_high")]
    pub spread_high: f64,
    #[serde(default = "default_std_dev_tight")]
    pub std_dev_tight: f64,
    #[serde(default = "default_top_gap_large")]
    pub top_gap_large: f64,
    #[serde(default = "default_std_dev_shape")]
    pub std_dev_shape: f64,
    #[serde(default = "default_spread_shape")]
    pub spread_shape: f64,
}

/// Gate thresholds. A zero value disables that check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateThresholds {
    #[serde(default)]
    pub min_recall: f64,
    #[serde(default)]
    pub min_mrr: f64,
    #[serde(default)]
    pub min_coverage: f64,
    #[serde(default)]
    pub max_latency_p95_ms: f64,
}

impl GateThresholds {
    pub fn is_empty(&self) -> bool {
        self.min_recall == 0.0
            && self.min_mrr == 0.0
            && self.min_coverage == 0.0
            && self.max_latency_p95_ms == 0.0
    }
}

/// Bootstrap resampling parameters. The same seed always reproduces the
/// same resampling sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_bootstrap_iterations")]
    pub iterations: usize,
    #[serde(default = "default_bootstrap_seed")]
    pub seed: u64,
    #[serde(default = "default_bootstrap_parallel")]
    pub parallel: bool,
}

impl BootstrapConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

fn default_score_low() -> f64 {
    constants::SCORE_THRESHOLD_LOW
}

fn default_score_strong() -> f64 {
    constants::SCORE_THRESHOLD_STRONG
}

fn default_spread_tight() -> f64 {
    constants::SPREAD_THRESHOLD_TIGHT
}

fn default_spread_high() -> f64 {
    constants::SPREAD_THRESHOLD_HIGH
}

fn default_std_dev_tight() -> f64 {
    constants::STD_DEV_THRESHOLD_TIGHT
}

fn default_top_gap_large() -> f64 {
    constants::TOP_GAP_THRESHOLD_LARGE
}

fn default_std_dev_shape() -> f64 {
    constants::STD_DEV_THRESHOLD_SHAPE
}

fn default_spread_shape() -> f64 {
    constants::SPREAD_THRESHOLD_SHAPE
}

fn default_bootstrap_iterations() -> usize {
    constants::DEFAULT_BOOTSTRAP_ITERATIONS
}

fn default_bootstrap_seed() -> u64 {
    constants::DEFAULT_BOOTSTRAP_SEED
}

fn default_bootstrap_parallel() -> bool {
    true
}

impl Default for DiagnosticThresholds {
    fn default() -> Self {
        Self {
            score_low: default_score_low(),
            score_strong: default_score_strong(),
            spread_tight: default_spread_tight(),
            spread_high: default_spread_high(),
            std_dev_tight: default_std_dev_tight(),
            top_gap_large: default_top_gap_large(),
            std_dev_shape: default_std_dev_shape(),
            spread_shape: default_spread_shape(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            iterations: default_bootstrap_iterations(),
            seed: default_bootstrap_seed(),
            parallel: default_bootstrap_parallel(),
        }
    }
}
