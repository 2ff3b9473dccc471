/// Top score below this suggests the query may be out-of-domain.
pub const SCORE_THRESHOLD_LOW: f64 = 0.5;

/// Top score above this indicates high-confidence retrieval.
pub const SCORE_THRESHOLD_STRONG: f64 = 0.85;

/// Spread below this means results are nearly indistinguishable.
pub const SPREAD_THRESHOLD_TIGHT: f64 = 0.05;

/// Spread above this means significant relevance variance.
pub const SPREAD_THRESHOLD_HIGH: f64 = 0.3;

/// Standard deviation below this means poor discrimination between chunks.
pub const STD_DEV_THRESHOLD_TIGHT: f64 = 0.02;

/// Gap between rank-1 and rank-2 above this may indicate an outlier top result.
pub const TOP_GAP_THRESHOLD_LARGE: f64 = 0.15;

/// Standard deviation below this classifies a distribution as "tight".
pub const STD_DEV_THRESHOLD_SHAPE: f64 = 0.03;

/// Spread above this classifies a distribution as "spread".
pub const SPREAD_THRESHOLD_SHAPE: f64 = 0.35;

/// Absolute delta absorbed as floating-point noise in baseline comparison.
pub const REGRESSION_TOLERANCE: f64 = 0.001;

/// Fraction of a gate threshold treated as the near-miss warning band.
pub const GATE_WARNING_BAND: f64 = 0.1;

/// Default number of bootstrap resampling rounds.
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 1000;

/// Default seed for bootstrap resampling.
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 42;

/// Lower percentile of the 95% bootstrap confidence interval.
pub const CI95_LOWER_PERCENTILE: f64 = 2.5;

/// Upper percentile of the 95% bootstrap confidence interval.
pub const CI95_UPPER_PERCENTILE: f64 = 97.5;
