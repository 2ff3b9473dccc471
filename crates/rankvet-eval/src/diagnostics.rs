//! Score-distribution diagnostics for a single query.
//!
//! Produces the statistical summary plus heuristic warnings/insights used
//! by interactive "explain this query" reporting. Warnings and insights are
//! independent rules; any subset may fire for one score sequence.

use crate::stats;
use rankvet_core::config::DiagnosticThresholds;
use rankvet_core::types::{ScoreDiagnostics, ScoreShape};

/// Summarize one query's similarity scores, in result order.
///
/// The top-gap is taken between the first two entries as given, so callers
/// should pass scores in rank order. Returns the zero-valued summary (shape
/// `None`) for an empty sequence.
#[must_use]
pub fn diagnose_scores(scores: &[f64], thresholds: &DiagnosticThresholds) -> ScoreDiagnostics {
    if scores.is_empty() {
        return ScoreDiagnostics::default();
    }

    let mut min_score = scores[0];
    let mut max_score = scores[0];
    let mut sum = 0.0;
    for score in scores {
        if *score < min_score {
            min_score = *score;
        }
        if *score > max_score {
            max_score = *score;
        }
        sum += score;
    }
    let mean_score = sum / scores.len() as f64;
    let spread = max_score - min_score;
    let std_dev = stats::std_dev(scores);

    let sorted = stats::sorted_copy(scores);
    let q1 = stats::percentile(&sorted, 25.0);
    let median = stats::percentile(&sorted, 50.0);
    let q3 = stats::percentile(&sorted, 75.0);

    let top_gap = if scores.len() >= 2 {
        scores[0] - scores[1]
    } else {
        0.0
    };

    let shape = classify_shape(std_dev, spread, q3 - q1, thresholds);

    let count = scores.len();
    let warning_rules = [
        (
            max_score < thresholds.score_low,
            "Low top score (<0.5): query may be out-of-domain or embeddings mismatched"
                .to_string(),
        ),
        (
            spread > thresholds.spread_high,
            "High score spread (>0.3): results vary significantly in relevance".to_string(),
        ),
        (
            spread < thresholds.spread_tight && count > 1,
            "Very low spread (<0.05): results are nearly indistinguishable, consider reviewing chunking"
                .to_string(),
        ),
        (
            top_gap > thresholds.top_gap_large && count >= 2,
            format!("Large gap ({top_gap:.2}) between #1 and #2: verify top result is truly best match"),
        ),
        (
            std_dev < thresholds.std_dev_tight && count > 2,
            "Very tight distribution (σ<0.02): retrieval may not discriminate well between chunks"
                .to_string(),
        ),
    ];

    let insight_rules = [
        (
            max_score > thresholds.score_strong,
            "Strong top match (>0.85): likely high-quality retrieval".to_string(),
        ),
        (
            spread > 0.1 && spread < 0.25 && max_score > 0.7,
            "Good score separation: retrieval is discriminating effectively".to_string(),
        ),
        (
            top_gap > 0.05 && top_gap < thresholds.top_gap_large && max_score > 0.75,
            "Clear top result with gradual falloff: healthy ranking".to_string(),
        ),
    ];

    let mut warnings = Vec::new();
    for (fired, message) in warning_rules {
        if fired {
            warnings.push(message);
        }
    }

    let mut insights = Vec::new();
    for (fired, message) in insight_rules {
        if fired {
            insights.push(message);
        }
    }

    ScoreDiagnostics {
        min_score,
        max_score,
        mean_score,
        spread,
        std_dev,
        q1,
        median,
        q3,
        top_gap,
        shape: Some(shape),
        warnings,
        insights,
    }
}

fn classify_shape(
    std_dev: f64,
    spread: f64,
    iqr: f64,
    thresholds: &DiagnosticThresholds,
) -> ScoreShape {
    if std_dev < thresholds.std_dev_shape {
        return ScoreShape::Tight;
    }
    if spread > thresholds.spread_shape {
        return ScoreShape::Spread;
    }
    // Mass concentrated at the extremes: narrow middle half, wide range.
    if iqr < spread * 0.3 {
        return ScoreShape::Bimodal;
    }
    ScoreShape::Normal
}
