//! Per-query retrieval metrics.
//!
//! Every function is total: empty inputs, empty relevant sets, and k larger
//! than the result list all produce defined values rather than errors.

use std::collections::HashSet;

/// Recall at K: fraction of relevant documents found in the top-k retrieved.
///
/// Retrieved ids are deduplicated, so multiple chunks from the same document
/// count once. Returns 1.0 when `relevant` is empty (nothing to miss).
#[must_use]
pub fn recall_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    if relevant.is_empty() {
        return 1.0;
    }

    let top_k = &retrieved[..retrieved.len().min(k)];
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    let mut found: HashSet<&str> = HashSet::new();
    for id in top_k {
        if relevant_set.contains(id.as_str()) {
            found.insert(id.as_str());
        }
    }

    found.len() as f64 / relevant_set.len() as f64
}

/// Reciprocal rank of the first relevant document, or 0.0 if none appears.
///
/// Scans the full retrieved sequence: unlike recall, this deliberately
/// ignores k and measures ranking quality of the whole returned list.
#[must_use]
pub fn reciprocal_rank(retrieved: &[String], relevant: &[String]) -> f64 {
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    for (i, id) in retrieved.iter().enumerate() {
        if relevant_set.contains(id.as_str()) {
            return 1.0 / (i + 1) as f64;
        }
    }
    0.0
}

/// Normalized Discounted Cumulative Gain at K with binary relevance.
///
/// `DCG = Σ 1/log2(rank+2)` over top-k positions holding a relevant id
/// (0-indexed rank); a document gains at its first occurrence only, so
/// duplicate chunks cannot push the ratio past 1.0. IDCG places
/// `min(k, |relevant|)` relevant documents first. Returns 1.0 when
/// `relevant` is empty.
#[must_use]
pub fn ndcg_at_k(retrieved: &[String], relevant: &[String], k: usize) -> f64 {
    if relevant.is_empty() {
        return 1.0;
    }

    let top_k = &retrieved[..retrieved.len().min(k)];
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    let mut dcg = 0.0;
    let mut gained: HashSet<&str> = HashSet::new();
    for (i, id) in top_k.iter().enumerate() {
        if relevant_set.contains(id.as_str()) && gained.insert(id.as_str()) {
            dcg += 1.0 / ((i + 2) as f64).log2();
        }
    }

    let ideal_hits = k.min(relevant_set.len());
    let idcg: f64 = (0..ideal_hits).map(|i| 1.0 / ((i + 2) as f64).log2()).sum();

    if idcg == 0.0 {
        return 1.0;
    }

    dcg / idcg
}

/// Fraction of unique documents among the top-k results.
///
/// The denominator is the truncated length, not k, so short result lists
/// are not penalized. Returns 0.0 for an empty list or k = 0.
#[must_use]
pub fn diversity_at_k(retrieved: &[String], k: usize) -> f64 {
    if retrieved.is_empty() || k == 0 {
        return 0.0;
    }

    let top_k = &retrieved[..retrieved.len().min(k)];
    let unique: HashSet<&str> = top_k.iter().map(String::as_str).collect();

    unique.len() as f64 / top_k.len() as f64
}
