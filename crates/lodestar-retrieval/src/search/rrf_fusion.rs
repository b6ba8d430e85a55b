//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines the lexical and vector rankings into one list without
//! normalizing scores across channels. Ranks are 1-based list positions.

use std::cmp::Ordering;
use std::collections::HashMap;

use lodestar_core::models::{RankedHit, ScoreDebug};
use lodestar_core::SearchResult;

/// RRF contribution of a single 1-based rank.
pub fn contribution(k: u32, rank: usize) -> f64 {
    1.0 / (k as f64 + rank as f64)
}

/// Fuse the two channel rankings.
///
/// A chunk present in only one channel scores from that channel alone. A chunk
/// listed twice by the same channel keeps its first (best) rank. Output is
/// sorted by fused score descending, then best rank in either channel, then
/// chunk id, so identical inputs always produce identical order.
pub fn fuse(keyword: &[RankedHit], vector: &[RankedHit], k: u32) -> Vec<SearchResult> {
    let mut fused: HashMap<&str, ScoreDebug> = HashMap::new();

    for (index, hit) in keyword.iter().enumerate() {
        let debug = fused.entry(hit.chunk_id.as_str()).or_default();
        if debug.keyword_rank.is_none() {
            let rank = index + 1;
            debug.keyword_rank = Some(rank);
            debug.keyword_score = Some(hit.score);
            debug.rrf_score += contribution(k, rank);
        }
    }

    for (index, hit) in vector.iter().enumerate() {
        let debug = fused.entry(hit.chunk_id.as_str()).or_default();
        if debug.vector_rank.is_none() {
            let rank = index + 1;
            debug.vector_rank = Some(rank);
            debug.vector_score = Some(hit.score);
            debug.rrf_score += contribution(k, rank);
        }
    }

    let mut results: Vec<SearchResult> = fused
        .into_iter()
        .map(|(chunk_id, debug)| SearchResult {
            chunk_id: chunk_id.to_string(),
            score: debug.rrf_score,
            debug,
        })
        .collect();

    results.sort_by(compare);
    results
}

/// Fused ordering: score descending, best rank ascending, chunk id ascending.
pub fn compare(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.debug.best_rank().cmp(&b.debug.best_rank()))
        .then_with(|| a.chunk_id.cmp(&b.chunk_id))
}
