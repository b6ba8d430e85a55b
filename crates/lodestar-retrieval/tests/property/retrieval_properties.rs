//! Property tests for RRF fusion and the keyword index.

use std::collections::HashSet;

use lodestar_core::models::RankedHit;
use lodestar_retrieval::memory::keyword_index::tokenize;
use lodestar_retrieval::search::rrf_fusion::{contribution, fuse};
use proptest::prelude::*;

fn ranking(max: usize) -> impl Strategy<Value = Vec<RankedHit>> {
    prop::collection::vec(0usize..40, 0..max).prop_map(|ids| {
        let mut seen = HashSet::new();
        ids.into_iter()
            .filter(|id| seen.insert(*id))
            .enumerate()
            .map(|(i, id)| RankedHit::new(format!("c{id}"), 100.0 - i as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn fused_scores_never_increase(keyword in ranking(30), vector in ranking(30), k in 1u32..200) {
        let fused = fuse(&keyword, &vector, k);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn fused_set_is_the_union(keyword in ranking(30), vector in ranking(30)) {
        let fused = fuse(&keyword, &vector, 60);
        let expected: HashSet<&str> = keyword
            .iter()
            .chain(&vector)
            .map(|h| h.chunk_id.as_str())
            .collect();
        let got: HashSet<&str> = fused.iter().map(|r| r.chunk_id.as_str()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn fusion_is_deterministic(keyword in ranking(30), vector in ranking(30)) {
        prop_assert_eq!(fuse(&keyword, &vector, 60), fuse(&keyword, &vector, 60));
    }

    #[test]
    fn contribution_decreases_with_rank(k in 1u32..500, rank in 1usize..10_000) {
        prop_assert!(contribution(k, rank) > contribution(k, rank + 1));
    }

    #[test]
    fn demoting_a_hit_never_raises_its_score(keyword in ranking(30), vector in ranking(30)) {
        prop_assume!(keyword.len() >= 2);
        let target = keyword[0].chunk_id.clone();
        let mut demoted = keyword.clone();
        demoted.swap(0, 1);

        let before = fuse(&keyword, &vector, 60);
        let after = fuse(&demoted, &vector, 60);
        let score = |results: &[lodestar_core::SearchResult]| {
            results.iter().find(|r| r.chunk_id == target).map(|r| r.score)
        };
        prop_assert!(score(&after) <= score(&before));
    }

    #[test]
    fn tokens_are_lowercase_and_non_empty(text in "[A-Za-z0-9 ./:流控拥塞]{0,60}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}
