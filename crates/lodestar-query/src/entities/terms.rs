//! Technical-term and vendor matching against dictionary topics.

use lodestar_core::models::SemanticGroup;

use super::{KeywordSet, MaskedText};
use crate::dictionaries::Dictionaries;
use crate::matching::is_bounded;

/// Match every topic term case-insensitively, longest terms first, and
/// consume each match so shorter terms cannot re-match inside it.
///
/// Returns one group per matched topic, in dictionary order. Each matched
/// literal is also recorded as a keyword.
pub fn extract(
    query: &str,
    masked: &mut MaskedText,
    dicts: &Dictionaries,
    keywords: &mut KeywordSet,
) -> Vec<SemanticGroup> {
    let topics = dicts.topics();
    let mut candidates: Vec<(usize, &str)> = topics
        .iter()
        .enumerate()
        .flat_map(|(idx, topic)| topic.terms.iter().map(move |t| (idx, t.as_str())))
        .collect();
    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

    let mut matched: Vec<Vec<String>> = vec![Vec::new(); topics.len()];
    let mut hits: Vec<(usize, String)> = Vec::new();

    for (topic_idx, term) in candidates {
        let lower = masked.as_str().to_ascii_lowercase();
        let spans: Vec<(usize, usize)> = lower
            .match_indices(term)
            .map(|(start, m)| (start, start + m.len()))
            .filter(|&(start, end)| is_bounded(&lower, term, start, end))
            .collect();
        for (start, end) in spans {
            if !masked.is_intact(query, start..end) {
                continue;
            }
            let literal = lower[start..end].to_string();
            if !matched[topic_idx].contains(&literal) {
                matched[topic_idx].push(literal.clone());
            }
            hits.push((start, literal));
            masked.consume(start..end);
        }
    }

    // Keywords follow query order, not dictionary order.
    hits.sort_by_key(|(start, _)| *start);
    for (_, literal) in &hits {
        keywords.insert(literal);
    }

    topics
        .iter()
        .zip(matched)
        .filter(|(_, elements)| !elements.is_empty())
        .map(|(topic, elements)| SemanticGroup {
            kind: topic.kind.as_str().to_string(),
            topic: topic.name.clone(),
            confidence: (0.5 + 0.25 * elements.len() as f64).min(1.0),
            elements,
        })
        .collect()
}
