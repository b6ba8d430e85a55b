//! EntityExtractor: network addresses, CLI commands, technical terms and
//! residual keywords, in strict precedence.
//!
//! Addresses and dictionary terms are blanked out of a working copy of the
//! query once matched, so later stages never report the same span twice.

pub mod commands;
pub mod network;
pub mod terms;
pub mod tokens;

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use lodestar_core::ExtractedEntities;

use crate::dictionaries::Dictionaries;

/// The query with consumed spans overwritten by spaces. Byte offsets are
/// preserved, so ranges found in one stage stay valid in the next.
#[derive(Debug, Clone)]
pub struct MaskedText {
    text: String,
}

impl MaskedText {
    pub fn new(query: &str) -> Self {
        Self {
            text: query.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Blank out `range`. Ranges must fall on char boundaries.
    pub fn consume(&mut self, range: Range<usize>) {
        if self.text.is_char_boundary(range.start) && self.text.is_char_boundary(range.end) {
            let blank = " ".repeat(range.len());
            self.text.replace_range(range, &blank);
        }
    }

    /// Whether every byte of `range` is still unconsumed text.
    pub fn is_intact(&self, original: &str, range: Range<usize>) -> bool {
        self.text.get(range.clone()) == original.get(range)
    }
}

/// Lowercased keywords in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct KeywordSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    pub(crate) fn insert(&mut self, keyword: &str) {
        let normalized = keyword.trim().to_lowercase();
        if normalized.is_empty() {
            return;
        }
        if self.seen.insert(normalized.clone()) {
            self.ordered.push(normalized);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Extracts [`ExtractedEntities`] from a query. Pure and cheap to share.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    dictionaries: Arc<Dictionaries>,
}

impl EntityExtractor {
    pub fn new(dictionaries: Arc<Dictionaries>) -> Self {
        Self { dictionaries }
    }

    pub fn extract(&self, query: &str) -> ExtractedEntities {
        let dicts = self.dictionaries.as_ref();
        let mut masked = MaskedText::new(query);
        let mut keywords = KeywordSet::default();

        // 1-3: CIDR, bare IPv4, IPv6.
        let network_addresses = network::extract(query, &mut masked);
        for address in &network_addresses {
            keywords.insert(&address.address);
        }

        // 4: CLI vocabulary.
        let commands = commands::extract(query, dicts);
        for word in commands::cli_words(query, dicts) {
            keywords.insert(word);
        }

        // 5: technical terms and vendors.
        let semantic_groups = terms::extract(query, &mut masked, dicts, &mut keywords);

        // 6: whatever is left.
        for token in tokens::remaining(masked.as_str(), dicts) {
            keywords.insert(&token);
        }

        ExtractedEntities {
            keywords: keywords.into_vec(),
            network_addresses,
            commands,
            semantic_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_preserves_offsets() {
        let mut m = MaskedText::new("允许10.0.0.0/8网段");
        let start = "允许".len();
        m.consume(start..start + "10.0.0.0/8".len());
        assert_eq!(m.as_str().len(), "允许10.0.0.0/8网段".len());
        assert!(m.as_str().ends_with("网段"));
        assert!(!m.as_str().contains("10.0"));
    }

    #[test]
    fn keyword_set_dedups_case_insensitively() {
        let mut set = KeywordSet::default();
        set.insert("BGP");
        set.insert("bgp");
        set.insert("  ");
        set.insert("ospf");
        assert_eq!(set.into_vec(), vec!["bgp", "ospf"]);
    }
}
