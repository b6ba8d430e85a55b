//! QueryEnhancer: expands extracted entities into a lexically richer
//! search string for the keyword channel.

use std::collections::HashSet;
use std::sync::Arc;

use lodestar_core::ExtractedEntities;

use crate::dictionaries::{Dictionaries, TopicKind};
use crate::matching::contains_term;

#[derive(Debug, Clone)]
pub struct QueryEnhancer {
    dictionaries: Arc<Dictionaries>,
}

impl QueryEnhancer {
    pub fn new(dictionaries: Arc<Dictionaries>) -> Self {
        Self { dictionaries }
    }

    /// Emit, in order: addresses, command tokens, full synonym sets of matched
    /// technical topics, vendor aliases, triggered action synonyms, then the raw
    /// keywords. Tokens are deduplicated case-insensitively, first occurrence kept.
    ///
    /// Every keyword token survives into the output, so the result always
    /// covers the input's non-stop-word tokens.
    pub fn enhance(&self, entities: &ExtractedEntities) -> String {
        let mut out = TokenList::default();

        for address in &entities.network_addresses {
            out.push(&address.address);
        }
        for command in &entities.commands {
            out.push(&command.command);
        }
        for kind in [TopicKind::Term, TopicKind::Vendor] {
            for group in &entities.semantic_groups {
                let Some(topic) = self.dictionaries.topic(&group.topic) else {
                    continue;
                };
                if topic.kind != kind {
                    continue;
                }
                for term in &topic.terms {
                    out.push(term);
                }
            }
        }

        let haystack = entities
            .keywords
            .iter()
            .map(String::as_str)
            .chain(entities.commands.iter().map(|c| c.action.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        for action in self.dictionaries.actions() {
            if action.triggers.iter().any(|t| contains_term(&haystack, t)) {
                for synonym in &action.synonyms {
                    out.push(synonym);
                }
            }
        }

        for keyword in &entities.keywords {
            out.push(keyword);
        }

        out.join()
    }
}

/// Whitespace tokens in first-seen order, deduplicated case-insensitively.
#[derive(Default)]
struct TokenList {
    tokens: Vec<String>,
    seen: HashSet<String>,
}

impl TokenList {
    fn push(&mut self, text: &str) {
        for token in text.split_whitespace() {
            if self.seen.insert(token.to_lowercase()) {
                self.tokens.push(token.to_string());
            }
        }
    }

    fn join(&self) -> String {
        self.tokens.join(" ")
    }
}
