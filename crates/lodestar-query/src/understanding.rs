//! QueryUnderstanding: one entry point running classification, extraction
//! and enhancement over a shared dictionary set.

use std::sync::Arc;

use lodestar_core::config::QueryConfig;
use lodestar_core::errors::LodestarResult;
use lodestar_core::{ExtractedEntities, IntentResult};
use serde::Serialize;
use tracing::debug;

use crate::dictionaries::Dictionaries;
use crate::enhancer::QueryEnhancer;
use crate::entities::EntityExtractor;
use crate::intent::{split_clauses, IntentClassifier};

/// Everything the retrieval stage needs to know about one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderstoodQuery {
    pub query: String,
    pub intent: IntentResult,
    pub entities: ExtractedEntities,
    /// Expanded search string; the raw query when nothing was extracted.
    pub enhanced_query: String,
}

#[derive(Debug, Clone)]
pub struct QueryUnderstanding {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    enhancer: QueryEnhancer,
    dictionaries: Arc<Dictionaries>,
}

impl QueryUnderstanding {
    pub fn new(config: &QueryConfig, dictionaries: Arc<Dictionaries>) -> Self {
        Self {
            classifier: IntentClassifier::new(config),
            extractor: EntityExtractor::new(dictionaries.clone()),
            enhancer: QueryEnhancer::new(dictionaries.clone()),
            dictionaries,
        }
    }

    /// Load the dictionaries named by `config` (or the embedded ones) once.
    pub fn from_config(config: &QueryConfig) -> LodestarResult<Self> {
        let dictionaries = Dictionaries::load_or_embedded(config.dictionaries_path.as_deref())?;
        Ok(Self::new(config, Arc::new(dictionaries)))
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn enhancer(&self) -> &QueryEnhancer {
        &self.enhancer
    }

    pub fn understand(&self, query: &str, history: &[String]) -> UnderstoodQuery {
        let intent = self.classifier.detect(query, history);
        let entities = self.extractor.extract(query);
        let enhanced = self.enhancer.enhance(&entities);
        let enhanced_query = if enhanced.trim().is_empty() {
            query.trim().to_string()
        } else {
            enhanced
        };
        debug!(
            intent = %intent.intent,
            confidence = intent.confidence,
            keywords = entities.keywords.len(),
            "query understood"
        );
        UnderstoodQuery {
            query: query.to_string(),
            intent,
            entities,
            enhanced_query,
        }
    }

    /// Each clause of a multi-part query understood on its own.
    /// Single-clause queries yield an empty list.
    pub fn clauses(&self, query: &str) -> Vec<UnderstoodQuery> {
        let clauses = split_clauses(query);
        if clauses.len() < 2 {
            return Vec::new();
        }
        clauses
            .iter()
            .map(|clause| self.understand(clause, &[]))
            .collect()
    }
}
