//! BM25 keyword index over chunk text.
//!
//! Terms are lowercase ASCII words (dots, slashes and colons kept so
//! addresses and interface names stay whole) plus overlapping bigrams of
//! Han runs, since Chinese text carries no word boundaries.

use std::sync::LazyLock;

use bm25::{SearchEngine, SearchEngineBuilder, Tokenizer};
use lodestar_core::errors::LodestarResult;
use lodestar_core::models::RankedHit;
use lodestar_core::traits::ILexicalSearch;
use lodestar_core::Chunk;
use regex::Regex;
use tracing::debug;

static TERM_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9_.:/-]*|\p{Han}+").ok());

/// Split text into index terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let Some(re) = TERM_RE.as_ref() else {
        return Vec::new();
    };
    let mut terms = Vec::new();
    for m in re.find_iter(text) {
        let token = m.as_str();
        if token.chars().next().is_some_and(|c| c.is_ascii()) {
            let word = token.trim_end_matches(['.', ':', '/', '-']).to_ascii_lowercase();
            if !word.is_empty() {
                terms.push(word);
            }
        } else {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() == 1 {
                terms.push(token.to_string());
            } else {
                terms.extend(chars.windows(2).map(|w| w.iter().collect::<String>()));
            }
        }
    }
    terms
}

/// [`tokenize`] plugged into the BM25 engine for both documents and queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermTokenizer;

impl Tokenizer for TermTokenizer {
    fn tokenize(&self, input_text: &str) -> Vec<String> {
        tokenize(input_text)
    }
}

/// Immutable BM25 index; rebuild it when the corpus changes so document
/// length normalization reflects every chunk.
#[derive(Default)]
pub struct KeywordIndex {
    /// `None` for an empty corpus.
    engine: Option<SearchEngine<u32, u32, TermTokenizer>>,
    /// Chunk id per corpus position.
    ids: Vec<String>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index each chunk's breadcrumb title together with its content.
    pub fn from_chunks<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) -> Self {
        let (ids, corpus): (Vec<String>, Vec<String>) = chunks
            .into_iter()
            .map(|chunk| (chunk.id.clone(), format!("{}\n{}", chunk.title(), chunk.content)))
            .unzip();
        if ids.is_empty() {
            return Self::new();
        }
        let engine =
            SearchEngineBuilder::<u32, u32, TermTokenizer>::with_tokenizer_and_corpus(TermTokenizer, corpus)
                .build();
        debug!(chunks = ids.len(), "keyword index built");
        Self {
            engine: Some(engine),
            ids,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Top `limit` chunks by BM25, best first. Ties go to the smaller chunk id.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<RankedHit> {
        let Some(engine) = self.engine.as_ref() else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        // Score the whole corpus so ties are broken here, not by the engine's cut.
        let mut hits: Vec<RankedHit> = engine
            .search(query, self.ids.len())
            .into_iter()
            .filter(|result| result.score > 0.0)
            .filter_map(|result| {
                let id = self.ids.get(result.document.id as usize)?;
                Some(RankedHit::new(id.clone(), f64::from(result.score)))
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(limit);
        hits
    }
}

impl ILexicalSearch for KeywordIndex {
    async fn search(&self, query: &str, limit: usize) -> LodestarResult<Vec<RankedHit>> {
        Ok(self.rank(query, limit))
    }
}
