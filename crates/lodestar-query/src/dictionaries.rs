//! Versioned vocabulary tables: stop-words, CLI vocabulary, technical-term
//! topics, vendor aliases and action synonyms.
//!
//! The default tables are embedded from `data/dictionaries.toml`; callers
//! may load a replacement file at startup or build one in tests.

use std::collections::HashSet;
use std::path::Path;

use lodestar_core::errors::{LodestarError, LodestarResult};
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../data/dictionaries.toml");

/// Whether a topic describes technology or a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Term,
    Vendor,
}

impl TopicKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Term => "term",
            Self::Vendor => "vendor",
        }
    }
}

/// A group of interchangeable terms. Matching any term selects the topic;
/// the enhancer expands to every term.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub name: String,
    pub kind: TopicKind,
    pub terms: Vec<String>,
}

/// Configuration-action synonyms, emitted when any trigger is present.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionGroup {
    pub name: String,
    pub triggers: Vec<String>,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StopwordTable {
    #[serde(default)]
    generic: Vec<String>,
    #[serde(default)]
    chinese: Vec<String>,
    #[serde(default)]
    domain: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CliTable {
    #[serde(default)]
    prefixes: Vec<String>,
    #[serde(default)]
    verbs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDictionaries {
    version: u32,
    #[serde(default)]
    stopwords: StopwordTable,
    #[serde(default)]
    cli: CliTable,
    #[serde(default)]
    topics: Vec<Topic>,
    #[serde(default)]
    actions: Vec<ActionGroup>,
}

/// Lookup-ready dictionaries. All entries are stored lowercased.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    version: u32,
    stopwords: HashSet<String>,
    /// Chinese function words, longest first, for splitting CJK runs.
    cjk_stopwords: Vec<String>,
    cli_prefixes: HashSet<String>,
    cli_verbs: HashSet<String>,
    topics: Vec<Topic>,
    actions: Vec<ActionGroup>,
}

impl Dictionaries {
    /// The tables compiled into the binary.
    pub fn embedded() -> LodestarResult<Self> {
        Self::from_toml(EMBEDDED)
    }

    pub fn from_toml(raw: &str) -> LodestarResult<Self> {
        let parsed: RawDictionaries = toml::from_str(raw).map_err(|e| LodestarError::Dictionary {
            reason: e.to_string(),
        })?;
        Self::build(parsed)
    }

    pub fn load(path: impl AsRef<Path>) -> LodestarResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Embedded tables unless `path` names a replacement file.
    pub fn load_or_embedded(path: Option<&str>) -> LodestarResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }

    fn build(raw: RawDictionaries) -> LodestarResult<Self> {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        let mut topics = Vec::with_capacity(raw.topics.len());
        for topic in raw.topics {
            let terms = lower(&topic.terms);
            if terms.is_empty() {
                return Err(LodestarError::Dictionary {
                    reason: format!("topic {} has no terms", topic.name),
                });
            }
            topics.push(Topic { terms, ..topic });
        }

        let actions = raw
            .actions
            .into_iter()
            .map(|a| ActionGroup {
                triggers: lower(&a.triggers),
                synonyms: lower(&a.synonyms),
                ..a
            })
            .collect();

        let mut cjk_stopwords = lower(&raw.stopwords.chinese);
        cjk_stopwords.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let stopwords = lower(&raw.stopwords.generic)
            .into_iter()
            .chain(lower(&raw.stopwords.domain))
            .chain(cjk_stopwords.iter().cloned())
            .collect();

        Ok(Self {
            version: raw.version,
            stopwords,
            cjk_stopwords,
            cli_prefixes: lower(&raw.cli.prefixes).into_iter().collect(),
            cli_verbs: lower(&raw.cli.verbs).into_iter().collect(),
            topics,
            actions,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Case-insensitive stop-word check across every language table.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn cjk_stopwords(&self) -> &[String] {
        &self.cjk_stopwords
    }

    pub fn is_cli_prefix(&self, word: &str) -> bool {
        self.cli_prefixes.contains(&word.to_ascii_lowercase())
    }

    pub fn is_cli_verb(&self, word: &str) -> bool {
        self.cli_verbs.contains(&word.to_ascii_lowercase())
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn actions(&self) -> &[ActionGroup] {
        &self.actions
    }
}
