//! IntentClassifier: rule scoring, clause sub-intents, context signals and
//! the history-aware re-run.

use std::sync::LazyLock;

use lodestar_core::config::QueryConfig;
use lodestar_core::{Complexity, Intent, IntentContext, IntentResult};
use regex::Regex;
use tracing::debug;

use super::rules::evaluate;

static CLAUSE_SPLIT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:\band then\b|\bthen\b|\bafter that\b|\bafterwards\b|然后|接着|随后|之后|并且|;|；)\s*").ok()
});

static ERROR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:errors?|fail(?:ed|s|ure)?|down|time[ds]?\s*out|timeout|drop(?:s|ped)?|denied|unreachable|crash(?:ed)?|refused)\b|错误|失败|报错|异常|丢包|超时|不通|故障",
    )
    .ok()
});

static COMMAND_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s：:，,])(?:sudo\s+)?(?:nv|net|vtysh)\s+[a-z]|\b(?:show|display)\s+(?:ip|interface|running-config|version|bgp|ospf|vlan|qos|route)\b|`[^`]+`",
    )
    .ok()
});

static PARAMETER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d{1,3}(?:\.\d{1,3}){3}|\b(?:mtu|vlan|priority|threshold|asn?|port|queue|dscp|cos|speed|timeout)\s*[=:]?\s*\d+|(?:^|\s)--?[a-z][\w-]*|\w+\s*=\s*\S",
    )
    .ok()
});

static WORD_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+|\p{Han}").ok());

const COMPLEX_TOKENS: usize = 30;
const MODERATE_TOKENS: usize = 12;

/// Split a query into clauses on sequencing connectives ("then", "然后", ";").
pub fn split_clauses(query: &str) -> Vec<String> {
    match CLAUSE_SPLIT_RE.as_ref() {
        Some(re) => re
            .split(query)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![query.trim().to_string()],
    }
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    confidence_floor: f64,
    history_turns: usize,
}

impl IntentClassifier {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            confidence_floor: config.confidence_floor,
            history_turns: config.history_turns,
        }
    }

    /// Classify `query`, falling back to the most recent `history` turns
    /// (oldest first) when the query alone is weak.
    pub fn detect(&self, query: &str, history: &[String]) -> IntentResult {
        let eval = evaluate(query);
        let (mut intent, mut confidence) = eval.winner();
        let mut reasons = eval.reasons;

        let weak = intent == Intent::General || confidence < self.confidence_floor;
        if weak && !history.is_empty() && self.history_turns > 0 {
            let recent = &history[history.len().saturating_sub(self.history_turns)..];
            let combined = recent
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(query))
                .collect::<Vec<_>>()
                .join("\n");
            let with_history = evaluate(&combined);
            let (h_intent, h_confidence) = with_history.winner();
            debug!(
                from = %intent,
                to = %h_intent,
                turns = recent.len(),
                "re-scored intent with history"
            );
            intent = h_intent;
            confidence = h_confidence;
            reasons = with_history.reasons;
            reasons.push(format!("history: {} recent turn(s) considered", recent.len()));
        }

        let clauses = split_clauses(query);
        let sub_intents = sub_intents(&clauses, intent);

        IntentResult {
            intent,
            confidence,
            reasons,
            sub_intents,
            context: context(query, clauses.len()),
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}

fn sub_intents(clauses: &[String], primary: Intent) -> Vec<Intent> {
    let mut out: Vec<Intent> = Vec::new();
    if clauses.len() < 2 {
        return out;
    }
    for clause in clauses {
        let (intent, _) = evaluate(clause).winner();
        if intent != primary && intent != Intent::General && !out.contains(&intent) {
            out.push(intent);
        }
    }
    out
}

fn context(query: &str, clause_count: usize) -> IntentContext {
    let matches = |re: &LazyLock<Option<Regex>>| re.as_ref().is_some_and(|r| r.is_match(query));
    let tokens = WORD_RE.as_ref().map_or(0, |re| re.find_iter(query).count());

    let complexity = if tokens > COMPLEX_TOKENS || clause_count >= 3 {
        Complexity::Complex
    } else if tokens > MODERATE_TOKENS || clause_count == 2 {
        Complexity::Moderate
    } else {
        Complexity::Simple
    };

    IntentContext {
        has_error: matches(&ERROR_RE),
        has_command: matches(&COMMAND_RE),
        has_parameter: matches(&PARAMETER_RE),
        complexity,
    }
}
