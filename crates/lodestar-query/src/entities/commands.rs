//! CLI command recognition against the dictionary allow-list.

use std::sync::LazyLock;

use lodestar_core::models::CommandEntity;
use regex::Regex;

use crate::dictionaries::Dictionaries;

/// Runs of space-separated ASCII words; CJK text and punctuation end a run.
static ASCII_RUN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9_\-./:=]*(?:[ \t]+[A-Za-z0-9_\-./:=]+)*").ok()
});

static WORD_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_\-]*").ok());

/// Commands found in `query`.
///
/// A command starts at a CLI prefix (`nv`, `sudo`, ...) or verb and extends
/// over the following words until a stop-word. Prefix-led commands need an
/// action word after the prefixes; verb-led ones need at least one argument.
pub fn extract(query: &str, dicts: &Dictionaries) -> Vec<CommandEntity> {
    let Some(re) = ASCII_RUN_RE.as_ref() else {
        return Vec::new();
    };
    let mut out: Vec<CommandEntity> = Vec::new();

    for run in re.find_iter(query) {
        let tokens: Vec<&str> = run
            .as_str()
            .split_whitespace()
            .map(|t| t.trim_end_matches(['.', ',', ';', ':']))
            .filter(|t| !t.is_empty())
            .collect();

        let mut i = 0;
        while i < tokens.len() {
            if !(dicts.is_cli_prefix(tokens[i]) || dicts.is_cli_verb(tokens[i])) {
                i += 1;
                continue;
            }
            let mut action_at = i;
            while action_at < tokens.len() && dicts.is_cli_prefix(tokens[action_at]) {
                action_at += 1;
            }
            let mut end = action_at;
            while end < tokens.len() && !dicts.is_stopword(tokens[end]) {
                end += 1;
            }

            let prefixed = action_at > i;
            let complete = if prefixed {
                action_at < end
            } else {
                end - i >= 2
            };
            if !complete {
                i += 1;
                continue;
            }

            let command = CommandEntity {
                command: tokens[i..end].join(" ").to_lowercase(),
                action: tokens[action_at].to_lowercase(),
                target: tokens[action_at + 1..end].join(" ").to_lowercase(),
            };
            if !out.iter().any(|c| c.command == command.command) {
                out.push(command);
            }
            i = end;
        }
    }

    out
}

/// CLI verbs and nouns appearing anywhere in `query`, lowercased, in order.
pub fn cli_words<'a>(query: &'a str, dicts: &'a Dictionaries) -> impl Iterator<Item = &'a str> + 'a {
    WORD_RE
        .as_ref()
        .into_iter()
        .flat_map(move |re| re.find_iter(query))
        .map(|m| m.as_str())
        .filter(move |w| dicts.is_cli_verb(w))
}
