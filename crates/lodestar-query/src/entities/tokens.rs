//! Residual keyword tokens: ASCII words and CJK runs left after the
//! structured stages, filtered against the stop-word tables.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::Dictionaries;

static TOKEN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9_\-.]*|\p{Han}+").ok());

const MIN_TOKEN_CHARS: usize = 2;

pub fn remaining(text: &str, dicts: &Dictionaries) -> Vec<String> {
    let Some(re) = TOKEN_RE.as_ref() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for m in re.find_iter(text) {
        let token = m.as_str();
        if token.is_ascii() {
            let word = token.trim_end_matches(['.', '-', '_']).to_ascii_lowercase();
            if keep(&word, dicts) {
                out.push(word);
            }
        } else {
            out.extend(
                split_cjk(token, dicts.cjk_stopwords())
                    .into_iter()
                    .filter(|seg| keep(seg, dicts)),
            );
        }
    }
    out
}

fn keep(token: &str, dicts: &Dictionaries) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS && !dicts.is_stopword(token)
}

/// Cut a run of Han characters at every stop-word occurrence.
/// `stopwords` must be ordered longest first.
pub fn split_cjk(run: &str, stopwords: &[String]) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = run;

    while let Some(c) = rest.chars().next() {
        if let Some(stop) = stopwords.iter().find(|s| rest.starts_with(s.as_str())) {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            rest = &rest[stop.len()..];
            continue;
        }
        current.push(c);
        rest = &rest[c.len_utf8()..];
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
