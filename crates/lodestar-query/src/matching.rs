//! Term matching shared by the classifier and the extractor.

/// Whether `text[start..end]` (an occurrence of `term`) stands alone.
/// ASCII edges need a non-word neighbour; CJK edges match anywhere.
pub(crate) fn is_bounded(text: &str, term: &str, start: usize, end: usize) -> bool {
    let word_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let starts_ascii = term.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_ascii = term.chars().next_back().is_some_and(|c| c.is_ascii_alphanumeric());
    let before_ok = !starts_ascii
        || text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !word_char(c));
    let after_ok = !ends_ascii || text[end..].chars().next().map_or(true, |c| !word_char(c));
    before_ok && after_ok
}

/// Whether lowercased `text` contains `term` as a standalone occurrence.
pub(crate) fn contains_term(text: &str, term: &str) -> bool {
    text.match_indices(term)
        .any(|(start, m)| is_bounded(text, term, start, start + m.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_terms_respect_word_edges() {
        assert!(contains_term("why is bgp down", "down"));
        assert!(!contains_term("download the image", "down"));
        assert!(contains_term("pfc/ecn", "ecn"));
    }

    #[test]
    fn cjk_terms_match_inside_runs() {
        assert!(contains_term("如何配置访问控制列表", "配置"));
    }
}
