//! One-line chunk summaries.

/// First meaningful line of `content`, markdown markers stripped, at most `max_chars` long.
pub fn summarize(content: &str, max_chars: usize) -> String {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            continue;
        }
        let cleaned = strip_markers(trimmed);
        if !cleaned.is_empty() {
            return truncate(cleaned, max_chars);
        }
    }
    String::new()
}

fn strip_markers(line: &str) -> &str {
    let line = line.trim_start_matches(['#', '>', '|', '*', '-', '+', ' ', '\t']);
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let line = match line[digits..].chars().next() {
        Some('.') | Some(')') if digits > 0 => &line[digits + 1..],
        _ => line,
    };
    line.trim()
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push('…');
    out
}
