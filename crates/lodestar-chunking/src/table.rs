//! Table normalization.
//!
//! Both markdown pipe tables and embedded `<table>` markup are flattened to
//! one line per row of `column=value` pairs separated by `; `.

use std::sync::LazyLock;

use regex::Regex;

static ROW_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").ok());

static CELL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<t([hd])[^>]*>(.*?)</t[hd]>").ok());

static TAG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").ok());

static SEPARATOR_CELL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").ok());

/// Normalize consecutive `|`-prefixed lines.
pub fn normalize_pipe(lines: &[&str]) -> String {
    let mut rows: Vec<Vec<String>> = lines.iter().map(|l| split_pipe_row(l)).collect();

    let header = if rows.len() >= 2 && is_separator_row(&rows[1]) {
        let header = rows.remove(0);
        rows.remove(0);
        Some(header)
    } else {
        None
    };
    rows.retain(|r| !is_separator_row(r));

    render_rows(header.as_deref(), &rows)
}

/// Normalize an embedded `<table>…</table>` fragment.
pub fn normalize_html(markup: &str) -> String {
    let (Some(row_re), Some(cell_re)) = (ROW_RE.as_ref(), CELL_RE.as_ref()) else {
        return String::new();
    };

    let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
    for row in row_re.captures_iter(markup) {
        let Some(inner) = row.get(1) else { continue };
        let mut all_th = true;
        let mut cells = Vec::new();
        for cell in cell_re.captures_iter(inner.as_str()) {
            all_th &= cell.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case("h"));
            cells.push(clean_html_text(cell.get(2).map_or("", |m| m.as_str())));
        }
        if !cells.is_empty() {
            rows.push((all_th, cells));
        }
    }

    let header = if rows.first().is_some_and(|(all_th, _)| *all_th) {
        Some(rows.remove(0).1)
    } else {
        None
    };
    let body: Vec<Vec<String>> = rows.into_iter().map(|(_, cells)| cells).collect();
    render_rows(header.as_deref(), &body)
}

fn render_rows(header: Option<&[String]>, rows: &[Vec<String>]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        let pairs: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, cell)| {
                let name = header
                    .and_then(|h| h.get(i))
                    .filter(|n| !n.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("col{}", i + 1));
                format!("{name}={cell}")
            })
            .collect();
        if !pairs.is_empty() {
            lines.push(pairs.join("; "));
        }
    }

    if lines.is_empty() {
        if let Some(h) = header {
            let names: Vec<&str> = h.iter().map(String::as_str).filter(|n| !n.is_empty()).collect();
            if !names.is_empty() {
                return format!("columns: {}", names.join(", "));
            }
        }
    }
    lines.join("\n")
}

fn split_pipe_row(line: &str) -> Vec<String> {
    let escaped = line.trim().replace("\\|", "\u{0}");
    let inner = escaped.strip_prefix('|').unwrap_or(&escaped);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| collapse_whitespace(&cell.replace('\u{0}', "|")))
        .collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    let Some(re) = SEPARATOR_CELL_RE.as_ref() else {
        return false;
    };
    !cells.is_empty() && cells.iter().all(|c| re.is_match(c))
}

fn clean_html_text(fragment: &str) -> String {
    let stripped = match TAG_RE.as_ref() {
        Some(re) => re.replace_all(fragment, " ").into_owned(),
        None => fragment.to_string(),
    };
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&decoded)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
