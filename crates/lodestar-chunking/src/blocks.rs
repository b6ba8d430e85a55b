//! Line scanner producing ordered structural blocks.
//!
//! Whitespace-only blocks never leave this module: empty fences, empty
//! quotes, untitled headers and tables without cells are dropped here.

use std::sync::LazyLock;

use regex::Regex;

use crate::table;

static HEADER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").ok());

static LIST_ITEM_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(?:[-*+]|\d{1,9}[.)])[ \t]+\S").ok());

static THEMATIC_BREAK_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").ok()
});

/// A structural unit of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Header { level: u8, title: String },
    Paragraph(String),
    /// Fenced code, fences included.
    Code(String),
    /// Table already normalized to `column=value` rows.
    Table(String),
    /// One entry per list item, markers retained.
    List(Vec<String>),
    Quote(String),
}

impl Block {
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// Code, tables and quotes are never split across chunks.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Self::Code(_) | Self::Table(_) | Self::Quote(_))
    }

    pub fn render(&self) -> String {
        match self {
            Self::Header { level, title } => format!("{} {}", "#".repeat(*level as usize), title),
            Self::Paragraph(text) | Self::Code(text) | Self::Table(text) | Self::Quote(text) => {
                text.clone()
            }
            Self::List(items) => items.join("\n"),
        }
    }
}

/// Parse a document into blocks in document order.
pub fn parse(document: &str) -> Vec<Block> {
    let lines: Vec<&str> = document.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() || is_thematic_break(trimmed) {
            i += 1;
            continue;
        }

        if let Some(span) = scan_fence(&lines, i) {
            if span.has_body {
                blocks.push(Block::Code(lines[i..span.end].join("\n")));
            }
            i = span.end;
            continue;
        }

        if let Some((level, title)) = parse_header(line) {
            if !title.is_empty() {
                blocks.push(Block::Header { level, title });
            }
            i += 1;
            continue;
        }

        if is_html_table_start(trimmed) {
            let mut end = i;
            while end < lines.len() && !lines[end].to_ascii_lowercase().contains("</table>") {
                end += 1;
            }
            let end = (end + 1).min(lines.len());
            push_table(&mut blocks, table::normalize_html(&lines[i..end].join("\n")));
            i = end;
            continue;
        }

        if trimmed.starts_with('|') {
            let end = run_end(&lines, i, |l| l.trim().starts_with('|'));
            push_table(&mut blocks, table::normalize_pipe(&lines[i..end]));
            i = end;
            continue;
        }

        if trimmed.starts_with('>') {
            let end = run_end(&lines, i, |l| l.trim().starts_with('>'));
            let raw = lines[i..end].join("\n");
            let has_body = lines[i..end]
                .iter()
                .any(|l| !l.trim().trim_start_matches('>').trim().is_empty());
            if has_body {
                blocks.push(Block::Quote(raw));
            }
            i = end;
            continue;
        }

        if is_list_item(line) {
            let (items, end) = parse_list(&lines, i);
            blocks.push(Block::List(items));
            i = end;
            continue;
        }

        let mut end = i + 1;
        let mut underline = None;
        while end < lines.len() {
            let next = lines[end];
            underline = setext_level(next);
            if underline.is_some()
                || next.trim().is_empty()
                || starts_block(next)
                || is_list_item(next)
            {
                break;
            }
            end += 1;
        }
        match underline {
            Some(level) => {
                let title = lines[i..end]
                    .iter()
                    .map(|l| l.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                blocks.push(Block::Header { level, title });
                i = end + 1;
            }
            None => {
                blocks.push(Block::Paragraph(lines[i..end].join("\n").trim().to_string()));
                i = end;
            }
        }
    }

    blocks
}

/// Level and title of an ATX header line.
pub fn parse_header(line: &str) -> Option<(u8, String)> {
    let candidate = line.trim_start();
    if !candidate.starts_with('#') {
        return None;
    }
    let bare = candidate.trim_end();
    if bare.len() <= 6 && bare.chars().all(|c| c == '#') {
        return Some((bare.len() as u8, String::new()));
    }
    let re = HEADER_RE.as_ref()?;
    let caps = re.captures(candidate)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let title = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    Some((level, title.to_string()))
}

/// Level of a setext underline: `===` marks level 1, `---` level 2.
fn setext_level(line: &str) -> Option<u8> {
    let indent = line.len() - line.trim_start().len();
    let bare = line.trim();
    if indent > 3 || bare.is_empty() {
        return None;
    }
    if bare.chars().all(|c| c == '=') {
        Some(1)
    } else if bare.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

struct FenceSpan {
    /// Exclusive end line.
    end: usize,
    has_body: bool,
}

/// Span of a fenced code block opening at `start`. An unclosed fence runs to the end.
fn scan_fence(lines: &[&str], start: usize) -> Option<FenceSpan> {
    let opening = lines[start].trim_start();
    let marker = opening.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let width = opening.chars().take_while(|c| *c == marker).count();
    if width < 3 {
        return None;
    }

    let mut close = start + 1;
    while close < lines.len() {
        let candidate = lines[close].trim();
        let run = candidate.chars().take_while(|c| *c == marker).count();
        if run >= width && candidate.chars().all(|c| c == marker) {
            break;
        }
        close += 1;
    }

    let has_body = lines[start + 1..close.min(lines.len())]
        .iter()
        .any(|l| !l.trim().is_empty());
    Some(FenceSpan {
        end: (close + 1).min(lines.len()),
        has_body,
    })
}

fn parse_list(lines: &[&str], start: usize) -> (Vec<String>, usize) {
    let mut items = vec![lines[start].trim_end().to_string()];
    let mut j = start + 1;

    while j < lines.len() {
        let line = lines[j];

        if line.trim().is_empty() {
            let mut k = j + 1;
            while k < lines.len() && lines[k].trim().is_empty() {
                k += 1;
            }
            if k < lines.len() && (is_list_item(lines[k]) || is_indented(lines[k])) {
                j = k;
                continue;
            }
            break;
        }

        if is_list_item(line) {
            items.push(line.trim_end().to_string());
            j += 1;
            continue;
        }

        if is_indented(line) {
            // Code nested inside an item stays with that item.
            let end = scan_fence(lines, j).map(|span| span.end).unwrap_or(j + 1);
            if let Some(current) = items.last_mut() {
                for l in &lines[j..end] {
                    current.push('\n');
                    current.push_str(l.trim_end());
                }
            }
            j = end;
            continue;
        }

        if !starts_block(line) {
            if let Some(current) = items.last_mut() {
                current.push('\n');
                current.push_str(line.trim_end());
            }
            j += 1;
            continue;
        }

        break;
    }

    (items, j)
}

fn push_table(blocks: &mut Vec<Block>, normalized: String) {
    if !normalized.trim().is_empty() {
        blocks.push(Block::Table(normalized));
    }
}

fn run_end(lines: &[&str], start: usize, keep: impl Fn(&str) -> bool) -> usize {
    let mut end = start;
    while end < lines.len() && keep(lines[end]) {
        end += 1;
    }
    end
}

fn starts_block(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("```")
        || trimmed.starts_with("~~~")
        || trimmed.starts_with('|')
        || trimmed.starts_with('>')
        || is_html_table_start(trimmed)
        || is_thematic_break(trimmed)
        || parse_header(line).is_some()
}

fn is_list_item(line: &str) -> bool {
    LIST_ITEM_RE.as_ref().is_some_and(|re| re.is_match(line)) && !is_thematic_break(line.trim())
}

fn is_thematic_break(trimmed: &str) -> bool {
    THEMATIC_BREAK_RE
        .as_ref()
        .is_some_and(|re| re.is_match(trimmed))
}

fn is_html_table_start(trimmed: &str) -> bool {
    trimmed
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<table"))
}

fn is_indented(line: &str) -> bool {
    line.starts_with("  ") || line.starts_with('\t')
}
