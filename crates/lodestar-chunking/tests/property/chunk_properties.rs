use lodestar_chunking::chunk;
use lodestar_chunking::table::{normalize_html, normalize_pipe};
use proptest::prelude::*;

/// A generated block and what the chunker must keep whole from it.
#[derive(Debug, Clone)]
enum Atomic {
    None,
    Code(String),
    /// Normalized table text.
    Table(String),
}

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,8}",
        1 => "[配置流控交换机接口队列]{1,4}",
        1 => "(RoCE|nv|PFC|swp1)[配置流控接口]{1,3}",
    ]
}

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 3..40).prop_map(|words| words.join(" "))
}

/// One generated block; tags are assigned by position so every code block
/// and table row is unique within a document.
#[derive(Debug, Clone)]
enum Shape {
    Paragraph(String),
    Code(Vec<String>),
    PipeTable(Vec<String>),
    HtmlTable(Vec<String>),
    List(Vec<String>),
    Header(usize, String),
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        3 => paragraph().prop_map(Shape::Paragraph),
        1 => prop::collection::vec("[a-z]{1,6}", 1..8).prop_map(Shape::Code),
        1 => prop::collection::vec(word(), 1..12).prop_map(Shape::PipeTable),
        1 => prop::collection::vec(word(), 1..8).prop_map(Shape::HtmlTable),
        1 => prop::collection::vec(paragraph(), 1..5).prop_map(Shape::List),
        1 => (1usize..4, "[A-Z][a-z]{2,10}").prop_map(|(level, title)| Shape::Header(level, title)),
    ]
}

fn render(tag: usize, shape: Shape) -> (String, Atomic) {
    match shape {
        Shape::Paragraph(text) => (text, Atomic::None),
        Shape::Code(lines) => {
            let code = format!("```\ncode{tag}\n{}\n```", lines.join("\n\n"));
            (code.clone(), Atomic::Code(code))
        }
        Shape::PipeTable(values) => {
            let mut lines = vec![format!("| key{tag} | value |"), "|---|---|".to_string()];
            for (i, value) in values.iter().enumerate() {
                lines.push(format!("| p{tag}x{i}y | {value} |"));
            }
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let normalized = normalize_pipe(&refs);
            (lines.join("\n"), Atomic::Table(normalized))
        }
        Shape::HtmlTable(values) => {
            let mut markup = format!("<table>\n<tr><th>端口{tag}</th><th>速率</th></tr>");
            for (i, value) in values.iter().enumerate() {
                markup.push_str(&format!("\n<tr><td>h{tag}x{i}y</td><td>{value}</td></tr>"));
            }
            markup.push_str("\n</table>");
            let normalized = normalize_html(&markup);
            (markup, Atomic::Table(normalized))
        }
        Shape::List(items) => (
            items.iter().map(|i| format!("- {i}")).collect::<Vec<_>>().join("\n"),
            Atomic::None,
        ),
        Shape::Header(level, title) => (format!("{} {title}", "#".repeat(level)), Atomic::None),
    }
}

fn document() -> impl Strategy<Value = (String, Vec<Atomic>)> {
    prop::collection::vec(shape(), 1..25).prop_map(|shapes| {
        let (blocks, atomics): (Vec<String>, Vec<Atomic>) = shapes
            .into_iter()
            .enumerate()
            .map(|(tag, shape)| render(tag, shape))
            .unzip();
        (blocks.join("\n\n"), atomics)
    })
}

fn codes(atomics: &[Atomic]) -> impl Iterator<Item = &str> {
    atomics.iter().filter_map(|a| match a {
        Atomic::Code(c) => Some(c.as_str()),
        _ => None,
    })
}

fn tables(atomics: &[Atomic]) -> impl Iterator<Item = &str> {
    atomics.iter().filter_map(|a| match a {
        Atomic::Table(t) => Some(t.as_str()),
        _ => None,
    })
}

proptest! {
    #[test]
    fn chunks_are_never_empty((doc, _) in document()) {
        if let Ok(arena) = chunk(&doc, 400, 200, 50) {
            prop_assert!(!arena.is_empty());
            for c in arena.iter() {
                prop_assert!(!c.content.trim().is_empty(), "empty chunk {}", c.id);
            }
        }
    }

    #[test]
    fn every_child_resolves_its_parent((doc, _) in document()) {
        if let Ok(arena) = chunk(&doc, 400, 200, 50) {
            for child in arena.children() {
                let parent = arena.parent_of(child);
                prop_assert!(parent.is_some(), "dangling parent for {}", child.id);
                prop_assert!(parent.is_some_and(|p| p.is_parent()));
            }
        }
    }

    #[test]
    fn code_blocks_are_never_split((doc, atomics) in document()) {
        if let Ok(arena) = chunk(&doc, 400, 200, 50) {
            for code in codes(&atomics) {
                prop_assert!(arena.iter().any(|c| c.content.contains(code)));
                let holders: Vec<_> = arena.parents().filter(|p| p.content.contains(code)).collect();
                for parent in holders {
                    let children = arena.children_of(&parent.id);
                    if !children.is_empty() {
                        prop_assert!(children.iter().any(|c| c.content.contains(code)));
                    }
                }
            }
            for c in arena.children() {
                let fences = c.content.lines().filter(|l| l.starts_with("```")).count();
                prop_assert_eq!(fences % 2, 0);
            }
        }
    }

    #[test]
    fn tables_are_never_split((doc, atomics) in document()) {
        if let Ok(arena) = chunk(&doc, 400, 200, 50) {
            for table in tables(&atomics) {
                prop_assert!(!table.is_empty());
                let holder = arena.parents().find(|p| p.content.contains(table));
                prop_assert!(holder.is_some(), "no parent holds table {table:?}");

                if let Some(parent) = holder {
                    let children = arena.children_of(&parent.id);
                    if !children.is_empty() {
                        prop_assert!(children.iter().any(|c| c.content.contains(table)));
                    }
                }
                // Any window touching a row carries the whole table.
                for child in arena.children() {
                    let touches = table.lines().any(|row| child.content.contains(row));
                    prop_assert!(!touches || child.content.contains(table), "table cut in {}", child.id);
                }
            }
        }
    }

    #[test]
    fn chunking_is_deterministic((doc, _) in document()) {
        let first = chunk(&doc, 400, 200, 50).ok().map(|a| a.into_chunks());
        let second = chunk(&doc, 400, 200, 50).ok().map(|a| a.into_chunks());
        prop_assert_eq!(first, second);
    }
}
