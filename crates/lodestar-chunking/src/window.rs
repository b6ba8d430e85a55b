//! Sliding-window splitting on block boundaries.
//!
//! Windows are built from whole units: a paragraph, a single list item, or
//! an atomic block (code, table, quote). A unit larger than the window is
//! emitted alone rather than cut.

use std::ops::Range;

use crate::blocks::Block;

/// An indivisible piece of parent content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub text: String,
    /// Joined to the previous unit with a single newline (consecutive list items).
    pub tight: bool,
}

impl Unit {
    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn separator(&self) -> &'static str {
        if self.tight {
            "\n"
        } else {
            "\n\n"
        }
    }
}

pub fn units_from_blocks(blocks: &[&Block]) -> Vec<Unit> {
    let mut units = Vec::new();
    for block in blocks {
        match block {
            Block::Header { .. } => {}
            Block::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    units.push(Unit {
                        text: item.clone(),
                        tight: i > 0,
                    });
                }
            }
            other => units.push(Unit {
                text: other.render(),
                tight: false,
            }),
        }
    }
    units
}

/// Render units as chunk content.
pub fn join(units: &[Unit]) -> String {
    let mut out = String::new();
    for (i, unit) in units.iter().enumerate() {
        if i > 0 {
            out.push_str(unit.separator());
        }
        out.push_str(&unit.text);
    }
    out
}

/// Window ranges over `units`, each at most `max_size` characters unless a
/// single unit is larger, with up to `overlap` characters of whole units
/// repeated from the end of the previous window.
pub fn windows(units: &[Unit], max_size: usize, overlap: usize) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;

    while start < units.len() {
        let mut end = start + 1;
        let mut size = units[start].len();
        while end < units.len() {
            let add = units[end].separator().len() + units[end].len();
            if size + add > max_size {
                break;
            }
            size += add;
            end += 1;
        }
        out.push(start..end);
        if end >= units.len() {
            break;
        }

        let mut next = end;
        let mut carried = 0;
        while next > start + 1 {
            let candidate = units[next - 1].len() + units[next].separator().len();
            if carried + candidate > overlap {
                break;
            }
            carried += candidate;
            next -= 1;
        }
        // Drop the overlap when it would leave no room for the next new unit.
        if next < end && carried + units[end].separator().len() + units[end].len() > max_size {
            next = end;
        }
        start = next;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(texts: &[&str]) -> Vec<Unit> {
        texts
            .iter()
            .map(|t| Unit {
                text: t.to_string(),
                tight: false,
            })
            .collect()
    }

    #[test]
    fn windows_cover_every_unit_in_order() {
        let u = units(&["aaaa", "bbbb", "cccc", "dddd", "eeee"]);
        let ranges = windows(&u, 10, 4);
        assert_eq!(ranges.first().map(|r| r.start), Some(0));
        assert_eq!(ranges.last().map(|r| r.end), Some(5));
        for pair in ranges.windows(2) {
            assert!(pair[1].start > pair[0].start);
            assert!(pair[1].start <= pair[0].end);
        }
    }

    #[test]
    fn overlap_repeats_trailing_unit() {
        // "aaaa\n\nbbbb" = 10 chars fits; overlap of 6 carries "bbbb" forward.
        let u = units(&["aaaa", "bbbb", "cccc"]);
        let ranges = windows(&u, 10, 6);
        assert_eq!(ranges, vec![0..2, 1..3]);
    }

    #[test]
    fn oversized_unit_stands_alone() {
        let u = units(&["short", &"x".repeat(50), "tail"]);
        let ranges = windows(&u, 20, 5);
        assert!(ranges.contains(&(1..2)));
    }

    #[test]
    fn tight_units_join_with_single_newline() {
        let u = vec![
            Unit {
                text: "- a".into(),
                tight: false,
            },
            Unit {
                text: "- b".into(),
                tight: true,
            },
        ];
        assert_eq!(join(&u), "- a\n- b");
    }
}
