//! Header nesting: blocks → sections with breadcrumb paths.

use crate::blocks::Block;

/// One header section. The untitled preamble before the first header is a
/// level-0 section with no title and no breadcrumbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: u8,
    pub title: Option<String>,
    /// Titles from the outermost enclosing header down to this one.
    pub breadcrumbs: Vec<String>,
    /// Non-header blocks directly under this header.
    pub blocks: Vec<Block>,
}

impl Section {
    fn root() -> Self {
        Self {
            level: 0,
            title: None,
            breadcrumbs: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// Group blocks into sections in document order.
pub fn build(blocks: Vec<Block>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut stack: Vec<(u8, String)> = Vec::new();

    for block in blocks {
        match block {
            Block::Header { level, title } => {
                while stack.last().is_some_and(|(open, _)| *open >= level) {
                    stack.pop();
                }
                stack.push((level, title.clone()));
                sections.push(Section {
                    level,
                    title: Some(title),
                    breadcrumbs: stack.iter().map(|(_, t)| t.clone()).collect(),
                    blocks: Vec::new(),
                });
            }
            other => {
                if sections.is_empty() {
                    sections.push(Section::root());
                }
                if let Some(current) = sections.last_mut() {
                    current.blocks.push(other);
                }
            }
        }
    }

    sections
}

/// Blocks forming a section's parent content: its own blocks followed by
/// those of every nested section, stopping at the next header of equal or
/// higher level. The untitled preamble covers only its own blocks.
pub fn content_blocks(sections: &[Section], index: usize) -> Vec<&Block> {
    let section = &sections[index];
    let mut out: Vec<&Block> = section.blocks.iter().collect();
    if section.level == 0 {
        return out;
    }
    for nested in sections[index + 1..]
        .iter()
        .take_while(|s| s.level > section.level)
    {
        out.extend(nested.blocks.iter());
    }
    out
}
