// src/query.rs
//! Read-only queries over a document's block tree.
//!
//! Every query is one pre-order walk (parent before children, children in
//! source order) with a different extractor. The order is the visual order of
//! the source page, and renderers rely on it.

use crate::model::{Block, Document};

/// Pre-order iterator over a block forest, yielding each block with its depth.
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a Block)>,
}

impl<'a> PreOrder<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Self {
            stack: blocks.iter().rev().map(|block| (0, block)).collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, block) = self.stack.pop()?;
        self.stack
            .extend(block.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, block))
    }
}

/// Walks `blocks` in pre-order, gathering whatever `extract` yields per block.
pub fn collect_preorder<'a, T, I, F>(blocks: &'a [Block], mut extract: F) -> Vec<T>
where
    F: FnMut(&'a Block) -> I,
    I: IntoIterator<Item = T>,
{
    PreOrder::new(blocks)
        .flat_map(|(_, block)| extract(block))
        .collect()
}

/// All checklist blocks at any depth, in document order.
pub fn collect_checklist_items(doc: &Document) -> Vec<&Block> {
    collect_preorder(&doc.blocks, |block| {
        matches!(block, Block::ToDo(_)).then_some(block)
    })
}

/// Image blocks whose file location resolved.
pub fn collect_images(doc: &Document) -> Vec<&Block> {
    collect_preorder(&doc.blocks, |block| {
        (matches!(block, Block::Image(_)) && block.file().is_some()).then_some(block)
    })
}

/// File blocks whose file location resolved.
pub fn collect_files(doc: &Document) -> Vec<&Block> {
    collect_preorder(&doc.blocks, |block| {
        (matches!(block, Block::File(_)) && block.file().is_some()).then_some(block)
    })
}

/// Every hyperlink in the tree, duplicates included.
///
/// Per block: run links of its text, its table cells and its caption, then the
/// bookmark target.
pub fn collect_links(doc: &Document) -> Vec<String> {
    collect_preorder(&doc.blocks, links_of_block)
}

/// [`collect_links`] with repeats removed, keeping first occurrences.
pub fn unique_links(doc: &Document) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    collect_links(doc)
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

fn links_of_block(block: &Block) -> Vec<String> {
    let cells = match block {
        Block::TableRow(row) => row.cells.as_slice(),
        _ => &[],
    };
    let runs = block
        .rich_text()
        .iter()
        .chain(cells.iter().flatten())
        .chain(block.caption());

    let mut links: Vec<String> = runs.filter_map(|run| run.link.clone()).collect();
    if let Block::Bookmark(bookmark) = block {
        links.extend(bookmark.url.clone());
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::common::BlockCommon;
    use crate::types::{BlockId, PageId, RichTextRun};
    use chrono::{DateTime, FixedOffset};
    use pretty_assertions::assert_eq;

    fn todo(id: &str, checked: bool, children: Vec<Block>) -> Block {
        Block::ToDo(ToDoBlock {
            common: BlockCommon::new(BlockId::new(id)).with_children(children),
            content: TextBlockContent::new(vec![RichTextRun::plain(id)]),
            checked,
        })
    }

    fn paragraph(runs: Vec<RichTextRun>, children: Vec<Block>) -> Block {
        Block::Paragraph(TextBlock {
            common: BlockCommon::new(BlockId::new("p")).with_children(children),
            content: TextBlockContent::new(runs),
        })
    }

    fn doc(blocks: Vec<Block>) -> Document {
        Document {
            id: PageId::new("page"),
            created_time: DateTime::<FixedOffset>::default(),
            last_edited_time: DateTime::<FixedOffset>::default(),
            archived: false,
            url: String::new(),
            icon: None,
            cover: None,
            parent: None,
            properties: Default::default(),
            blocks,
        }
    }

    #[test]
    fn test_checklist_items_in_preorder_across_depths() {
        let d = doc(vec![
            todo("a", true, vec![todo("b", false, vec![todo("c", true, vec![])])]),
            paragraph(vec![], vec![todo("d", false, vec![])]),
            todo("e", false, vec![]),
        ]);
        let ids: Vec<&str> = collect_checklist_items(&d)
            .iter()
            .map(|b| b.id().as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_preorder_reports_depth() {
        let blocks = vec![todo("a", true, vec![todo("b", false, vec![])]), todo("c", true, vec![])];
        let depths: Vec<(usize, &str)> = PreOrder::new(&blocks)
            .map(|(depth, b)| (depth, b.id().as_str()))
            .collect();
        assert_eq!(depths, vec![(0, "a"), (1, "b"), (0, "c")]);
    }

    #[test]
    fn test_images_require_resolved_file() {
        let resolved = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::new("i1")),
            file: Some(FileReference::external("https://img/1.png")),
            caption: vec![],
        });
        let unresolved = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::new("i2")),
            file: None,
            caption: vec![],
        });
        let d = doc(vec![resolved, paragraph(vec![], vec![unresolved])]);
        let images = collect_images(&d);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id().as_str(), "i1");
        assert!(collect_files(&d).is_empty());
    }

    #[test]
    fn test_links_keep_duplicates_and_order() {
        let bookmark = Block::Bookmark(UrlBlock {
            common: BlockCommon::new(BlockId::new("b")),
            url: Some("https://bookmark".to_string()),
            caption: vec![RichTextRun::plain("see").with_link("https://caption")],
        });
        let d = doc(vec![
            paragraph(
                vec![
                    RichTextRun::plain("one").with_link("https://x"),
                    RichTextRun::plain(" and "),
                ],
                vec![paragraph(vec![RichTextRun::plain("again").with_link("https://x")], vec![])],
            ),
            bookmark,
        ]);
        assert_eq!(
            collect_links(&d),
            vec!["https://x", "https://x", "https://caption", "https://bookmark"]
        );
        assert_eq!(
            unique_links(&d),
            vec!["https://x", "https://caption", "https://bookmark"]
        );
    }
}
