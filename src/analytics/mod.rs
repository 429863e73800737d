// src/analytics/mod.rs
//! Content measurement and statistics for converted documents.

use crate::model::{Block, Document};
use crate::query::{collect_files, collect_images, collect_links, PreOrder};
use serde::Serialize;

/// Per-document counts for operator summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStatistics {
    /// Blocks at every depth.
    pub blocks: usize,
    pub deepest_nesting: usize,
    pub todos_total: usize,
    pub todos_done: usize,
    pub images: usize,
    pub files: usize,
    pub links: usize,
    pub unique_links: usize,
}

impl DocumentStatistics {
    pub fn measure(doc: &Document) -> Self {
        let mut stats = Self::default();
        for (depth, block) in PreOrder::new(&doc.blocks) {
            stats.blocks += 1;
            stats.deepest_nesting = stats.deepest_nesting.max(depth);
            if let Block::ToDo(todo) = block {
                stats.todos_total += 1;
                stats.todos_done += usize::from(todo.checked);
            }
        }

        let links = collect_links(doc);
        let mut unique = links.clone();
        unique.sort();
        unique.dedup();

        stats.images = collect_images(doc).len();
        stats.files = collect_files(doc).len();
        stats.links = links.len();
        stats.unique_links = unique.len();
        stats
    }

    pub fn has_todos(&self) -> bool {
        self.todos_total > 0
    }
}

/// Totals across a set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStatistics {
    pub documents: usize,
    pub documents_with_todos: usize,
    pub documents_with_images: usize,
    pub documents_with_files: usize,
    pub blocks: usize,
    pub todos_total: usize,
    pub todos_done: usize,
    pub images: usize,
    pub files: usize,
    pub links: usize,
}

impl BatchStatistics {
    pub fn record(&mut self, stats: &DocumentStatistics) {
        self.documents += 1;
        self.documents_with_todos += usize::from(stats.has_todos());
        self.documents_with_images += usize::from(stats.images > 0);
        self.documents_with_files += usize::from(stats.files > 0);
        self.blocks += stats.blocks;
        self.todos_total += stats.todos_total;
        self.todos_done += stats.todos_done;
        self.images += stats.images;
        self.files += stats.files;
        self.links += stats.links;
    }
}

impl<'a> FromIterator<&'a DocumentStatistics> for BatchStatistics {
    fn from_iter<I: IntoIterator<Item = &'a DocumentStatistics>>(iter: I) -> Self {
        let mut totals = Self::default();
        for stats in iter {
            totals.record(stats);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::{BlockId, PageId, RichTextRun};
    use chrono::{DateTime, FixedOffset};

    fn todo(id: &str, checked: bool, children: Vec<Block>) -> Block {
        Block::ToDo(ToDoBlock {
            common: BlockCommon::new(BlockId::new(id)).with_children(children),
            content: TextBlockContent::new(vec![RichTextRun::plain(id).with_link("https://x")]),
            checked,
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
    fn test_measures_nested_tree() {
        let d = doc(vec![
            todo("a", true, vec![todo("b", false, vec![])]),
            todo("c", true, vec![]),
        ]);
        let stats = DocumentStatistics::measure(&d);
        assert_eq!(stats.blocks, 3);
        assert_eq!(stats.deepest_nesting, 1);
        assert_eq!((stats.todos_done, stats.todos_total), (2, 3));
        assert_eq!((stats.links, stats.unique_links), (3, 1));
    }

    #[test]
    fn test_batch_totals() {
        let with_todos = DocumentStatistics::measure(&doc(vec![todo("a", false, vec![])]));
        let empty = DocumentStatistics::measure(&doc(vec![]));
        let totals: BatchStatistics = [with_todos, empty].iter().collect();
        assert_eq!(totals.documents, 2);
        assert_eq!(totals.documents_with_todos, 1);
        assert_eq!(totals.todos_total, 1);
    }
}
