use super::Block;
use crate::types::BlockId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub created_time: DateTime<FixedOffset>,
    pub last_edited_time: DateTime<FixedOffset>,
    /// Always equal to `!children.is_empty()` once parsed; the source flag
    /// is only used to raise a drift warning.
    pub has_children: bool,
    pub archived: bool,
    pub children: Vec<Block>,
}

impl BlockCommon {
    /// A childless block stamped at the Unix epoch. Used by builders and tests.
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            created_time: DateTime::<FixedOffset>::default(),
            last_edited_time: DateTime::<FixedOffset>::default(),
            has_children: false,
            archived: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}
