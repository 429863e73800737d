use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextRun};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// One structural unit of page content.
///
/// The variant set is closed: every `match` over it is exhaustive, so a new
/// kind is a compile error at each renderer until handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Divider(StructuralBlock),
    Image(MediaBlock),
    File(MediaBlock),
    Video(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(UrlBlock),
    Embed(UrlBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(StructuralBlock),
    Column(StructuralBlock),
    ChildPage(ChildReferenceBlock),
    ChildDatabase(ChildReferenceBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get the block's children in source order
    pub fn children(&self) -> &[Block] {
        &self.common().children
    }

    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// The block's own text runs; empty for kinds that carry none.
    pub fn rich_text(&self) -> &[RichTextRun] {
        match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Toggle(b)
            | Block::Quote(b) => &b.content.rich_text,
            Block::ToDo(b) => &b.content.rich_text,
            Block::Callout(b) => &b.content.rich_text,
            Block::Code(b) => &b.content.rich_text,
            Block::Unsupported(b) => &b.content.rich_text,
            Block::Divider(_)
            | Block::Image(_)
            | Block::File(_)
            | Block::Video(_)
            | Block::Pdf(_)
            | Block::Bookmark(_)
            | Block::Embed(_)
            | Block::LinkToPage(_)
            | Block::Table(_)
            | Block::TableRow(_)
            | Block::ColumnList(_)
            | Block::Column(_)
            | Block::ChildPage(_)
            | Block::ChildDatabase(_) => &[],
        }
    }

    /// Caption runs for kinds that carry one.
    pub fn caption(&self) -> &[RichTextRun] {
        match self {
            Block::Code(b) => &b.caption,
            Block::Image(b) | Block::File(b) | Block::Video(b) | Block::Pdf(b) => &b.caption,
            Block::Bookmark(b) | Block::Embed(b) => &b.caption,
            _ => &[],
        }
    }

    /// The resolved file payload of image/file/video/pdf blocks.
    pub fn file(&self) -> Option<&FileReference> {
        match self {
            Block::Image(b) | Block::File(b) | Block::Video(b) | Block::Pdf(b) => b.file.as_ref(),
            _ => None,
        }
    }

    /// The target url of bookmark and embed blocks.
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Block::Bookmark(b) | Block::Embed(b) => b.url.as_deref(),
            _ => None,
        }
    }

    /// Completion state, for checklist items only.
    pub fn checked(&self) -> Option<bool> {
        match self {
            Block::ToDo(b) => Some(b.checked),
            _ => None,
        }
    }

    /// Get block type name as the source spells it
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Divider(_) => "divider",
            Block::Image(_) => "image",
            Block::File(_) => "file",
            Block::Video(_) => "video",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkToPage(_) => "link_to_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}
