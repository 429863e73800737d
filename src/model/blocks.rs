use super::common::BlockCommon;
use crate::types::RichTextRun;
use serde::{Deserialize, Serialize};

/// Text content block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextRun>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextRun>) -> Self {
        Self { rich_text }
    }
}

/// Paragraph, heading, list item, toggle and quote blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do (checklist) block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub icon: Option<Icon>,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub language: Option<String>,
    pub caption: Vec<RichTextRun>,
}

/// Image, file, video and pdf blocks
///
/// `file` is absent when the source carried neither location shape; such a
/// block keeps its caption and renders as text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub file: Option<FileReference>,
    pub caption: Vec<RichTextRun>,
}

/// Bookmark and embed blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlBlock {
    pub common: BlockCommon,
    pub url: Option<String>,
    pub caption: Vec<RichTextRun>,
}

/// Link to page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    /// Page or database id the link points at.
    pub target_id: Option<String>,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextRun>>,
}

/// Divider, column list and column blocks: containers with no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralBlock {
    pub common: BlockCommon,
}

/// Nested page or database reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildReferenceBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// A block whose `type` the model does not know. Its text survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
    pub content: TextBlockContent,
}

/// Pointer to binary content, owned by the block that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReference {
    pub url: String,
    pub display_name: Option<String>,
    pub hosting: FileHosting,
}

impl FileReference {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: None,
            hosting: FileHosting::External,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Where a referenced file lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileHosting {
    /// Uploaded to the content service; the url is signed and expires.
    Internal { expiry_time: Option<String> },
    /// Referenced by an external url.
    External,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { url: String },
    File { url: String },
}
