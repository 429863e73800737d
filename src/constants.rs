// src/constants.rs
//! Domain constants that define the operational boundaries of the converter.
//!
//! Each constant is named for the destination limit it protects. The
//! rich-document renderer never reads these directly; they only seed
//! `RichDocumentLimits::default()`, which callers may override.

// ---------------------------------------------------------------------------
// Rich-document payload limits
// ---------------------------------------------------------------------------

/// Maximum characters kept from one description paragraph.
pub const DESCRIPTION_PARAGRAPH_MAX_CHARS: usize = 1000;

/// Maximum description paragraphs emitted into one rich document.
pub const DESCRIPTION_MAX_PARAGRAPHS: usize = 20;

/// Maximum characters kept from one checklist item.
pub const TASK_ITEM_MAX_CHARS: usize = 500;

/// Maximum checklist items emitted into the task list.
pub const TASK_LIST_MAX_ITEMS: usize = 50;

/// Maximum image paragraphs emitted.
pub const IMAGE_SECTION_MAX_ITEMS: usize = 10;

/// Maximum file paragraphs emitted.
pub const FILE_SECTION_MAX_ITEMS: usize = 10;

/// Maximum unique link paragraphs emitted.
pub const LINK_SECTION_MAX_ITEMS: usize = 10;

/// Maximum characters of a url shown as link text. The href itself is never cut.
pub const LINK_TEXT_MAX_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Markdown layout
// ---------------------------------------------------------------------------

/// Number of spaces per nesting level for list items and checklists.
pub const INDENT_SPACES: usize = 2;

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 128;

// ---------------------------------------------------------------------------
// Operator reporting
// ---------------------------------------------------------------------------

/// How many failures/skips the CLI lists before collapsing into "+N more".
pub const REPORT_PREVIEW_ITEMS: usize = 10;
