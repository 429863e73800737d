// src/lib.rs
//! notion2jira library: converts exported Notion page records into Markdown
//! and into the tracker's rich-document (ADF) task description.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ParseError`, `FailureCategory`
//! - **Configuration**: `CommandLineInput`, `ConversionConfig`, `OutputFormat`
//! - **Domain model**: `Document`, `Block`, `PropertyValue`, `RichTextRun`
//! - **Parsing**: `RawRecord`, `decode_records`, `parse_document`
//! - **Queries**: `collect_checklist_items`, `collect_images`, `unique_links`
//! - **Formatting**: `render_markdown`, `render_rich_document`
//! - **Batch**: `convert_batch`, `BatchReport`

pub mod analytics;
pub mod api;
pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod query;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FailureCategory, ParseError};

// --- Configuration ---
pub use crate::config::{CommandLineInput, ConversionConfig, OutputFormat};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, Document, FileHosting, FileReference, Icon, NormalizedValue, Parent,
    PropertyTypeValue, PropertyValue,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, BlockId, PageId, ParseWarning, PropertyName, RichTextRun, WarningKind,
};

// --- Parsing ---
pub use crate::api::{
    decode_records, parse_block, parse_document, parse_document_with_diagnostics, parse_property,
    parse_record, parse_rich_text_run, RawRecord,
};

// --- Queries ---
pub use crate::query::{
    collect_checklist_items, collect_files, collect_images, collect_links, unique_links,
};

// --- Formatting ---
pub use crate::formatting::{
    render_block, render_document_markdown, render_markdown, render_rich_document,
    render_rich_document_with, RichDocument, RichDocumentConfig, RichDocumentLimits, RichNode,
};

// --- Batch ---
pub use crate::batch::{convert_batch, convert_record, BatchOptions, BatchReport};
