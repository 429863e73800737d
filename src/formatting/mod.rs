// src/formatting/mod.rs
//! Renders documents into Markdown and into the tracker's rich-document tree.
//!
//! Both renderers are pure functions of a `Document` and never fail on a
//! structurally valid one.

pub mod markdown;
pub mod rich_document;
pub mod rich_text;

pub use markdown::{render_block, render_document_markdown, render_markdown};
pub use rich_document::{
    render_rich_document, render_rich_document_with, RichDocument, RichDocumentConfig,
    RichDocumentLimits, RichNode,
};
