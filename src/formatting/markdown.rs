// src/formatting/markdown.rs
//! Markdown projection of a document's block tree.
//!
//! Each block renders its own line(s) and then its children one level deeper.
//! Rendering never fails: a block with nothing to show renders nothing, and
//! its children still render.

use super::rich_text::rich_text_to_markdown;
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, INDENT_SPACES};
use crate::model::*;
use crate::query::{collect_files, collect_images, unique_links};
use crate::types::plain_text;

/// Label used for file blocks without a display name.
pub const FILE_FALLBACK_LABEL: &str = "file";

/// Renders the block content of `doc`.
pub fn render_markdown(doc: &Document) -> String {
    render_blocks(&doc.blocks, 0)
}

/// Renders one block and its subtree at `depth`.
pub fn render_block(block: &Block, depth: usize) -> String {
    render_numbered(block, depth, 1)
}

/// Renders a sibling sequence. Numbered items count up while consecutive.
pub fn render_blocks(blocks: &[Block], depth: usize) -> String {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    let mut ordinal = 0;
    for block in blocks {
        ordinal = match block {
            Block::NumberedListItem(_) => ordinal + 1,
            _ => 0,
        };
        output.push_str(&render_numbered(block, depth, ordinal.max(1)));
    }
    output
}

fn render_numbered(block: &Block, depth: usize, ordinal: usize) -> String {
    let indent = " ".repeat(INDENT_SPACES * depth);
    let mut output = render_own_lines(block, &indent, ordinal);
    output.push_str(&render_blocks(block.children(), depth + 1));
    output
}

/// The block's own line(s), without children. Exhaustive over every kind.
fn render_own_lines(block: &Block, indent: &str, ordinal: usize) -> String {
    let text = rich_text_to_markdown(block.rich_text());
    match block {
        Block::Heading1(_) => format!("# {}\n", text),
        Block::Heading2(_) => format!("## {}\n", text),
        Block::Heading3(_) => format!("### {}\n", text),
        Block::Paragraph(_) => format!("{}\n", text),
        Block::BulletedListItem(_) => format!("{}- {}\n", indent, text),
        Block::NumberedListItem(_) => format!("{}{}. {}\n", indent, ordinal, text),
        Block::ToDo(todo) => {
            let checkbox = if todo.checked { "[x]" } else { "[ ]" };
            format!("{}- {} {}\n", indent, checkbox, text)
        }
        Block::Code(code) => format!(
            "```{}\n{}\n```\n",
            code.language.as_deref().unwrap_or_default(),
            plain_text(&code.content.rich_text)
        ),
        Block::Quote(_) => format!("> {}\n", text),
        Block::Divider(_) => "---\n".to_string(),
        Block::Image(media) => match &media.file {
            Some(file) => format!("![{}]({})\n", plain_text(&media.caption), file.url),
            None => String::new(),
        },
        Block::File(media) => match &media.file {
            Some(file) => format!(
                "[{}]({})\n",
                file.display_name.as_deref().unwrap_or(FILE_FALLBACK_LABEL),
                file.url
            ),
            None => text_line(&rich_text_to_markdown(&media.caption)),
        },
        Block::Video(media) => media_link(media, "Video"),
        Block::Pdf(media) => media_link(media, "PDF"),
        Block::Bookmark(bookmark) => match &bookmark.url {
            Some(url) => format!("[Bookmark]({})\n", url),
            None => text_line(&rich_text_to_markdown(&bookmark.caption)),
        },
        Block::Embed(embed) => match &embed.url {
            Some(url) => format!("[{}]({})\n", label_or(&embed.caption, "Embed"), url),
            None => String::new(),
        },
        Block::TableRow(row) => {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| rich_text_to_markdown(cell))
                .collect();
            format!("{}| {} |\n", indent, cells.join(" | "))
        }
        Block::ChildPage(child) | Block::ChildDatabase(child) => text_line(&child.title),
        Block::Toggle(_)
        | Block::Callout(_)
        | Block::LinkToPage(_)
        | Block::Table(_)
        | Block::ColumnList(_)
        | Block::Column(_)
        | Block::Unsupported(_) => text_line(&text),
    }
}

fn text_line(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{}\n", text)
    }
}

fn label_or(caption: &[crate::types::RichTextRun], fallback: &str) -> String {
    let label = plain_text(caption);
    if label.trim().is_empty() {
        fallback.to_string()
    } else {
        label
    }
}

fn media_link(media: &MediaBlock, fallback: &str) -> String {
    match &media.file {
        Some(file) => {
            let label = match &file.display_name {
                Some(name) => name.clone(),
                None => label_or(&media.caption, fallback),
            };
            format!("[{}]({})\n", label, file.url)
        }
        None => text_line(&rich_text_to_markdown(&media.caption)),
    }
}

/// The full exported markdown document: title, metadata, properties, content
/// and an attachments summary.
pub fn render_document_markdown(doc: &Document) -> String {
    let mut lines = vec![format!("# {}\n", doc.title())];

    lines.push("---".to_string());
    lines.push(format!("**Notion ID**: {}", doc.id));
    lines.push(format!(
        "**Created**: {}",
        doc.created_time.format("%Y-%m-%d %H:%M")
    ));
    lines.push(format!(
        "**Last Edited**: {}",
        doc.last_edited_time.format("%Y-%m-%d %H:%M")
    ));
    lines.push(format!("**URL**: {}", doc.url));
    lines.push("---\n".to_string());

    if !doc.properties.is_empty() {
        lines.push("## Properties\n".to_string());
        for (name, value) in &doc.properties {
            if let Some(normalized) = value.normalized() {
                lines.push(format!("- **{}**: {}", name, normalized));
            }
        }
        lines.push(String::new());
    }

    if !doc.blocks.is_empty() {
        lines.push("## Content\n".to_string());
        lines.push(render_markdown(doc));
    }

    let images = collect_images(doc);
    let files = collect_files(doc);
    let links = unique_links(doc);
    if !images.is_empty() || !files.is_empty() || !links.is_empty() {
        lines.push("\n---\n".to_string());
        lines.push("## Attachments\n".to_string());

        if !images.is_empty() {
            lines.push(format!("**Images**: {}", images.len()));
            for file in images.iter().filter_map(|block| block.file()) {
                lines.push(format!("  - {}", file.url));
            }
        }
        if !files.is_empty() {
            lines.push(format!("\n**Files**: {}", files.len()));
            for file in files.iter().filter_map(|block| block.file()) {
                let name = file.display_name.as_deref().unwrap_or(FILE_FALLBACK_LABEL);
                lines.push(format!("  - [{}]({})", name, file.url));
            }
        }
        if !links.is_empty() {
            lines.push(format!("\n**Links**: {}", links.len()));
            for link in &links {
                lines.push(format!("  - {}", link));
            }
        }
    }

    lines.join("\n")
}
