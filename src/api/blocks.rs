// src/api/blocks.rs
//! Block parsing. One raw block object becomes one `Block`, recursively.

use super::parser::{
    caption_of, flag, json_kind, optional_str, parse_icon, required_str, required_timestamp,
    resolve_file_location, NULL,
};
use super::properties::parse_rich_text_array;
use crate::error::ParseError;
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::{BlockId, ParseWarning, WarningKind};
use serde_json::Value;

/// Parses one raw block and its `children`, discarding warnings.
pub fn parse_block(raw: &Value) -> Result<Block, ParseError> {
    let mut warnings = Vec::new();
    let block = parse_block_collecting(raw, &mut warnings)?;
    for warning in &warnings {
        log::debug!("{}", warning);
    }
    Ok(block)
}

pub(super) fn parse_block_collecting(
    raw: &Value,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Block, ParseError> {
    if !raw.is_object() {
        return Err(ParseError::InvalidShape {
            object: "block",
            reason: format!("expected an object, found {}", json_kind(raw)),
        });
    }

    let common = parse_common(raw, warnings)?;
    let kind = required_str(raw, "block", "type")?;
    let data = raw.get(kind).unwrap_or(&NULL);

    let block = match kind {
        "paragraph" => Block::Paragraph(text_block(common, data)),
        "heading_1" => Block::Heading1(text_block(common, data)),
        "heading_2" => Block::Heading2(text_block(common, data)),
        "heading_3" => Block::Heading3(text_block(common, data)),
        "bulleted_list_item" => Block::BulletedListItem(text_block(common, data)),
        "numbered_list_item" => Block::NumberedListItem(text_block(common, data)),
        "toggle" => Block::Toggle(text_block(common, data)),
        "quote" => Block::Quote(text_block(common, data)),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content: text_content(data),
            checked: flag(data, "checked"),
        }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            content: text_content(data),
            icon: data.get("icon").and_then(parse_icon),
        }),
        "code" => Block::Code(CodeBlock {
            common,
            content: text_content(data),
            language: optional_str(data, "language").map(str::to_string),
            caption: caption_of(data),
        }),
        "divider" => Block::Divider(StructuralBlock { common }),
        "column_list" => Block::ColumnList(StructuralBlock { common }),
        "column" => Block::Column(StructuralBlock { common }),
        "image" => Block::Image(media_block(common, data, warnings)),
        "file" => Block::File(media_block(common, data, warnings)),
        "video" => Block::Video(media_block(common, data, warnings)),
        "pdf" => Block::Pdf(media_block(common, data, warnings)),
        "bookmark" => Block::Bookmark(url_block(common, data)),
        "embed" => Block::Embed(url_block(common, data)),
        "link_to_page" => {
            let target_id = ["page_id", "database_id", "block_id"]
                .iter()
                .find_map(|key| optional_str(data, key))
                .map(str::to_string);
            Block::LinkToPage(LinkToPageBlock { common, target_id })
        }
        "table" => Block::Table(TableBlock {
            common,
            table_width: data
                .get("table_width")
                .and_then(Value::as_u64)
                .unwrap_or(0) as usize,
            has_column_header: flag(data, "has_column_header"),
            has_row_header: flag(data, "has_row_header"),
        }),
        "table_row" => Block::TableRow(TableRowBlock {
            common,
            cells: data
                .get("cells")
                .and_then(Value::as_array)
                .map(|cells| cells.iter().map(parse_rich_text_array).collect())
                .unwrap_or_default(),
        }),
        "child_page" => Block::ChildPage(ChildReferenceBlock {
            common,
            title: optional_str(data, "title").unwrap_or_default().to_string(),
        }),
        "child_database" => Block::ChildDatabase(ChildReferenceBlock {
            common,
            title: optional_str(data, "title").unwrap_or_default().to_string(),
        }),
        other => {
            warnings.push(
                ParseWarning::new(
                    WarningKind::SchemaDrift,
                    format!("unknown block type '{}' kept as unsupported", other),
                )
                .with_context(common.id.as_str()),
            );
            Block::Unsupported(UnsupportedBlock {
                common,
                block_type: other.to_string(),
                content: text_content(data),
            })
        }
    };
    Ok(block)
}

/// Reads the shared fields and parses children.
///
/// `has_children` in the result always reflects the parsed children. A
/// source flag that disagrees is reported, never acted upon.
fn parse_common(raw: &Value, warnings: &mut Vec<ParseWarning>) -> Result<BlockCommon, ParseError> {
    let id = BlockId::new(required_str(raw, "block", "id")?);
    let created_time = required_timestamp(raw, "block", "created_time")?;
    let last_edited_time = required_timestamp(raw, "block", "last_edited_time")?;

    let children = match raw.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|child| parse_block_collecting(child, warnings))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ParseError::InvalidShape {
                object: "block",
                reason: format!("'children' of {} is {}", id, json_kind(other)),
            })
        }
    };

    let flagged = flag(raw, "has_children");
    if flagged != !children.is_empty() {
        let message = if flagged {
            "has_children is set but no children were supplied"
        } else {
            "children supplied although has_children is unset"
        };
        warnings.push(
            ParseWarning::new(WarningKind::SchemaDrift, message).with_context(id.as_str()),
        );
    }

    Ok(BlockCommon {
        id,
        created_time,
        last_edited_time,
        has_children: !children.is_empty(),
        archived: flag(raw, "archived") || flag(raw, "in_trash"),
        children,
    })
}

/// Rich text of a payload, read from `rich_text` or the older `text` key.
fn text_content(data: &Value) -> TextBlockContent {
    let runs = data
        .get("rich_text")
        .or_else(|| data.get("text"))
        .map(parse_rich_text_array)
        .unwrap_or_default();
    TextBlockContent::new(runs)
}

fn text_block(common: BlockCommon, data: &Value) -> TextBlock {
    TextBlock {
        common,
        content: text_content(data),
    }
}

fn media_block(common: BlockCommon, data: &Value, warnings: &mut Vec<ParseWarning>) -> MediaBlock {
    let file = resolve_file_location(data);
    if file.is_none() {
        warnings.push(
            ParseWarning::new(
                WarningKind::UnresolvedFileReference,
                "neither an internal nor an external file location is present",
            )
            .with_context(common.id.as_str()),
        );
    }
    MediaBlock {
        common,
        file,
        caption: caption_of(data),
    }
}

fn url_block(common: BlockCommon, data: &Value) -> UrlBlock {
    UrlBlock {
        common,
        url: optional_str(data, "url")
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        caption: caption_of(data),
    }
}
