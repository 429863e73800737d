// src/api/parser.rs
//! Page-level parsing and the JSON access helpers shared by the block and
//! property parsers.

use super::blocks::parse_block_collecting;
use super::properties::{parse_property_collecting, parse_rich_text_array};
use super::RawRecord;
use crate::error::ParseError;
use crate::model::{Document, FileHosting, FileReference, Icon, Parent};
use crate::types::{BlockId, PageId, ParseWarning, PropertyName};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde_json::Value;

pub(super) static NULL: Value = Value::Null;

/// Parses one page object and its block forest into a `Document`.
///
/// Warnings are logged and dropped; use
/// [`parse_document_with_diagnostics`] to keep them.
pub fn parse_document(raw_page: &Value, raw_blocks: &[Value]) -> Result<Document, ParseError> {
    parse_document_with_diagnostics(raw_page, raw_blocks).map(|(document, _)| document)
}

/// Same as [`parse_document`], also returning every non-fatal warning.
pub fn parse_document_with_diagnostics(
    raw_page: &Value,
    raw_blocks: &[Value],
) -> Result<(Document, Vec<ParseWarning>), ParseError> {
    if !raw_page.is_object() {
        return Err(ParseError::InvalidShape {
            object: "page",
            reason: format!("expected an object, found {}", json_kind(raw_page)),
        });
    }

    let mut warnings = Vec::new();
    let id = PageId::new(required_str(raw_page, "page", "id")?);
    let created_time = required_timestamp(raw_page, "page", "created_time")?;
    let last_edited_time = required_timestamp(raw_page, "page", "last_edited_time")?;

    let mut properties = IndexMap::new();
    if let Some(raw_properties) = raw_page.get("properties") {
        let map = raw_properties
            .as_object()
            .ok_or_else(|| ParseError::InvalidShape {
                object: "page",
                reason: "'properties' is not an object".to_string(),
            })?;
        for (name, raw) in map {
            let value = parse_property_collecting(name, raw, &mut warnings);
            properties.insert(PropertyName::new(name.as_str()), value);
        }
    }

    let blocks = raw_blocks
        .iter()
        .map(|raw| parse_block_collecting(raw, &mut warnings))
        .collect::<Result<Vec<_>, _>>()?;

    for warning in &warnings {
        log::warn!("Page {}: {}", id, warning);
    }

    let document = Document {
        id,
        created_time,
        last_edited_time,
        archived: flag(raw_page, "archived") || flag(raw_page, "in_trash"),
        url: optional_str(raw_page, "url").unwrap_or_default().to_string(),
        icon: raw_page.get("icon").and_then(parse_icon),
        cover: raw_page.get("cover").and_then(resolve_file_location),
        parent: raw_page.get("parent").and_then(parse_parent),
        properties,
        blocks,
    };
    Ok((document, warnings))
}

/// Parses a [`RawRecord`] with diagnostics.
pub fn parse_record(record: &RawRecord) -> Result<(Document, Vec<ParseWarning>), ParseError> {
    parse_document_with_diagnostics(&record.page, &record.blocks)
}

// --- JSON access helpers ---

pub(super) fn optional_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

pub(super) fn flag(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(super) fn required_str<'a>(
    raw: &'a Value,
    object: &'static str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    optional_str(raw, field).ok_or(ParseError::MissingField { object, field })
}

/// Reads an RFC 3339 timestamp. Missing and malformed are both errors.
pub(super) fn required_timestamp(
    raw: &Value,
    object: &'static str,
    field: &'static str,
) -> Result<DateTime<FixedOffset>, ParseError> {
    let value = required_str(raw, object, field)?;
    DateTime::parse_from_rfc3339(value).map_err(|source| ParseError::MalformedTimestamp {
        object,
        field,
        value: value.to_string(),
        source,
    })
}

pub(super) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolves the internal (`file`) or external (`external`) location shape.
///
/// Returns `None` when neither carries a url.
pub(super) fn resolve_file_location(type_data: &Value) -> Option<FileReference> {
    let (location, hosting) = if let Some(internal) = type_data.get("file") {
        let expiry_time = optional_str(internal, "expiry_time").map(str::to_string);
        (internal, FileHosting::Internal { expiry_time })
    } else {
        (type_data.get("external")?, FileHosting::External)
    };

    let url = optional_str(location, "url").filter(|url| !url.is_empty())?;
    let display_name = optional_str(type_data, "name")
        .or_else(|| optional_str(location, "name"))
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Some(FileReference {
        url: url.to_string(),
        display_name,
        hosting,
    })
}

pub(super) fn parse_icon(raw: &Value) -> Option<Icon> {
    match optional_str(raw, "type")? {
        "emoji" => optional_str(raw, "emoji").map(|emoji| Icon::Emoji {
            emoji: emoji.to_string(),
        }),
        "external" => resolve_file_location(raw).map(|file| Icon::External { url: file.url }),
        "file" => resolve_file_location(raw).map(|file| Icon::File { url: file.url }),
        _ => None,
    }
}

fn parse_parent(raw: &Value) -> Option<Parent> {
    match optional_str(raw, "type")? {
        "page_id" => optional_str(raw, "page_id").map(|id| Parent::Page {
            page_id: PageId::new(id),
        }),
        "database_id" => optional_str(raw, "database_id").map(|id| Parent::Database {
            database_id: id.to_string(),
        }),
        "block_id" => optional_str(raw, "block_id").map(|id| Parent::Block {
            block_id: BlockId::new(id),
        }),
        "workspace" => Some(Parent::Workspace),
        _ => None,
    }
}

/// Caption runs of a type payload, empty when absent.
pub(super) fn caption_of(type_data: &Value) -> Vec<crate::types::RichTextRun> {
    type_data
        .get("caption")
        .map(parse_rich_text_array)
        .unwrap_or_default()
}
