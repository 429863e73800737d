// src/api/properties.rs
//! Property and rich text parsing.
//!
//! Property payloads never fail a document: a payload of an unexpected shape
//! reads as its empty value, and an unknown type becomes `Unsupported`.

use super::parser::{flag, optional_str, NULL};
use crate::model::{PropertyTypeValue, PropertyValue, UniqueIdData};
use crate::types::*;
use serde_json::Value;

/// Parses one text run. `text` prefers `plain_text`, then `text.content`;
/// `link` prefers `href`, then `text.link.url`.
pub fn parse_rich_text_run(raw: &Value) -> RichTextRun {
    let text = optional_str(raw, "plain_text")
        .or_else(|| raw.get("text").and_then(|t| optional_str(t, "content")))
        .unwrap_or_default();
    let link = optional_str(raw, "href")
        .or_else(|| {
            raw.get("text")
                .and_then(|t| t.get("link"))
                .and_then(|l| optional_str(l, "url"))
        })
        .map(str::to_string);

    let annotations = raw.get("annotations").unwrap_or(&NULL);
    RichTextRun {
        text: text.to_string(),
        link,
        annotations: Annotations {
            bold: flag(annotations, "bold"),
            italic: flag(annotations, "italic"),
            strikethrough: flag(annotations, "strikethrough"),
            code: flag(annotations, "code"),
        },
    }
}

pub(super) fn parse_rich_text_array(raw: &Value) -> Vec<RichTextRun> {
    raw.as_array()
        .map(|items| items.iter().map(parse_rich_text_run).collect())
        .unwrap_or_default()
}

/// Parses one named property. Unknown types yield an `Unsupported` value.
pub fn parse_property(name: &str, raw: &Value) -> PropertyValue {
    let mut warnings = Vec::new();
    let value = parse_property_collecting(name, raw, &mut warnings);
    for warning in &warnings {
        log::debug!("{}", warning);
    }
    value
}

pub(super) fn parse_property_collecting(
    name: &str,
    raw: &Value,
    warnings: &mut Vec<ParseWarning>,
) -> PropertyValue {
    let id = PropertyId::new(optional_str(raw, "id").unwrap_or_default());
    let kind = optional_str(raw, "type").unwrap_or_default();
    let data = raw.get(kind).unwrap_or(&NULL);

    let value = match kind {
        "title" => PropertyTypeValue::Title {
            title: parse_rich_text_array(data),
        },
        "rich_text" => PropertyTypeValue::RichText {
            rich_text: parse_rich_text_array(data),
        },
        "number" => PropertyTypeValue::Number {
            number: data.as_f64(),
        },
        "select" => PropertyTypeValue::Select {
            select: parse_select_option(data),
        },
        "status" => PropertyTypeValue::Status {
            status: parse_select_option(data),
        },
        "multi_select" => PropertyTypeValue::MultiSelect {
            multi_select: array_of(data, parse_select_option),
        },
        "date" => PropertyTypeValue::Date {
            date: parse_date(data),
        },
        "people" => PropertyTypeValue::People {
            people: array_of(data, parse_user),
        },
        "checkbox" => PropertyTypeValue::Checkbox {
            checkbox: data.as_bool().unwrap_or(false),
        },
        "url" => PropertyTypeValue::Url {
            url: string_of(data),
        },
        "email" => PropertyTypeValue::Email {
            email: string_of(data),
        },
        "phone_number" => PropertyTypeValue::PhoneNumber {
            phone_number: string_of(data),
        },
        "formula" => PropertyTypeValue::Formula {
            formula: parse_formula(data),
        },
        "relation" => PropertyTypeValue::Relation {
            relation: array_of(data, |item| optional_str(item, "id").map(PageId::new)),
        },
        "rollup" => PropertyTypeValue::Rollup {
            rollup: parse_rollup(name, data),
        },
        "created_time" => PropertyTypeValue::CreatedTime {
            created_time: string_of(data).unwrap_or_default(),
        },
        "last_edited_time" => PropertyTypeValue::LastEditedTime {
            last_edited_time: string_of(data).unwrap_or_default(),
        },
        "created_by" => PropertyTypeValue::CreatedBy {
            created_by: parse_user(data).unwrap_or_else(unknown_user),
        },
        "last_edited_by" => PropertyTypeValue::LastEditedBy {
            last_edited_by: parse_user(data).unwrap_or_else(unknown_user),
        },
        "files" => PropertyTypeValue::Files {
            files: array_of(data, parse_file_entry),
        },
        "unique_id" => PropertyTypeValue::UniqueId {
            unique_id: UniqueIdData {
                number: data.get("number").and_then(Value::as_i64),
                prefix: string_of(data.get("prefix").unwrap_or(&NULL)),
            },
        },
        other => {
            warnings.push(
                ParseWarning::new(
                    WarningKind::SchemaDrift,
                    format!("unknown property type '{}'", other),
                )
                .with_context(name),
            );
            PropertyTypeValue::Unsupported {
                type_name: other.to_string(),
            }
        }
    };

    PropertyValue::new(id, value)
}

fn array_of<T>(raw: &Value, parse: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    raw.as_array()
        .map(|items| items.iter().filter_map(parse).collect())
        .unwrap_or_default()
}

fn string_of(raw: &Value) -> Option<String> {
    raw.as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_select_option(raw: &Value) -> Option<SelectOption> {
    Some(SelectOption {
        id: optional_str(raw, "id").map(str::to_string),
        name: optional_str(raw, "name")?.to_string(),
    })
}

fn parse_date(raw: &Value) -> Option<DateValue> {
    Some(DateValue {
        start: optional_str(raw, "start")?.to_string(),
        end: optional_str(raw, "end").map(str::to_string),
        time_zone: optional_str(raw, "time_zone").map(str::to_string),
    })
}

fn parse_user(raw: &Value) -> Option<User> {
    Some(User {
        id: optional_str(raw, "id")?.to_string(),
        name: optional_str(raw, "name").map(str::to_string),
        email: raw
            .get("person")
            .and_then(|p| optional_str(p, "email"))
            .map(str::to_string),
    })
}

fn unknown_user() -> User {
    User {
        id: String::new(),
        name: None,
        email: None,
    }
}

fn parse_file_entry(raw: &Value) -> Option<FileEntry> {
    let url = ["file", "external"]
        .iter()
        .find_map(|key| raw.get(key).and_then(|loc| optional_str(loc, "url")))
        .map(str::to_string);
    Some(FileEntry {
        name: optional_str(raw, "name")?.to_string(),
        url,
    })
}

fn parse_formula(raw: &Value) -> FormulaValue {
    let result = |key: &str| raw.get(key).unwrap_or(&NULL);
    match optional_str(raw, "type").unwrap_or_default() {
        "number" => FormulaValue::Number(result("number").as_f64()),
        "boolean" => FormulaValue::Boolean(result("boolean").as_bool()),
        "date" => FormulaValue::Date(parse_date(result("date"))),
        _ => FormulaValue::String(string_of(result("string"))),
    }
}

/// Array rollups hold property-shaped items; each is reduced to display text.
fn parse_rollup(name: &str, raw: &Value) -> RollupValue {
    match optional_str(raw, "type").unwrap_or_default() {
        "number" => RollupValue::Number(raw.get("number").and_then(Value::as_f64)),
        "date" => RollupValue::Date(raw.get("date").and_then(parse_date)),
        "array" => RollupValue::Array(array_of(raw.get("array").unwrap_or(&NULL), |item| {
            parse_property(name, item)
                .normalized()
                .filter(|value| !value.is_blank())
                .map(|value| value.to_string())
        })),
        _ => RollupValue::Unsupported,
    }
}
