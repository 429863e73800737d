// src/api/mod.rs
//! Raw record parsing: the boundary between exported JSON and the domain model.
//!
//! Fetching is a collaborator's job. This module only sees the JSON that the
//! collaborator produced (one page object plus its block forest) and turns it
//! into a `Document`. Everything past this boundary is strongly typed.

mod blocks;
mod parser;
mod properties;

pub use blocks::parse_block;
pub use parser::{parse_document, parse_document_with_diagnostics, parse_record};
pub use properties::{parse_property, parse_rich_text_run};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One exported source record: the page object and its top-level blocks,
/// each block carrying its own `children` recursively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub page: Value,
    #[serde(default)]
    pub blocks: Vec<Value>,
}

impl RawRecord {
    pub fn new(page: Value, blocks: Vec<Value>) -> Self {
        Self { page, blocks }
    }

    /// Best-effort identifier for reporting, available even when parsing fails.
    pub fn id(&self) -> &str {
        self.page
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
    }

    /// Archived state as the raw page reports it.
    pub fn is_archived(&self) -> bool {
        parser::flag(&self.page, "archived") || parser::flag(&self.page, "in_trash")
    }
}

/// Decodes an export file body holding either one record or an array of them.
pub fn decode_records(body: &str) -> serde_json::Result<Vec<RawRecord>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<RawRecord>),
        One(RawRecord),
    }

    Ok(match serde_json::from_str::<OneOrMany>(body)? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![record],
    })
}
