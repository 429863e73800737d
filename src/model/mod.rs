mod block;
pub mod blocks;
pub mod common;
mod property_value;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use property_value::{NormalizedValue, PropertyTypeValue, PropertyValue, UniqueIdData};

use crate::types::{plain_text, BlockId, PageId, PropertyName};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Title used when a page has no title property or an empty one.
pub const UNTITLED: &str = "Untitled";

/// One source record: page metadata, typed properties and the block tree.
///
/// Built once by the parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: PageId,
    pub created_time: DateTime<FixedOffset>,
    pub last_edited_time: DateTime<FixedOffset>,
    pub archived: bool,
    pub url: String,
    pub icon: Option<Icon>,
    pub cover: Option<FileReference>,
    pub parent: Option<Parent>,
    /// Keyed by the exact schema name, in source order.
    pub properties: IndexMap<PropertyName, PropertyValue>,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Text of the title-typed property, or [`UNTITLED`].
    pub fn title(&self) -> String {
        self.properties
            .values()
            .find_map(|value| match &value.type_specific_value {
                PropertyTypeValue::Title { title } => Some(plain_text(title)),
                _ => None,
            })
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Normalized value of the property named exactly `name`.
    pub fn property_value(&self, name: &str) -> Option<NormalizedValue> {
        self.properties.get(name).and_then(PropertyValue::normalized)
    }
}

/// Parent reference with typed IDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    Page { page_id: PageId },
    Database { database_id: String },
    Block { block_id: BlockId },
    Workspace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyId, RichTextRun, SelectOption};

    fn document(properties: Vec<(&str, PropertyTypeValue)>) -> Document {
        Document {
            id: PageId::new("page-1"),
            created_time: DateTime::<FixedOffset>::default(),
            last_edited_time: DateTime::<FixedOffset>::default(),
            archived: false,
            url: "https://notion.so/page-1".to_string(),
            icon: None,
            cover: None,
            parent: None,
            properties: properties
                .into_iter()
                .map(|(name, value)| {
                    (
                        PropertyName::new(name),
                        PropertyValue::new(PropertyId::new(name), value),
                    )
                })
                .collect(),
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_title_comes_from_title_property() {
        let doc = document(vec![(
            "Name",
            PropertyTypeValue::Title {
                title: vec![RichTextRun::plain("Цветы на Батуми Молл")],
            },
        )]);
        assert_eq!(doc.title(), "Цветы на Батуми Молл");
    }

    #[test]
    fn test_title_falls_back_when_empty() {
        let doc = document(vec![("Name", PropertyTypeValue::Title { title: vec![] })]);
        assert_eq!(doc.title(), UNTITLED);
        assert_eq!(document(vec![]).title(), UNTITLED);
    }

    #[test]
    fn test_property_lookup_is_exact_match() {
        let doc = document(vec![(
            "Status",
            PropertyTypeValue::Status {
                status: Some(SelectOption {
                    id: None,
                    name: "Done".to_string(),
                }),
            },
        )]);
        assert_eq!(
            doc.property_value("Status"),
            Some(NormalizedValue::Text("Done".to_string()))
        );
        assert_eq!(doc.property_value("status"), None);
    }
}
