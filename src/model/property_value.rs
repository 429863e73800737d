use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property value: a typed payload with the property ID the source assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub id: PropertyId,
    #[serde(flatten)]
    pub type_specific_value: PropertyTypeValue,
}

impl PropertyValue {
    pub fn new(id: PropertyId, type_specific_value: PropertyTypeValue) -> Self {
        Self {
            id,
            type_specific_value,
        }
    }

    /// Returns the source type name for this property value.
    pub fn type_name(&self) -> &str {
        match &self.type_specific_value {
            PropertyTypeValue::Title { .. } => "title",
            PropertyTypeValue::RichText { .. } => "rich_text",
            PropertyTypeValue::Number { .. } => "number",
            PropertyTypeValue::Select { .. } => "select",
            PropertyTypeValue::MultiSelect { .. } => "multi_select",
            PropertyTypeValue::Status { .. } => "status",
            PropertyTypeValue::Date { .. } => "date",
            PropertyTypeValue::Formula { .. } => "formula",
            PropertyTypeValue::Relation { .. } => "relation",
            PropertyTypeValue::Rollup { .. } => "rollup",
            PropertyTypeValue::People { .. } => "people",
            PropertyTypeValue::Files { .. } => "files",
            PropertyTypeValue::Checkbox { .. } => "checkbox",
            PropertyTypeValue::Url { .. } => "url",
            PropertyTypeValue::Email { .. } => "email",
            PropertyTypeValue::PhoneNumber { .. } => "phone_number",
            PropertyTypeValue::CreatedTime { .. } => "created_time",
            PropertyTypeValue::CreatedBy { .. } => "created_by",
            PropertyTypeValue::LastEditedTime { .. } => "last_edited_time",
            PropertyTypeValue::LastEditedBy { .. } => "last_edited_by",
            PropertyTypeValue::UniqueId { .. } => "unique_id",
            PropertyTypeValue::Unsupported { type_name } => type_name,
        }
    }

    /// Reduces the payload to a scalar, a string or an ordered list of strings.
    ///
    /// Total over every recognized type. Empty payloads (an unset select, a
    /// blank url) yield `None`, as do unrecognized types.
    pub fn normalized(&self) -> Option<NormalizedValue> {
        use PropertyTypeValue as P;
        match &self.type_specific_value {
            P::Title { title: runs } | P::RichText { rich_text: runs } => {
                Some(NormalizedValue::Text(plain_text(runs)))
            }
            P::Number { number } => number.map(NormalizedValue::Number),
            P::Select { select: option } | P::Status { status: option } => option
                .as_ref()
                .map(|o| NormalizedValue::Text(o.name.clone())),
            P::MultiSelect { multi_select } => Some(NormalizedValue::List(
                multi_select.iter().map(|o| o.name.clone()).collect(),
            )),
            P::Date { date } => date
                .as_ref()
                .map(|d| NormalizedValue::Text(d.start.clone())),
            P::People { people } => Some(NormalizedValue::List(
                people.iter().map(|u| u.to_string()).collect(),
            )),
            P::Checkbox { checkbox } => Some(NormalizedValue::Bool(*checkbox)),
            P::Url { url: value }
            | P::Email { email: value }
            | P::PhoneNumber {
                phone_number: value,
            } => value.clone().map(NormalizedValue::Text),
            P::Formula { formula } => match formula {
                FormulaValue::String(s) => s.clone().map(NormalizedValue::Text),
                FormulaValue::Number(n) => n.map(NormalizedValue::Number),
                FormulaValue::Boolean(b) => b.map(NormalizedValue::Bool),
                FormulaValue::Date(d) => {
                    d.as_ref().map(|d| NormalizedValue::Text(d.start.clone()))
                }
            },
            P::Relation { relation } => Some(NormalizedValue::List(
                relation.iter().map(|id| id.as_str().to_string()).collect(),
            )),
            P::Rollup { rollup } => match rollup {
                RollupValue::Number(n) => n.map(NormalizedValue::Number),
                RollupValue::Date(d) => {
                    d.as_ref().map(|d| NormalizedValue::Text(d.start.clone()))
                }
                RollupValue::Array(items) => Some(NormalizedValue::List(items.clone())),
                RollupValue::Unsupported => None,
            },
            P::CreatedTime { created_time: t }
            | P::LastEditedTime {
                last_edited_time: t,
            } => Some(NormalizedValue::Text(t.clone())),
            P::CreatedBy { created_by: user }
            | P::LastEditedBy {
                last_edited_by: user,
            } => Some(NormalizedValue::Text(user.to_string())),
            P::Files { files } => Some(NormalizedValue::List(
                files.iter().map(|f| f.name.clone()).collect(),
            )),
            P::UniqueId { unique_id } => Some(NormalizedValue::Text(unique_id.to_string())),
            P::Unsupported { .. } => None,
        }
    }
}

/// The specific value for each property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyTypeValue {
    Title { title: Vec<RichTextRun> },
    RichText { rich_text: Vec<RichTextRun> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Status { status: Option<SelectOption> },
    Date { date: Option<DateValue> },
    Formula { formula: FormulaValue },
    Relation { relation: Vec<PageId> },
    Rollup { rollup: RollupValue },
    People { people: Vec<User> },
    Files { files: Vec<FileEntry> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    /// Timestamps stay in their source text form; only block and page
    /// lifecycle times are parsed.
    CreatedTime { created_time: String },
    CreatedBy { created_by: User },
    LastEditedTime { last_edited_time: String },
    LastEditedBy { last_edited_by: User },
    UniqueId { unique_id: UniqueIdData },
    /// A property type this model does not know.
    Unsupported { type_name: String },
}

/// Unique ID data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueIdData {
    pub number: Option<i64>,
    pub prefix: Option<String>,
}

impl fmt::Display for UniqueIdData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, self.number) {
            (Some(prefix), Some(n)) => write!(f, "{}-{}", prefix, n),
            (None, Some(n)) => write!(f, "{}", n),
            (Some(prefix), None) => write!(f, "{}", prefix),
            (None, None) => Ok(()),
        }
    }
}

/// The shape every property reduces to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
}

impl NormalizedValue {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            NormalizedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for empty text and empty lists.
    pub fn is_blank(&self) -> bool {
        match self {
            NormalizedValue::Text(s) => s.trim().is_empty(),
            NormalizedValue::List(items) => items.is_empty(),
            NormalizedValue::Number(_) | NormalizedValue::Bool(_) => false,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Text(s) => write!(f, "{}", s),
            // Whole values beyond 2^53 are not exact integers; let f64 print those.
            NormalizedValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            NormalizedValue::Number(n) => write!(f, "{}", n),
            NormalizedValue::Bool(b) => write!(f, "{}", b),
            NormalizedValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}
