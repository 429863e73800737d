use serde::{Deserialize, Serialize};
use std::fmt;

/// One span of text carrying uniform inline formatting and an optional link.
///
/// `text` is the rendered plain text of the span, whatever its source kind
/// (text, mention, equation). A run is immutable once parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichTextRun {
    pub text: String,
    pub link: Option<String>,
    pub annotations: Annotations,
}

impl RichTextRun {
    /// Create an unstyled, unlinked run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Returns this run with a hyperlink attached.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Returns this run with the given annotations.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Concatenates the plain text of a run sequence.
pub fn plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// Inline emphasis flags of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Annotations {
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough || self.code)
    }
}

/// Select, multi-select and status option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: Option<String>,
    pub name: String,
}

/// Date property payload, kept in the source's ISO form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    pub end: Option<String>,
    pub time_zone: Option<String>,
}

/// User representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.email) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

/// Formula result types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
}

/// Rollup result types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateValue>),
    /// Each element reduced to its display text.
    Array(Vec<String>),
    Unsupported,
}

/// File listed in a files property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub url: Option<String>,
}
