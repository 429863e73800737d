// src/formatting/rich_document/nodes.rs
//! The tagged-node tree the issue tracker accepts as a structured description.

use serde::{Deserialize, Serialize};

/// Root of a rich document: `{"type": "doc", "version": 1, "content": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub version: u32,
    pub content: Vec<RichNode>,
}

impl RichDocument {
    pub fn new(content: Vec<RichNode>) -> Self {
        Self {
            kind: DocumentKind::Doc,
            version: 1,
            content,
        }
    }

    /// Top-level nodes matching `predicate`.
    pub fn nodes<'a>(
        &'a self,
        predicate: impl Fn(&RichNode) -> bool + 'a,
    ) -> impl Iterator<Item = &'a RichNode> + 'a {
        self.content.iter().filter(move |node| predicate(*node))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Doc,
}

/// One node of the tree. Block nodes hold inline `Text` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RichNode {
    Heading {
        attrs: HeadingAttrs,
        content: Vec<RichNode>,
    },
    Paragraph {
        content: Vec<RichNode>,
    },
    TaskList {
        attrs: TaskListAttrs,
        content: Vec<RichNode>,
    },
    TaskItem {
        attrs: TaskItemAttrs,
        content: Vec<RichNode>,
    },
    Rule,
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

impl RichNode {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        RichNode::Heading {
            attrs: HeadingAttrs { level },
            content: vec![RichNode::text(text)],
        }
    }

    pub fn paragraph(content: Vec<RichNode>) -> Self {
        RichNode::Paragraph { content }
    }

    pub fn text(text: impl Into<String>) -> Self {
        RichNode::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        RichNode::Text {
            text: text.into(),
            marks,
        }
    }

    /// Child nodes; empty for `Rule` and `Text`.
    pub fn content(&self) -> &[RichNode] {
        match self {
            RichNode::Heading { content, .. }
            | RichNode::Paragraph { content }
            | RichNode::TaskList { content, .. }
            | RichNode::TaskItem { content, .. } => content,
            RichNode::Rule | RichNode::Text { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            RichNode::Text { text, .. } => text.clone(),
            other => other.content().iter().map(RichNode::plain_text).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListAttrs {
    pub local_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemAttrs {
    pub local_id: String,
    pub state: TaskState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Done,
    Todo,
}

impl From<bool> for TaskState {
    fn from(checked: bool) -> Self {
        if checked {
            TaskState::Done
        } else {
            TaskState::Todo
        }
    }
}

/// Inline mark on a text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Strong,
    Em,
    Strike,
    Code,
    Link { attrs: LinkAttrs },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}
