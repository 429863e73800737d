// src/output/mod.rs
//! Output handling with planning separated from execution.
//!
//! `compose_output` turns a batch report into text without touching the
//! filesystem; `deliver` is the only place that performs I/O.

mod compose;
mod writer;

use std::path::PathBuf;

pub use compose::{compose_output, RichDocumentEntry};
pub use writer::deliver;

/// Where composed output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories
    WriteFile { path: PathBuf, content: String },
    /// Print to stdout
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    /// File output when a path is given, stdout otherwise.
    pub fn for_destination(path: Option<PathBuf>, content: String) -> Self {
        match path {
            Some(path) => DeliveryTarget::WriteFile { path, content },
            None => DeliveryTarget::PrintToStdout { content },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_defaults_to_stdout() {
        let target = DeliveryTarget::for_destination(None, "x".to_string());
        assert_eq!(
            target,
            DeliveryTarget::PrintToStdout {
                content: "x".to_string()
            }
        );

        let target =
            DeliveryTarget::for_destination(Some(PathBuf::from("out.md")), "x".to_string());
        match target {
            DeliveryTarget::WriteFile { path, .. } => assert_eq!(path, PathBuf::from("out.md")),
            other => panic!("expected a file target, got {:?}", other),
        }
    }
}
