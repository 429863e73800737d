// src/batch.rs
//! Batch conversion with per-record failure isolation.
//!
//! Records are independent, so they convert in parallel. A record that fails
//! to parse is reported with its identifier and category and never affects
//! its neighbours. Output order always follows input order.

use crate::analytics::{BatchStatistics, DocumentStatistics};
use crate::api::{parse_record, RawRecord};
use crate::constants::REPORT_PREVIEW_ITEMS;
use crate::error::FailureCategory;
use crate::formatting::{
    render_markdown, render_rich_document_with, RichDocument, RichDocumentConfig,
};
use crate::model::Document;
use crate::types::ParseWarning;
use rayon::prelude::*;
use std::fmt;

/// What a batch run converts and how.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub include_archived: bool,
    pub rich_document: RichDocumentConfig,
}

/// One successfully converted record with both renderings.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub document: Document,
    pub markdown: String,
    pub rich_document: RichDocument,
    pub statistics: DocumentStatistics,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Archived,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: SkipReason,
}

/// A record that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub id: String,
    pub category: FailureCategory,
    pub cause: String,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.id, self.category, self.cause)
    }
}

/// Outcome of converting one raw record.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Converted(Box<ConvertedDocument>),
    Skipped(SkippedRecord),
    Failed(DocumentFailure),
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertedDocument>,
    pub skipped: Vec<SkippedRecord>,
    pub failed: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failed.len()
    }

    /// "processed / converted / skipped / failed" counts on one line.
    pub fn summary_line(&self) -> String {
        format!(
            "Processed {} documents: {} converted, {} skipped, {} failed",
            self.processed(),
            self.converted.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }

    /// Failure lines for operators, collapsing the tail into "+N more".
    pub fn failure_preview(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .failed
            .iter()
            .take(REPORT_PREVIEW_ITEMS)
            .map(ToString::to_string)
            .collect();
        lines.extend(preview_overflow(self.failed.len(), REPORT_PREVIEW_ITEMS));
        lines
    }

    pub fn statistics(&self) -> BatchStatistics {
        self.converted.iter().map(|c| &c.statistics).collect()
    }
}

/// "+N more" when `total` exceeds `shown`.
pub fn preview_overflow(total: usize, shown: usize) -> Option<String> {
    (total > shown).then(|| format!("+{} more", total - shown))
}

/// Parses and renders one record.
pub fn convert_record(record: &RawRecord, options: &BatchOptions) -> RecordOutcome {
    if record.is_archived() && !options.include_archived {
        log::debug!("Skipping archived record {}", record.id());
        return RecordOutcome::Skipped(SkippedRecord {
            id: record.id().to_string(),
            reason: SkipReason::Archived,
        });
    }

    match parse_record(record) {
        Ok((document, warnings)) => {
            let converted = ConvertedDocument {
                markdown: render_markdown(&document),
                rich_document: render_rich_document_with(&document, &options.rich_document),
                statistics: DocumentStatistics::measure(&document),
                document,
                warnings,
            };
            RecordOutcome::Converted(Box::new(converted))
        }
        Err(err) => {
            log::warn!("Failed to parse record {}: {}", record.id(), err);
            RecordOutcome::Failed(DocumentFailure {
                id: record.id().to_string(),
                category: err.category(),
                cause: err.to_string(),
            })
        }
    }
}

/// Converts all records in parallel; the report keeps input order.
pub fn convert_batch(records: &[RawRecord], options: &BatchOptions) -> BatchReport {
    let outcomes: Vec<RecordOutcome> = records
        .par_iter()
        .map(|record| convert_record(record, options))
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            RecordOutcome::Converted(converted) => report.converted.push(*converted),
            RecordOutcome::Skipped(skipped) => report.skipped.push(skipped),
            RecordOutcome::Failed(failure) => report.failed.push(failure),
        }
    }
    log::info!("{}", report.summary_line());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(id: &str, created: &str, archived: bool) -> RawRecord {
        RawRecord::new(
            json!({
                "id": id,
                "created_time": created,
                "last_edited_time": "2024-03-01T09:00:00Z",
                "archived": archived,
                "url": format!("https://notion.so/{}", id),
                "properties": {}
            }),
            vec![],
        )
    }

    #[test]
    fn test_one_bad_record_does_not_abort_the_batch() {
        let records = vec![
            record("a", "2024-03-01T09:00:00Z", false),
            record("b", "first of march", false),
            record("c", "2024-03-01T09:00:00Z", false),
            record("d", "2024-03-01T09:00:00Z", true),
        ];
        let report = convert_batch(&records, &BatchOptions::default());

        let converted: Vec<&str> = report
            .converted
            .iter()
            .map(|c| c.document.id.as_str())
            .collect();
        assert_eq!(converted, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "b");
        assert_eq!(report.failed[0].category, FailureCategory::MalformedTimestamp);
        assert_eq!(report.skipped[0].reason, SkipReason::Archived);
        assert_eq!(
            report.summary_line(),
            "Processed 4 documents: 2 converted, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn test_archived_records_convert_when_included() {
        let options = BatchOptions {
            include_archived: true,
            ..Default::default()
        };
        let report = convert_batch(&[record("d", "2024-03-01T09:00:00Z", true)], &options);
        assert_eq!(report.converted.len(), 1);
        assert!(report.converted[0].document.archived);
    }

    #[test]
    fn test_preview_overflow() {
        assert_eq!(preview_overflow(12, 10).as_deref(), Some("+2 more"));
        assert_eq!(preview_overflow(10, 10), None);
    }

    #[test]
    fn test_failure_preview_collapses_tail() {
        let records: Vec<RawRecord> = (0..12)
            .map(|i| record(&format!("bad-{}", i), "never", false))
            .collect();
        let report = convert_batch(&records, &BatchOptions::default());
        let preview = report.failure_preview();
        assert_eq!(preview.len(), 11);
        assert_eq!(preview.last().map(String::as_str), Some("+2 more"));
        assert!(preview[0].starts_with("bad-0 [malformed_timestamp]"));
    }
}
