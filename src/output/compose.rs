// src/output/compose.rs
//! Turns a batch report into the text the operator asked for.

use crate::batch::{BatchReport, ConvertedDocument};
use crate::config::OutputFormat;
use crate::error::AppError;
use crate::formatting::{render_document_markdown, RichDocument};
use serde::Serialize;

/// One converted document as it appears in rich-document output.
#[derive(Debug, Clone, Serialize)]
pub struct RichDocumentEntry<'a> {
    pub id: &'a str,
    pub title: String,
    pub description: &'a RichDocument,
}

impl<'a> From<&'a ConvertedDocument> for RichDocumentEntry<'a> {
    fn from(converted: &'a ConvertedDocument) -> Self {
        Self {
            id: converted.document.id.as_str(),
            title: converted.document.title(),
            description: &converted.rich_document,
        }
    }
}

/// Renders every converted document of `report` in `format`.
pub fn compose_output(report: &BatchReport, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Markdown => Ok(report
            .converted
            .iter()
            .map(|c| render_document_markdown(&c.document))
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::RichDocument => {
            let entries: Vec<RichDocumentEntry> =
                report.converted.iter().map(RichDocumentEntry::from).collect();
            Ok(serde_json::to_string_pretty(&entries)?)
        }
        OutputFormat::Summary => Ok(compose_summary(report)),
    }
}

fn compose_summary(report: &BatchReport) -> String {
    let mut out = String::new();
    for converted in &report.converted {
        let stats = &converted.statistics;
        out.push_str(&format!(
            "{} ({}): {} blocks, depth {}, {}/{} todos done, {} images, {} files, {} unique links\n",
            converted.document.title(),
            converted.document.id,
            stats.blocks,
            stats.deepest_nesting,
            stats.todos_done,
            stats.todos_total,
            stats.images,
            stats.files,
            stats.unique_links
        ));
    }

    let totals = report.statistics();
    out.push_str(&format!(
        "Total: {} documents ({} with todos, {} with images, {} with files), {} blocks, {}/{} todos done, {} links\n",
        totals.documents,
        totals.documents_with_todos,
        totals.documents_with_images,
        totals.documents_with_files,
        totals.blocks,
        totals.todos_done,
        totals.todos_total,
        totals.links
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawRecord;
    use crate::batch::{convert_batch, BatchOptions};
    use serde_json::{json, Value};

    fn page(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "created_time": "2024-03-01T09:00:00Z",
            "last_edited_time": "2024-03-02T10:30:00Z",
            "url": format!("https://notion.so/{}", id),
            "properties": {
                "Name": {"id": "title", "type": "title", "title": [{"plain_text": title}]}
            }
        })
    }

    fn launch_record() -> RawRecord {
        RawRecord::new(
            page("page-1", "Launch"),
            vec![json!({
                "id": "b1",
                "type": "to_do",
                "created_time": "2024-03-01T09:05:00Z",
                "last_edited_time": "2024-03-01T09:05:00Z",
                "to_do": {"rich_text": [{"plain_text": "ship it"}], "checked": true}
            })],
        )
    }

    fn report() -> BatchReport {
        convert_batch(&[launch_record()], &BatchOptions::default())
    }

    fn report_with_failure() -> BatchReport {
        let mut broken = page("page-broken", "Broken");
        broken["created_time"] = json!("never");
        let records = vec![launch_record(), RawRecord::new(broken, Vec::new())];
        convert_batch(&records, &BatchOptions::default())
    }

    #[test]
    fn test_markdown_output_starts_with_title() {
        let out = compose_output(&report(), OutputFormat::Markdown).unwrap();
        assert!(out.starts_with("# Launch\n"));
        assert!(out.contains("- [x] ship it"));
    }

    #[test]
    fn test_rich_document_output_is_a_json_array() {
        let out = compose_output(&report(), OutputFormat::RichDocument).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "page-1");
        assert_eq!(value[0]["title"], "Launch");
        assert_eq!(value[0]["description"]["type"], "doc");
        assert_eq!(value[0]["description"]["version"], 1);
    }

    #[test]
    fn test_summary_lists_documents_and_totals() {
        let out = compose_output(&report(), OutputFormat::Summary).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Launch (page-1): 1 blocks"));
        assert!(lines[0].contains("1/1 todos done"));
        assert!(lines[1].starts_with("Total: 1 documents (1 with todos"));
    }

    #[test]
    fn test_failed_records_are_left_out_of_every_format() {
        let report = report_with_failure();
        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 1);

        let markdown = compose_output(&report, OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Launch\n"));
        assert!(!markdown.contains("page-broken"));
        assert!(!markdown.contains("Broken"));

        let rich = compose_output(&report, OutputFormat::RichDocument).unwrap();
        let value: Value = serde_json::from_str(&rich).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert!(!rich.contains("page-broken"));

        let summary = compose_output(&report, OutputFormat::Summary).unwrap();
        assert_eq!(summary.lines().count(), 2);
        assert!(!summary.contains("page-broken"));
        assert!(summary.contains("Total: 1 documents"));
    }
}
