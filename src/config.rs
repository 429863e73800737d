// src/config.rs
use crate::batch::BatchOptions;
use crate::error::AppError;
use crate::formatting::rich_document::{RichDocumentConfig, RichDocumentLimits};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What the converter prints for each batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full markdown export of every converted document
    #[default]
    Markdown,
    /// Tracker rich-document JSON, one entry per document
    RichDocument,
    /// Per-document statistics and batch totals
    Summary,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Exported record files (JSON: one `{page, blocks}` record or an array of them)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Convert archived records instead of skipping them
    #[arg(long, default_value_t = false)]
    pub include_archived: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Maximum characters per description paragraph
    #[arg(long)]
    pub max_paragraph_chars: Option<usize>,

    /// Maximum description paragraphs
    #[arg(long)]
    pub max_paragraphs: Option<usize>,

    /// Maximum characters per checklist item
    #[arg(long)]
    pub max_task_item_chars: Option<usize>,

    /// Maximum checklist items
    #[arg(long)]
    pub max_task_items: Option<usize>,

    /// Maximum image entries
    #[arg(long)]
    pub max_images: Option<usize>,

    /// Maximum file entries
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Maximum unique link entries
    #[arg(long)]
    pub max_links: Option<usize>,

    /// Maximum characters of a url shown as link text
    #[arg(long)]
    pub max_link_text_chars: Option<usize>,
}

/// Resolved conversion configuration, validated and ready to drive a batch.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub inputs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub batch: BatchOptions,
}

impl ConversionConfig {
    /// Resolves a complete configuration from CLI input.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        if cli.inputs.is_empty() {
            return Err(AppError::InvalidConfiguration(
                "at least one input file is required".to_string(),
            ));
        }

        let defaults = RichDocumentLimits::default();
        let limits = RichDocumentLimits {
            paragraph_max_chars: cap(
                "max-paragraph-chars",
                cli.max_paragraph_chars,
                defaults.paragraph_max_chars,
            )?,
            max_paragraphs: cap("max-paragraphs", cli.max_paragraphs, defaults.max_paragraphs)?,
            task_item_max_chars: cap(
                "max-task-item-chars",
                cli.max_task_item_chars,
                defaults.task_item_max_chars,
            )?,
            max_task_items: cap("max-task-items", cli.max_task_items, defaults.max_task_items)?,
            max_images: cap("max-images", cli.max_images, defaults.max_images)?,
            max_files: cap("max-files", cli.max_files, defaults.max_files)?,
            max_links: cap("max-links", cli.max_links, defaults.max_links)?,
            link_text_max_chars: cap(
                "max-link-text-chars",
                cli.max_link_text_chars,
                defaults.link_text_max_chars,
            )?,
        };

        Ok(ConversionConfig {
            inputs: cli.inputs,
            format: cli.format,
            output_file: cli.output_file,
            verbose: cli.verbose,
            batch: BatchOptions {
                include_archived: cli.include_archived,
                rich_document: RichDocumentConfig {
                    limits,
                    ..Default::default()
                },
            },
        })
    }
}

/// A cap override must be positive; absent means the default.
fn cap(flag: &str, value: Option<usize>, default: usize) -> Result<usize, AppError> {
    match value {
        Some(0) => Err(AppError::InvalidConfiguration(format!(
            "--{} must be greater than zero",
            flag
        ))),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let cli = CommandLineInput::parse_from(["notion2jira", "export.json"]);
        let config = ConversionConfig::resolve(cli).unwrap();
        assert_eq!(config.format, OutputFormat::Markdown);
        assert!(!config.batch.include_archived);
        assert_eq!(
            config.batch.rich_document.limits,
            RichDocumentLimits::default()
        );
    }

    #[test]
    fn test_overrides_and_format() {
        let cli = CommandLineInput::parse_from([
            "notion2jira",
            "a.json",
            "b.json",
            "--format",
            "rich-document",
            "--max-task-items",
            "5",
            "--include-archived",
        ]);
        let config = ConversionConfig::resolve(cli).unwrap();
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.format, OutputFormat::RichDocument);
        assert_eq!(config.batch.rich_document.limits.max_task_items, 5);
        assert!(config.batch.include_archived);
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let cli = CommandLineInput::parse_from(["notion2jira", "a.json", "--max-links", "0"]);
        let err = ConversionConfig::resolve(cli).unwrap_err();
        assert!(err.to_string().contains("--max-links"));
    }
}
