// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2jira::batch::{convert_batch, BatchReport};
use notion2jira::output::{compose_output, deliver, DeliveryTarget};
use notion2jira::{decode_records, AppError, CommandLineInput, ConversionConfig, RawRecord};
use std::fs;
use std::path::PathBuf;

const CONVERSION_LOG: &str = "notion2jira.log";
const RECORD_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Console output goes to stderr so stdout carries only the converted
/// documents. The conversion log in the temp dir is rewritten each run and
/// always keeps debug detail, so a failed record can be traced after a quiet
/// run.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let console_pattern = if verbose { RECORD_PATTERN } else { "{l}: {m}{n}" };

    let log_file_path = std::env::temp_dir().join(CONVERSION_LOG);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();

    let conversion_log = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("console", Box::new(console)),
        )
        .appender(Appender::builder().build("conversion_log", Box::new(conversion_log)))
        .build(
            Root::builder()
                .appender("console")
                .appender("conversion_log")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Conversion log: {}", log_file_path.display());
    Ok(())
}

/// Reads every input file into raw records, preserving file then record order.
fn load_records(inputs: &[PathBuf]) -> anyhow::Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for path in inputs {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let decoded = decode_records(&body).map_err(|source| AppError::JsonDecode {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded {} record(s) from {}", decoded.len(), path.display());
        records.extend(decoded);
    }
    Ok(records)
}

fn report_completion(report: &BatchReport) {
    eprintln!("{}", report.summary_line());
    for line in report.failure_preview() {
        eprintln!("  ✗ {}", line);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("Failed to initialize logging")?;

    let config = ConversionConfig::resolve(cli)?;

    let records = load_records(&config.inputs)?;
    let report = convert_batch(&records, &config.batch);

    let content = compose_output(&report, config.format)?;
    let target = DeliveryTarget::for_destination(config.output_file.clone(), content);
    let written = deliver(&target)?;
    if let DeliveryTarget::WriteFile { path, .. } = &target {
        eprintln!("✓ Wrote {} bytes to {}", written, path.display());
    }

    report_completion(&report);
    Ok(())
}
