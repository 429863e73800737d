// src/output/writer.rs
//! Executes delivery targets by performing the actual I/O.

use super::DeliveryTarget;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Delivers composed output, returning the number of bytes written.
pub fn deliver(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::DeliveryFailed(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    fs::write(path, content)
        .map_err(|e| AppError::DeliveryFailed(format!("cannot write {}: {}", path.display(), e)))?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
