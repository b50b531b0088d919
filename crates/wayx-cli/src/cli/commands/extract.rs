//! `wayx extract <folder>`: one extraction pass.

use anyhow::Result;
use std::path::Path;
use wayx_core::config::ExtractConfig;
use wayx_core::extract;

use crate::cli::console::ConsoleSink;

pub fn run_extract(folder: &Path, cfg: &ExtractConfig, console: &mut ConsoleSink) -> Result<()> {
    let messages = console.messages();
    let report = extract::extract(folder, cfg, console)
        .map_err(|e| anyhow::anyhow!(e.user_message(messages)))?;
    tracing::debug!(
        "extract: {} written, {} scanned, {} skipped",
        report.count(),
        report.files_scanned,
        report.failures.len()
    );
    Ok(())
}
