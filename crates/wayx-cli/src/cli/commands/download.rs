//! `wayx download <url> [dest]`: fetch one file.

use anyhow::Result;
use std::path::Path;
use wayx_core::config::FetchConfig;
use wayx_core::fetch;

use crate::cli::console::ConsoleSink;

pub fn run_download(
    url: &str,
    dest: &Path,
    cfg: &FetchConfig,
    console: &mut ConsoleSink,
) -> Result<()> {
    let messages = console.messages();
    let outcome = fetch::download(url, dest, cfg, console).map_err(|e| {
        anyhow::anyhow!("{}: {}", messages.warning, e.user_message(messages))
    })?;
    tracing::debug!("download outcome: {:?}", outcome);
    Ok(())
}
