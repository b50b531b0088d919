//! CLI for wayx.

mod commands;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wayx_core::config;
use wayx_core::locale::Locale;

use commands::{run_download, run_extract};
use console::ConsoleSink;

/// Top-level CLI for wayx.
#[derive(Debug, Parser)]
#[command(name = "wayx")]
#[command(about = "Extract waypoints from a folder of JSON files, or download a file", long_about = None)]
pub struct Cli {
    /// Message language ("en", "fr"). Defaults to config, then the environment locale.
    #[arg(long, global = true, value_name = "CODE")]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan FOLDER for *.json sources and write the aggregated waypoints file into it.
    Extract {
        /// Folder containing the JSON files.
        folder: PathBuf,
    },

    /// Download URL to DEST (a file path, or a directory to save into).
    Download {
        /// Direct HTTP/HTTPS URL.
        url: String,

        /// Destination file or directory (default: current directory).
        dest: Option<PathBuf>,

        /// Stream responses that carry no Content-Length instead of rejecting them.
        #[arg(long)]
        allow_unknown_size: bool,
    },
}

/// Resolves the message language: flag, then config, then environment.
/// An unsupported code at one level falls through to the next.
fn pick_locale(flag: Option<&str>, configured: Option<&str>) -> Locale {
    let parse = |code: &str| {
        let loc = Locale::from_code(code);
        if loc.is_none() {
            tracing::warn!("unsupported language {:?}; ignoring", code);
        }
        loc
    };
    flag.and_then(parse)
        .or_else(|| configured.and_then(parse))
        .unwrap_or_else(Locale::detect)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let locale = pick_locale(cli.lang.as_deref(), cfg.locale.as_deref());
        let mut console = ConsoleSink::new(locale.messages());

        match cli.command {
            CliCommand::Extract { folder } => run_extract(&folder, &cfg.extract, &mut console)?,
            CliCommand::Download {
                url,
                dest,
                allow_unknown_size,
            } => {
                if allow_unknown_size {
                    cfg.fetch.allow_unknown_size = true;
                }
                let dest = match dest {
                    Some(d) => d,
                    None => std::env::current_dir()?,
                };
                run_download(&url, &dest, &cfg.fetch, &mut console)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
