use wayx_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Diagnostics go to the log file; fall back to stderr when the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("wayx error: {:#}", err);
        std::process::exit(1);
    }
}
