//! CLI command handlers.

mod download;
mod extract;

pub use download::run_download;
pub use extract::run_extract;
