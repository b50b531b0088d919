use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::waypoint::{NAME_PREFIX, WAYPOINT_COLOR};

/// Default name of the aggregated output written into the scanned folder.
pub const DEFAULT_OUTPUT_FILENAME: &str = "waypoints.json";

/// Extraction settings (`[extract]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// File name of the aggregated output, written into the scanned folder.
    pub output_filename: String,
    /// Prepended to each source `name`.
    pub name_prefix: String,
    /// Color stamped on every waypoint (ARGB, opaque white by default).
    pub color: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            name_prefix: NAME_PREFIX.to_string(),
            color: WAYPOINT_COLOR,
        }
    }
}

impl ExtractConfig {
    /// Bare file name of the output. Directory parts are dropped so the output always
    /// lands in the scanned folder; unusable values fall back to the default name.
    pub fn output_name(&self) -> &OsStr {
        Path::new(&self.output_filename)
            .file_name()
            .unwrap_or_else(|| OsStr::new(DEFAULT_OUTPUT_FILENAME))
    }
}

/// Download settings (`[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Stream responses without `Content-Length` until the server closes.
    /// Explicitly empty responses are rejected either way.
    pub allow_unknown_size: bool,
    /// Receive buffer size in bytes; each body chunk written to disk is at most this long.
    pub chunk_size: usize,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    pub follow_redirects: bool,
    pub max_redirections: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            allow_unknown_size: false,
            chunk_size: 16 * 1024,
            connect_timeout_secs: None,
            follow_redirects: true,
            max_redirections: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/wayx/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WayxConfig {
    /// Language code for user-facing messages ("en", "fr"). None = detect from environment.
    pub locale: Option<String>,
    pub extract: ExtractConfig,
    pub fetch: FetchConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wayx")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, writing defaults there if the file does not exist.
pub fn load_or_init_at(path: &Path) -> Result<WayxConfig> {
    if !path.exists() {
        let default_cfg = WayxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WayxConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WayxConfig> {
    load_or_init_at(&config_path()?)
}
