//! Optional JSON config file.
//!
//! Lives at `<config_dir>/debian-tools-box/config.json` unless `--config`
//! points elsewhere. A missing file means built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Terminal emulators probed in order; names or absolute paths.
    #[serde(default)]
    pub terminals: Option<Vec<String>>,
    /// Line printed before the terminal waits for Enter.
    #[serde(default)]
    pub hold_prompt: Option<String>,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("debian-tools-box").join("config.json"))
}

/// Load `path`; an explicitly given path must exist, the default one may not.
pub fn load(path: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>)> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_path() {
            Some(p) => (p, false),
            None => return Ok((FileConfig::default(), None)),
        },
    };

    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok((FileConfig::default(), None));
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: FileConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok((cfg, Some(path)))
}
