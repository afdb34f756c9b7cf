use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::extract::ExtractConfig;
use crate::fetch_page::DEFAULT_USER_AGENT;

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

/// Global configuration loaded from `~/.config/clipmark/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipmarkConfig {
    /// Value of the `User-Agent` header sent with page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Follow HTTP redirects when fetching a page. When false, a 3xx is a fetch failure.
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no timeout beyond libcurl's).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Load the preview as soon as a captured URL validates.
    #[serde(default = "default_true")]
    pub auto_preview: bool,
    /// Where confirmed bookmarks are appended. None = `$XDG_DATA_HOME/clipmark/bookmarks.jsonl`.
    #[serde(default)]
    pub bookmarks_file: Option<PathBuf>,
    /// Meta tag scanning options.
    #[serde(default)]
    pub extract: ExtractConfig,
}

impl Default for ClipmarkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            follow_redirects: true,
            connect_timeout_secs: None,
            timeout_secs: None,
            auto_preview: true,
            bookmarks_file: None,
            extract: ExtractConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("clipmark")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClipmarkConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &std::path::Path) -> Result<ClipmarkConfig> {
    if !path.exists() {
        let default_cfg = ClipmarkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ClipmarkConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
