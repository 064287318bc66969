use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "nebula.config.json";

/// Nebula configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding pages/ and edits/
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Page edited when no --page is given
    #[serde(default = "default_page")]
    pub default_page: String,

    /// Entries listed by `nebula history` without --limit
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_store_dir() -> String {
    ".nebula".to_string()
}

fn default_page() -> String {
    "home".to_string()
}

fn default_history_limit() -> usize {
    5
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store directory
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    /// `page` if given, otherwise the configured default
    pub fn page_or_default<'a>(&'a self, page: Option<&'a str>) -> &'a str {
        page.unwrap_or(&self.default_page)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            default_page: default_page(),
            history_limit: default_history_limit(),
        }
    }
}
