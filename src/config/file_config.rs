use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML config, every field can also come from the CLI.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub snapshots: Option<String>,
    pub out_dir: Option<String>,
    pub debug_dumps: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
