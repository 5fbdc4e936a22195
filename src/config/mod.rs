mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub snapshots: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub debug_dumps: bool,
}

/// The resolved configuration the pipeline entry point receives. There is
/// no ambient state, every knob travels through this struct.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file of raw chart snapshots, as delivered by the scraper.
    pub snapshots: PathBuf,
    /// Directory the derived tables are written to.
    pub out_dir: PathBuf,
    /// Dump each intermediate table right after its stage completes.
    pub debug_dumps: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let snapshots = file
            .snapshots
            .map(PathBuf::from)
            .or_else(|| cli.snapshots.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("snapshots must be specified as an argument or in the config file")
            })?;

        if !snapshots.is_file() {
            bail!("Snapshot file does not exist: {:?}", snapshots);
        }

        let out_dir = file
            .out_dir
            .map(PathBuf::from)
            .or_else(|| cli.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from("tables"));

        let debug_dumps = file.debug_dumps.unwrap_or(cli.debug_dumps);

        Ok(AppConfig {
            snapshots,
            out_dir,
            debug_dumps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        file
    }

    #[test]
    fn cli_values_are_used_without_file_config() {
        let file = snapshot_file();
        let cli = CliConfig {
            snapshots: Some(file.path().to_path_buf()),
            out_dir: Some(PathBuf::from("out")),
            debug_dumps: true,
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(config.snapshots, file.path());
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(config.debug_dumps);
    }

    #[test]
    fn toml_overrides_cli() {
        let cli_file = snapshot_file();
        let toml_file = snapshot_file();
        let cli = CliConfig {
            snapshots: Some(cli_file.path().to_path_buf()),
            out_dir: Some(PathBuf::from("cli-out")),
            debug_dumps: false,
        };
        let file_config = FileConfig {
            snapshots: Some(toml_file.path().to_string_lossy().into_owned()),
            out_dir: Some("toml-out".to_owned()),
            debug_dumps: Some(true),
        };
        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();
        assert_eq!(config.snapshots, toml_file.path());
        assert_eq!(config.out_dir, PathBuf::from("toml-out"));
        assert!(config.debug_dumps);
    }

    #[test]
    fn missing_snapshots_is_an_error() {
        let result = AppConfig::resolve(&CliConfig::default(), None);
        assert!(result.is_err());
    }

    #[test]
    fn nonexistent_snapshot_file_is_an_error() {
        let cli = CliConfig {
            snapshots: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }
}
