use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chart_metrics::config::{AppConfig, CliConfig, FileConfig};
use chart_metrics::pipeline::run_pipeline;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON file of raw chart snapshots produced by the scraper.
    #[clap(value_parser = parse_path)]
    pub snapshots: Option<PathBuf>,

    /// Directory the derived tables are written to.
    #[clap(long, value_parser = parse_path)]
    pub out_dir: Option<PathBuf>,

    /// Dump each intermediate table right after its stage completes.
    #[clap(long)]
    pub debug_dumps: bool,

    /// Path to a TOML config file. Values there override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match cli_args.config.as_deref() {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        snapshots: cli_args.snapshots,
        out_dir: cli_args.out_dir,
        debug_dumps: cli_args.debug_dumps,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Running chart metrics pipeline on {:?}...", config.snapshots);
    run_pipeline(&config)?;
    info!("Tables written to {:?}", config.out_dir);

    Ok(())
}
