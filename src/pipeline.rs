use crate::chart::{load_snapshots, normalize_snapshots, ChartEntry};
use crate::config::AppConfig;
use crate::metrics::{
    annual_metrics, extract_artists, extract_songs, monthly_metrics, AnnualMetric, ArtistRecord,
    MonthlyMetric, SongRecord,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The five derived tables, in the order the stages produce them. Each
/// table is built fully before the next stage starts and is read-only
/// afterward.
#[derive(Debug)]
pub struct PipelineOutput {
    pub normalized: Vec<ChartEntry>,
    pub songs: Vec<SongRecord>,
    pub artists: Vec<ArtistRecord>,
    pub annual: Vec<AnnualMetric>,
    pub monthly: Vec<MonthlyMetric>,
}

fn write_table<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(name);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create table file: {:?}", path))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)
        .with_context(|| format!("Failed to serialize table: {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write table file: {:?}", path))?;
    Ok(())
}

/// Runs the full pipeline: load snapshots, normalize, extract song and
/// artist lifecycles, aggregate, and persist all five tables as JSON
/// arrays under `out_dir`.
///
/// With `debug_dumps` set, each table is additionally written to
/// `debug_<name>.json` right after its stage completes, so a failing later
/// stage still leaves the earlier tables on disk for inspection.
pub fn run_pipeline(config: &AppConfig) -> Result<PipelineOutput> {
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create output dir: {:?}", config.out_dir))?;

    let snapshots = load_snapshots(&config.snapshots)?;
    info!("Loaded {} chart snapshots", snapshots.len());

    let normalized = normalize_snapshots(&snapshots).context("Chart normalization failed")?;
    info!("Normalized table has {} rows", normalized.len());
    if config.debug_dumps {
        write_table(&config.out_dir, "debug_normalized.json", &normalized)?;
    }

    let songs = extract_songs(&normalized).context("Song lifecycle extraction failed")?;
    info!("Song table has {} rows", songs.len());
    if config.debug_dumps {
        write_table(&config.out_dir, "debug_songs.json", &songs)?;
    }

    let artists = extract_artists(&songs);
    info!("Artist table has {} rows", artists.len());
    if config.debug_dumps {
        write_table(&config.out_dir, "debug_artists.json", &artists)?;
    }

    let annual =
        annual_metrics(&normalized, &songs, &artists).context("Annual aggregation failed")?;
    info!("Annual table has {} rows", annual.len());
    if config.debug_dumps {
        write_table(&config.out_dir, "debug_annual.json", &annual)?;
    }

    let monthly = monthly_metrics(&annual, &songs, &artists);
    info!("Monthly table has {} rows", monthly.len());
    if config.debug_dumps {
        write_table(&config.out_dir, "debug_monthly.json", &monthly)?;
    }

    write_table(&config.out_dir, "normalized.json", &normalized)?;
    write_table(&config.out_dir, "songs.json", &songs)?;
    write_table(&config.out_dir, "artists.json", &artists)?;
    write_table(&config.out_dir, "annual.json", &annual)?;
    write_table(&config.out_dir, "monthly.json", &monthly)?;

    info!(
        "Pipeline output has:\n{} normalized rows\n{} songs\n{} artists\n{} annual rows\n{} monthly rows",
        normalized.len(),
        songs.len(),
        artists.len(),
        annual.len(),
        monthly.len()
    );

    Ok(PipelineOutput {
        normalized,
        songs,
        artists,
        annual,
        monthly,
    })
}
