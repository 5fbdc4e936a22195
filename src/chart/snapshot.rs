use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One charted position as delivered by the scraper.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RawChartEntry {
    pub title: String,
    pub artist: String,
    pub rank: u32,
}

/// One weekly chart as delivered by the scraper. The date stays a raw
/// string here, it is only parsed during normalization.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChartSnapshot {
    pub chart_name: String,
    pub date: String,
    pub entries: Vec<RawChartEntry>,
}

pub fn load_snapshots(path: &Path) -> Result<Vec<ChartSnapshot>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open snapshot file: {:?}", path))?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse snapshot file: {:?}", path))
}
