use super::{ArtistRecord, SongRecord};
use crate::chart::ChartEntry;
use crate::error::MetricsError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Cohort statistics for one calendar year present in the chart data.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AnnualMetric {
    pub year: i32,
    pub decade: i32,
    pub decade_str: String,
    pub num_different_artists: u32,
    pub num_debut_artists: u32,
    pub perc_debut_artists: f64,
    pub median_debut_length: f64,
    pub num_different_songs: u32,
    pub mean_num_songs_per_artist: f64,
}

/// Debut counts for one (year, month) cell of the full cross product.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MonthlyMetric {
    pub year: i32,
    pub month: u32,
    pub decade: i32,
    pub artist_debuts: u32,
    pub song_releases: u32,
}

fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).expect("debut week counts are never NaN"));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Computes the annual metric table, one row per year present in the
/// normalized table, years sorted ascending.
///
/// A year with no charting artists or no debuting songs is a data
/// integrity problem and fails the stage instead of producing NaN rows.
pub fn annual_metrics(
    entries: &[ChartEntry],
    songs: &[SongRecord],
    artists: &[ArtistRecord],
) -> Result<Vec<AnnualMetric>, MetricsError> {
    // group everything by year once instead of rescanning per year
    let mut artists_by_year: HashMap<i32, HashSet<&str>> = HashMap::new();
    for entry in entries {
        let names = artists_by_year.entry(entry.year).or_default();
        for name in &entry.main_artist {
            names.insert(name.as_str());
        }
    }

    let mut songs_by_debut_year: HashMap<i32, Vec<&SongRecord>> = HashMap::new();
    for song in songs {
        songs_by_debut_year.entry(song.debut_year).or_default().push(song);
    }

    let mut debut_artists_by_year: HashMap<i32, u32> = HashMap::new();
    for artist in artists {
        *debut_artists_by_year.entry(artist.debut_year).or_default() += 1;
    }

    let mut years: Vec<i32> = artists_by_year.keys().copied().collect();
    years.sort_unstable();

    let mut metrics = Vec::with_capacity(years.len());
    for year in years {
        let num_different_artists = artists_by_year[&year].len() as u32;
        if num_different_artists == 0 {
            return Err(MetricsError::NoArtistsInYear { year });
        }
        let num_debut_artists = debut_artists_by_year.get(&year).copied().unwrap_or(0);

        let cohort = songs_by_debut_year.get(&year).map(Vec::as_slice).unwrap_or(&[]);
        if cohort.is_empty() {
            return Err(MetricsError::EmptyDebutCohort { year });
        }

        let mut debut_weeks: Vec<f64> = cohort.iter().map(|s| f64::from(s.debut_weeks)).collect();
        let decade = decade_of(year);

        metrics.push(AnnualMetric {
            year,
            decade,
            decade_str: decade.to_string(),
            num_different_artists,
            num_debut_artists,
            perc_debut_artists: f64::from(num_debut_artists) / f64::from(num_different_artists),
            median_debut_length: median(&mut debut_weeks),
            num_different_songs: cohort.len() as u32,
            mean_num_songs_per_artist: mean_songs_per_artist(cohort),
        });
    }

    Ok(metrics)
}

/// Mean number of cohort songs per artist, over the distinct artists
/// appearing in the main-artist tuples of the songs debuting that year.
fn mean_songs_per_artist(cohort: &[&SongRecord]) -> f64 {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for song in cohort {
        let mut seen_in_song: HashSet<&str> = HashSet::new();
        for name in &song.main_artist {
            if seen_in_song.insert(name.as_str()) {
                *counts.entry(name.as_str()).or_default() += 1;
            }
        }
    }
    let total: u32 = counts.values().sum();
    f64::from(total) / counts.len() as f64
}

/// Computes the monthly metric table: the full cross product of the annual
/// table's years and months 1-12, with per-cell debut counts.
pub fn monthly_metrics(
    annual: &[AnnualMetric],
    songs: &[SongRecord],
    artists: &[ArtistRecord],
) -> Vec<MonthlyMetric> {
    let mut artist_debuts: HashMap<(i32, u32), u32> = HashMap::new();
    for artist in artists {
        *artist_debuts
            .entry((artist.debut_year, artist.debut_month))
            .or_default() += 1;
    }
    let mut song_releases: HashMap<(i32, u32), u32> = HashMap::new();
    for song in songs {
        *song_releases
            .entry((song.debut_year, song.debut_month))
            .or_default() += 1;
    }

    let mut monthlies = Vec::with_capacity(annual.len() * 12);
    for metric in annual {
        for month in 1..=12 {
            monthlies.push(MonthlyMetric {
                year: metric.year,
                month,
                decade: decade_of(metric.year),
                artist_debuts: artist_debuts
                    .get(&(metric.year, month))
                    .copied()
                    .unwrap_or(0),
                song_releases: song_releases
                    .get(&(metric.year, month))
                    .copied()
                    .unwrap_or(0),
            });
        }
    }
    monthlies
}
