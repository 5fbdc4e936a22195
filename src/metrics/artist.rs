use super::SongRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Popularity bucket of an artist, a fixed function of `charted_songs`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum PopularityBin {
    #[serde(rename = "one-hit wonder")]
    OneHitWonder,
    #[serde(rename = "2-10 songs")]
    TwoToTen,
    #[serde(rename = "11-50 songs")]
    ElevenToFifty,
    #[serde(rename = "51+ songs")]
    FiftyOnePlus,
}

impl PopularityBin {
    pub fn from_charted_songs(count: u32) -> PopularityBin {
        match count {
            0..=1 => PopularityBin::OneHitWonder,
            2..=10 => PopularityBin::TwoToTen,
            11..=50 => PopularityBin::ElevenToFifty,
            _ => PopularityBin::FiftyOnePlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PopularityBin::OneHitWonder => "one-hit wonder",
            PopularityBin::TwoToTen => "2-10 songs",
            PopularityBin::ElevenToFifty => "11-50 songs",
            PopularityBin::FiftyOnePlus => "51+ songs",
        }
    }
}

/// One row of the artist table, keyed by a single artist name taken from
/// the union of all songs' main-artist tuples.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ArtistRecord {
    pub artist: String,
    pub debut_date: NaiveDate,
    pub debut_year: i32,
    pub debut_month: u32,
    pub charted_songs: u32,
    pub bin: PopularityBin,
    pub debut_song: String,
}

/// Derives the artist table from the song table.
///
/// Artists are enumerated in first-appearance order over the song table,
/// which keeps the output deterministic. The debut song is the first song
/// in table order that achieves the artist's earliest debut date.
pub fn extract_artists(songs: &[SongRecord]) -> Vec<ArtistRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut song_indices: HashMap<String, Vec<usize>> = HashMap::new();

    for (idx, song) in songs.iter().enumerate() {
        for name in &song.main_artist {
            let indices = song_indices.entry(name.clone()).or_default();
            if indices.is_empty() {
                order.push(name.clone());
            }
            // a name repeated inside one tuple still counts the song once
            if indices.last() != Some(&idx) {
                indices.push(idx);
            }
        }
    }

    order
        .iter()
        .map(|name| {
            let indices = &song_indices[name];
            let mut debut_idx = indices[0];
            for &idx in &indices[1..] {
                if songs[idx].debut_date < songs[debut_idx].debut_date {
                    debut_idx = idx;
                }
            }
            let debut = &songs[debut_idx];
            ArtistRecord {
                artist: name.clone(),
                debut_date: debut.debut_date,
                debut_year: debut.debut_date.year(),
                debut_month: debut.debut_date.month(),
                charted_songs: indices.len() as u32,
                bin: PopularityBin::from_charted_songs(indices.len() as u32),
                debut_song: debut.title.clone(),
            }
        })
        .collect()
}
