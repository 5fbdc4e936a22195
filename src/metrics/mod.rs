mod aggregate;
mod artist;
mod song;

pub use aggregate::{annual_metrics, monthly_metrics, AnnualMetric, MonthlyMetric};
pub use artist::{extract_artists, ArtistRecord, PopularityBin};
pub use song::{extract_songs, SongRecord};
