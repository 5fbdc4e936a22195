use crate::chart::ChartEntry;
use crate::error::MetricsError;
use chrono::{Datelike, Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One row of the song table, keyed by (title, main_artist).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SongRecord {
    pub title: String,
    pub main_artist: Vec<String>,
    pub debut_date: NaiveDate,
    pub debut_year: i32,
    pub debut_month: u32,
    /// Last date of the unbroken weekly run that starts at the debut.
    pub debut_end: NaiveDate,
    pub debut_streak_days: i64,
    pub debut_weeks: u32,
    /// Total distinct chart dates across the whole history, gaps included.
    pub chart_weeks: u32,
    /// chart_weeks - debut_weeks; positive means the song came back to the
    /// chart after leaving it.
    pub sleeper_hit: u32,
}

type SongKey = (String, Vec<String>);

/// Derives the song table from the normalized chart table.
///
/// Rows are grouped once by (title, main_artist); each group's sorted date
/// set is then scanned independently, in parallel across groups. Output
/// order follows the first appearance of each key in the input, so the
/// table is deterministic.
pub fn extract_songs(entries: &[ChartEntry]) -> Result<Vec<SongRecord>, MetricsError> {
    let mut order: Vec<SongKey> = Vec::new();
    let mut groups: HashMap<SongKey, BTreeSet<NaiveDate>> = HashMap::new();

    for entry in entries {
        let key = (entry.title.clone(), entry.main_artist.clone());
        match groups.get_mut(&key) {
            Some(dates) => {
                dates.insert(entry.chart_date);
            }
            None => {
                let mut dates = BTreeSet::new();
                dates.insert(entry.chart_date);
                order.push(key.clone());
                groups.insert(key, dates);
            }
        }
    }

    order
        .par_iter()
        .map(|key| song_record(&key.0, &key.1, &groups[key]))
        .collect()
}

fn song_record(
    title: &str,
    main_artist: &[String],
    dates: &BTreeSet<NaiveDate>,
) -> Result<SongRecord, MetricsError> {
    let debut_date = *dates
        .iter()
        .next()
        .expect("Song groups always hold at least one chart date.");

    // The run scan below assumes weekly sampling; anything off the 7-day
    // grid anchored at the debut is a precondition violation.
    for &date in dates {
        if (date - debut_date).num_days() % 7 != 0 {
            return Err(MetricsError::IrregularSampling {
                title: title.to_owned(),
                date,
            });
        }
    }

    let mut debut_end = debut_date;
    loop {
        let next = debut_end + Duration::days(7);
        if dates.contains(&next) {
            debut_end = next;
        } else {
            break;
        }
    }

    let debut_streak_days = (debut_end - debut_date).num_days();
    let debut_weeks = (debut_streak_days / 7 + 1) as u32;
    let chart_weeks = dates.len() as u32;

    Ok(SongRecord {
        title: title.to_owned(),
        main_artist: main_artist.to_vec(),
        debut_date,
        debut_year: debut_date.year(),
        debut_month: debut_date.month(),
        debut_end,
        debut_streak_days,
        debut_weeks,
        chart_weeks,
        sleeper_hit: chart_weeks - debut_weeks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, main_artist: &[&str], date: &str) -> ChartEntry {
        ChartEntry {
            title: title.to_owned(),
            artist: main_artist.join(" & "),
            rank: 1,
            chart_name: "hot-100".to_owned(),
            chart_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            year: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap().year(),
            main_artist: main_artist.iter().map(|s| (*s).to_owned()).collect(),
            featured_artist: None,
        }
    }

    #[test]
    fn two_consecutive_weeks_make_one_run() {
        let entries = vec![
            entry("X", &["A"], "2020-01-04"),
            entry("X", &["A"], "2020-01-11"),
        ];
        let songs = extract_songs(&entries).unwrap();

        assert_eq!(songs.len(), 1);
        let song = &songs[0];
        assert_eq!(song.debut_date, NaiveDate::from_ymd_opt(2020, 1, 4).unwrap());
        assert_eq!(song.debut_end, NaiveDate::from_ymd_opt(2020, 1, 11).unwrap());
        assert_eq!(song.debut_weeks, 2);
        assert_eq!(song.chart_weeks, 2);
        assert_eq!(song.sleeper_hit, 0);
    }

    #[test]
    fn gap_week_breaks_the_run() {
        let entries = vec![
            entry("X", &["A"], "2020-01-04"),
            entry("X", &["A"], "2020-01-18"),
        ];
        let songs = extract_songs(&entries).unwrap();

        let song = &songs[0];
        assert_eq!(song.debut_end, song.debut_date);
        assert_eq!(song.debut_weeks, 1);
        assert_eq!(song.chart_weeks, 2);
        assert_eq!(song.sleeper_hit, 1);
    }

    #[test]
    fn single_week_song() {
        let entries = vec![entry("X", &["A"], "2020-01-04")];
        let songs = extract_songs(&entries).unwrap();

        let song = &songs[0];
        assert_eq!(song.debut_weeks, 1);
        assert_eq!(song.chart_weeks, 1);
        assert_eq!(song.sleeper_hit, 0);
        assert_eq!(song.debut_streak_days, 0);
        assert_eq!(song.debut_year, 2020);
        assert_eq!(song.debut_month, 1);
    }

    #[test]
    fn run_then_gap_then_return() {
        let entries = vec![
            entry("X", &["A"], "2020-01-04"),
            entry("X", &["A"], "2020-01-11"),
            entry("X", &["A"], "2020-01-18"),
            entry("X", &["A"], "2020-02-08"),
            entry("X", &["A"], "2020-02-15"),
        ];
        let songs = extract_songs(&entries).unwrap();

        let song = &songs[0];
        assert_eq!(song.debut_end, NaiveDate::from_ymd_opt(2020, 1, 18).unwrap());
        assert_eq!(song.debut_weeks, 3);
        assert_eq!(song.chart_weeks, 5);
        assert_eq!(song.sleeper_hit, 2);
    }

    #[test]
    fn same_title_different_main_artist_is_a_different_song() {
        let entries = vec![
            entry("X", &["A"], "2020-01-04"),
            entry("X", &["B"], "2020-01-04"),
        ];
        let songs = extract_songs(&entries).unwrap();
        assert_eq!(songs.len(), 2);
    }

    #[test]
    fn output_follows_first_appearance_order() {
        let entries = vec![
            entry("Y", &["B"], "2020-01-04"),
            entry("X", &["A"], "2020-01-04"),
            entry("Y", &["B"], "2020-01-11"),
        ];
        let songs = extract_songs(&entries).unwrap();
        assert_eq!(songs[0].title, "Y");
        assert_eq!(songs[1].title, "X");
    }

    #[test]
    fn off_grid_date_fails_fast() {
        let entries = vec![
            entry("X", &["A"], "2020-01-04"),
            entry("X", &["A"], "2020-01-07"),
        ];
        match extract_songs(&entries) {
            Err(MetricsError::IrregularSampling { title, date }) => {
                assert_eq!(title, "X");
                assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 7).unwrap());
            }
            other => panic!("Expected IrregularSampling error, got {:?}", other),
        }
    }
}
