use super::{ChartSnapshot, CreditParser};
use crate::error::MetricsError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the normalized chart table: a single charted position with
/// the derived date, year and artist columns attached.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct ChartEntry {
    pub title: String,
    pub artist: String,
    pub rank: u32,
    pub chart_name: String,
    pub chart_date: NaiveDate,
    pub year: i32,
    pub main_artist: Vec<String>,
    pub featured_artist: Option<Vec<String>>,
}

/// Flattens raw snapshots into one row-per-entry table.
///
/// Dates must be strict `YYYY-MM-DD`, a malformed date aborts the whole
/// stage. Exact full-row duplicates are dropped keeping the first
/// occurrence; that is the only dedup rule, there is no fuzzy matching.
pub fn normalize_snapshots(snapshots: &[ChartSnapshot]) -> Result<Vec<ChartEntry>, MetricsError> {
    let parser = CreditParser::new();
    let mut seen: HashSet<ChartEntry> = HashSet::new();
    let mut rows = Vec::new();

    for snapshot in snapshots {
        let chart_date = NaiveDate::parse_from_str(&snapshot.date, "%Y-%m-%d").map_err(
            |source| MetricsError::DateFormat {
                value: snapshot.date.clone(),
                source,
            },
        )?;
        for raw in &snapshot.entries {
            let credit = parser.parse(&raw.artist)?;
            let row = ChartEntry {
                title: raw.title.clone(),
                artist: raw.artist.clone(),
                rank: raw.rank,
                chart_name: snapshot.chart_name.clone(),
                chart_date,
                year: chart_date.year(),
                main_artist: credit.main,
                featured_artist: credit.featured,
            };
            if seen.insert(row.clone()) {
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RawChartEntry;

    fn snapshot(date: &str, entries: &[(&str, &str, u32)]) -> ChartSnapshot {
        ChartSnapshot {
            chart_name: "hot-100".to_owned(),
            date: date.to_owned(),
            entries: entries
                .iter()
                .map(|(title, artist, rank)| RawChartEntry {
                    title: (*title).to_owned(),
                    artist: (*artist).to_owned(),
                    rank: *rank,
                })
                .collect(),
        }
    }

    #[test]
    fn derives_date_year_and_artist_columns() {
        let snapshots = vec![snapshot("2020-01-04", &[("X", "A Featuring B", 1)])];
        let rows = normalize_snapshots(&snapshots).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.chart_date, NaiveDate::from_ymd_opt(2020, 1, 4).unwrap());
        assert_eq!(row.year, 2020);
        assert_eq!(row.main_artist, vec!["A"]);
        assert_eq!(row.featured_artist, Some(vec!["B".to_owned()]));
        assert_eq!(row.artist, "A Featuring B");
        assert_eq!(row.rank, 1);
    }

    #[test]
    fn rejects_malformed_date() {
        let snapshots = vec![snapshot("01/04/2020", &[("X", "A", 1)])];
        match normalize_snapshots(&snapshots) {
            Err(MetricsError::DateFormat { value, .. }) => assert_eq!(value, "01/04/2020"),
            other => panic!("Expected DateFormat error, got {:?}", other),
        }
    }

    #[test]
    fn drops_exact_duplicates_keeping_first() {
        let snapshots = vec![
            snapshot("2020-01-04", &[("X", "A", 1), ("X", "A", 1), ("Y", "B", 2)]),
            snapshot("2020-01-04", &[("X", "A", 1)]),
        ];
        let rows = normalize_snapshots(&snapshots).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "X");
        assert_eq!(rows[1].title, "Y");
    }

    #[test]
    fn same_entry_on_different_weeks_is_not_a_duplicate() {
        let snapshots = vec![
            snapshot("2020-01-04", &[("X", "A", 1)]),
            snapshot("2020-01-11", &[("X", "A", 1)]),
        ];
        let rows = normalize_snapshots(&snapshots).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
