use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while deriving the chart metric tables.
///
/// Every table derivation is all-or-nothing: downstream stages assume
/// complete tables, so a failure on one entity aborts the whole stage.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid chart date {value:?}, expected YYYY-MM-DD: {source}")]
    DateFormat {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Artist credit {raw:?} produced no artist names")]
    EmptyArtistCredit { raw: String },

    #[error("Chart date {date} of {title:?} is off the weekly grid anchored at its debut")]
    IrregularSampling { title: String, date: NaiveDate },

    #[error("No charting artists found for year {year}")]
    NoArtistsInYear { year: i32 },

    #[error("No songs debuted in year {year}, cannot aggregate its cohort")]
    EmptyDebutCohort { year: i32 },
}
