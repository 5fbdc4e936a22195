use crate::error::MetricsError;
use regex::Regex;

/// Separators that mark the start of the featured block of a credit.
/// Only the first occurrence splits, everything after it is featured.
pub const FEATURE_SEPARATORS: [&str; 3] = [" Featuring ", " Ft. ", " Feat. "];

/// Separators between the names of the main-credit block, in match order.
pub const MAIN_SEPARATORS: [&str; 6] = [" With ", ", ", " x ", " & ", " + ", "/"];

/// Separators between the names of the featured block.
pub const FEATURED_SEPARATORS: [&str; 4] = [" With ", " & ", ", ", " x "];

/// A credit string split into its main and featured artist names.
///
/// Order is preserved and nothing is trimmed or case folded, the split is
/// purely literal. Names that contain a separator substring themselves
/// ("AC/DC") are split incorrectly; that is a known limitation of the
/// literal separator lists, not corrected here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistCredit {
    pub main: Vec<String>,
    pub featured: Option<Vec<String>>,
}

/// Splits free-text artist credit strings like "A Featuring B & C".
///
/// The regexes are compiled once, build one parser per normalization run.
pub struct CreditParser {
    feature_split: Regex,
    main_split: Regex,
    featured_split: Regex,
}

fn alternation(separators: &[&str]) -> Regex {
    let pattern = separators
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).expect("Invalid separator Regex, this should be fixed at compile time.")
}

impl CreditParser {
    pub fn new() -> CreditParser {
        CreditParser {
            feature_split: alternation(&FEATURE_SEPARATORS),
            main_split: alternation(&MAIN_SEPARATORS),
            featured_split: alternation(&FEATURED_SEPARATORS),
        }
    }

    pub fn parse(&self, raw: &str) -> Result<ArtistCredit, MetricsError> {
        let mut blocks = self.feature_split.splitn(raw, 2);
        let main_block = blocks.next().ok_or_else(|| MetricsError::EmptyArtistCredit {
            raw: raw.to_owned(),
        })?;
        let featured_block = blocks.next();

        let main: Vec<String> = self
            .main_split
            .split(main_block)
            .map(str::to_owned)
            .collect();
        if main.is_empty() {
            return Err(MetricsError::EmptyArtistCredit {
                raw: raw.to_owned(),
            });
        }

        let featured = featured_block.map(|block| {
            self.featured_split
                .split(block)
                .map(str::to_owned)
                .collect()
        });

        Ok(ArtistCredit { main, featured })
    }
}

impl Default for CreditParser {
    fn default() -> Self {
        Self::new()
    }
}
