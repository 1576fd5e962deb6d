use serde::{ser::SerializeSeq, Deserialize, Serialize, Serializer};
use std::fmt::Display;

pub mod criteria;

pub use criteria::{Age, CategorySelection, FilterCriteria, Mood, Occasion};

/// Text returned in place of an empty recommendation list
pub const NO_RECOMMENDATIONS: &str =
    "No recommendations available based on the selected criteria.";

/// Catalog identifier of a movie (TMDB id in the shipped CSV files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog record
///
/// Optional text columns are normalized to empty strings at load time, so
/// filters never have to distinguish "missing" from "empty".
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    /// Delimited genre list as it appears in the source (e.g. "Action|Comedy")
    pub genres: String,
    pub keywords: String,
    pub tagline: String,
    /// Raw release date text (e.g. "2009-12-10" or "2009")
    pub release_date: String,
    /// Year parsed from `release_date`, if it had one
    pub release_year: Option<i32>,
    /// overview + genres + keywords + tagline, space separated
    pub combined_features: String,
}

impl Movie {
    /// Builds a record, deriving `release_year` and `combined_features`
    pub fn new(
        id: MovieId,
        title: String,
        overview: String,
        genres: String,
        keywords: String,
        tagline: String,
        release_date: String,
    ) -> Self {
        let combined_features = format!("{} {} {} {}", overview, genres, keywords, tagline);
        let release_year = parse_release_year(&release_date);

        Self {
            id,
            title,
            overview,
            genres,
            keywords,
            tagline,
            release_date,
            release_year,
            combined_features,
        }
    }
}

/// Extracts the year from a release date
///
/// Accepts full ISO dates ("2021-03-01") and bare years ("2021").
/// Anything else yields `None`.
pub fn parse_release_year(raw: &str) -> Option<i32> {
    use chrono::Datelike;

    let raw = raw.trim();
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }

    let prefix = raw.get(..4)?;
    let rest = &raw[4..];
    if prefix.bytes().all(|b| b.is_ascii_digit()) && (rest.is_empty() || rest.starts_with('-')) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Outcome of a recommendation request
///
/// Serializes to a JSON array: the sampled ids, or a single-element array
/// holding [`NO_RECOMMENDATIONS`] when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Movies(Vec<MovieId>),
    NoneAvailable,
}

impl Recommendation {
    /// Sampled ids; empty for the sentinel
    pub fn ids(&self) -> &[MovieId] {
        match self {
            Recommendation::Movies(ids) => ids,
            Recommendation::NoneAvailable => &[],
        }
    }

    pub fn is_none_available(&self) -> bool {
        matches!(self, Recommendation::NoneAvailable)
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recommendation::Movies(ids) => ids.serialize(serializer),
            Recommendation::NoneAvailable => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(NO_RECOMMENDATIONS)?;
                seq.end()
            }
        }
    }
}
