//! Filter pipeline
//!
//! Each stage keeps the records that satisfy one criterion and passes the
//! survivors to the next. Stages never reorder or copy records, so the
//! output is always an ordered subset of the starting catalog.

use crate::models::{Age, FilterCriteria, Mood, Movie, Occasion};

use super::catalog::Catalog;
use super::categories::{CategoryMatch, CategoryTable};

/// Unanchored, case-sensitive substring OR
fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_ref()))
}

/// Applies every active filter in order and returns the surviving records
pub fn filter_movies<'a>(
    primary: &'a Catalog,
    top_rated: &'a Catalog,
    categories: &CategoryTable,
    criteria: &FilterCriteria,
) -> Vec<&'a Movie> {
    let mut movies = match categories.resolve(&criteria.categories) {
        CategoryMatch::Unfiltered => primary.movies().iter().collect(),
        CategoryMatch::TopRated => top_rated.movies().iter().collect(),
        CategoryMatch::Keywords(keywords) => {
            let mut movies: Vec<&Movie> = primary.movies().iter().collect();
            by_overview_keywords(&mut movies, &keywords);
            movies
        }
    };

    if let Some(mood) = criteria.mood {
        by_mood(&mut movies, mood);
    }
    by_genres(&mut movies, &criteria.genres);
    if let Some(occasion) = criteria.occasion {
        by_occasion(&mut movies, occasion);
    }
    if let Some(age) = criteria.age {
        by_age(&mut movies, age);
    }

    movies
}

/// Keeps records whose overview mentions any keyword; blank overviews never match
pub fn by_overview_keywords<S: AsRef<str>>(movies: &mut Vec<&Movie>, keywords: &[S]) {
    movies.retain(|m| !m.overview.is_empty() && contains_any(&m.overview, keywords));
}

pub fn by_mood(movies: &mut Vec<&Movie>, mood: Mood) {
    movies.retain(|m| contains_any(&m.genres, mood.genres()));
}

/// Keeps records tagged with any of the listed genres; an empty list keeps everything
pub fn by_genres<S: AsRef<str>>(movies: &mut Vec<&Movie>, genres: &[S]) {
    if genres.is_empty() {
        return;
    }
    movies.retain(|m| contains_any(&m.genres, genres));
}

pub fn by_occasion(movies: &mut Vec<&Movie>, occasion: Occasion) {
    movies.retain(|m| contains_any(&m.genres, occasion.genres()));
}

/// Keeps records released in or after the bucket's threshold year
///
/// Records without a parseable release year are dropped.
pub fn by_age(movies: &mut Vec<&Movie>, age: Age) {
    let min_year = age.min_year();
    movies.retain(|m| m.release_year.is_some_and(|year| year >= min_year));
}
