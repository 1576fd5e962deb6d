use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Movie, MovieId};

/// Columns every catalog file must carry
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "id",
    "title",
    "overview",
    "genres",
    "keywords",
    "tagline",
    "release_date",
];

/// Errors raised while loading catalogs or the category table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog {} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid category table: {0}")]
    Categories(String),
}

/// Raw CSV row; every text column except `id` may be blank
#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: i64,
    title: Option<String>,
    overview: Option<String>,
    genres: Option<String>,
    keywords: Option<String>,
    tagline: Option<String>,
    release_date: Option<String>,
}

impl From<CatalogRow> for Movie {
    fn from(row: CatalogRow) -> Self {
        Movie::new(
            MovieId(row.id),
            row.title.unwrap_or_default(),
            row.overview.unwrap_or_default(),
            row.genres.unwrap_or_default(),
            row.keywords.unwrap_or_default(),
            row.tagline.unwrap_or_default(),
            row.release_date.unwrap_or_default(),
        )
    }
}

/// Immutable, ordered collection of movies
///
/// Ids are unique: when a source repeats an id, the first record wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Builds a catalog from records already in memory
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut seen = HashSet::with_capacity(movies.len());
        let total = movies.len();
        let movies: Vec<Movie> = movies.into_iter().filter(|m| seen.insert(m.id)).collect();

        if movies.len() < total {
            tracing::warn!(
                dropped = total - movies.len(),
                "Dropped catalog records with duplicate ids"
            );
        }

        Self { movies }
    }

    /// Loads a catalog from a CSV file with a header row
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(file, path)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    /// Parses CSV from any reader; `origin` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Self, LoadError> {
        let origin = origin.as_ref();
        let csv_error = |source: csv::Error| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(LoadError::MissingColumn {
                    path: origin.to_path_buf(),
                    column,
                });
            }
        }

        let movies = reader
            .deserialize::<CatalogRow>()
            .map(|row| row.map(Movie::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        Ok(Self::from_movies(movies))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
