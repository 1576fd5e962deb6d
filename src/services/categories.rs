use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::catalog::LoadError;

/// Category table shipped with the binary
const BUILTIN_TABLE: &str = include_str!("../../data/categories.json");

#[derive(Debug, Deserialize)]
struct TableFile {
    top_rated: String,
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoryEntry {
    name: String,
    keywords: Vec<String>,
}

/// How a set of requested categories narrows the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryMatch<'a> {
    /// No recognized category was requested
    Unfiltered,
    /// Swap to the top-rated catalog; no keyword test
    TopRated,
    /// Keep records whose overview contains any of these substrings
    Keywords(Vec<&'a str>),
}

/// Mapping from thematic category name to its keyword alternation
#[derive(Debug, Clone)]
pub struct CategoryTable {
    top_rated: String,
    entries: Vec<CategoryEntry>,
}

impl CategoryTable {
    /// The table embedded in the binary
    pub fn builtin() -> Result<Self, LoadError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Reads a table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            categories = table.entries.len(),
            "Loaded category table"
        );

        Ok(table)
    }

    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let file: TableFile =
            serde_json::from_str(raw).map_err(|e| LoadError::Categories(e.to_string()))?;

        if file.top_rated.is_empty() {
            return Err(LoadError::Categories(
                "top-rated category name is empty".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for entry in &file.categories {
            if entry.name == file.top_rated {
                return Err(LoadError::Categories(format!(
                    "'{}' is reserved for the top-rated catalog",
                    entry.name
                )));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(LoadError::Categories(format!(
                    "duplicate category '{}'",
                    entry.name
                )));
            }
            if entry.keywords.is_empty() || entry.keywords.iter().any(|k| k.is_empty()) {
                return Err(LoadError::Categories(format!(
                    "category '{}' needs non-empty keywords",
                    entry.name
                )));
            }
        }

        Ok(Self {
            top_rated: file.top_rated,
            entries: file.categories,
        })
    }

    /// Name of the sentinel category that selects the top-rated catalog
    pub fn top_rated_name(&self) -> &str {
        &self.top_rated
    }

    /// Keyword category names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Keyword alternatives for a single category
    pub fn keywords(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.keywords.as_slice())
    }

    /// Resolves requested category names
    ///
    /// The top-rated sentinel anywhere in the list wins. Otherwise the
    /// keyword lists of all recognized names are unioned; unknown names
    /// are ignored.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> CategoryMatch<'_> {
        if requested.iter().any(|n| n.as_ref() == self.top_rated) {
            return CategoryMatch::TopRated;
        }

        let mut keywords: Vec<&str> = Vec::new();
        for name in requested {
            match self.keywords(name.as_ref()) {
                Some(list) => {
                    for keyword in list {
                        if !keywords.contains(&keyword.as_str()) {
                            keywords.push(keyword);
                        }
                    }
                }
                None => tracing::debug!(category = %name.as_ref(), "Ignoring unknown category"),
            }
        }

        if keywords.is_empty() {
            CategoryMatch::Unfiltered
        } else {
            CategoryMatch::Keywords(keywords)
        }
    }
}
