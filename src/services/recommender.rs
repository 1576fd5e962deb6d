use rand::{seq::SliceRandom, Rng};

use crate::models::{FilterCriteria, Movie, Recommendation};

use super::catalog::Catalog;
use super::categories::CategoryTable;
use super::filters::filter_movies;

/// Default number of ids returned per request
pub const DEFAULT_RECOMMENDATIONS: usize = 30;

/// Only the first this-many filtered records (catalog order) are sampled
pub const DEFAULT_CANDIDATE_CAP: usize = 500;

/// Filtering and sampling over two immutable catalogs
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    primary: Catalog,
    top_rated: Catalog,
    categories: CategoryTable,
    candidate_cap: usize,
}

impl Recommender {
    pub fn new(primary: Catalog, top_rated: Catalog, categories: CategoryTable) -> Self {
        Self {
            primary,
            top_rated,
            categories,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
        }
    }

    pub fn with_candidate_cap(mut self, candidate_cap: usize) -> Self {
        self.candidate_cap = candidate_cap;
        self
    }

    pub fn primary(&self) -> &Catalog {
        &self.primary
    }

    pub fn top_rated(&self) -> &Catalog {
        &self.top_rated
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Records eligible for sampling: the filtered set, capped in catalog order
    pub fn candidates(&self, criteria: &FilterCriteria) -> Vec<&Movie> {
        let mut matches =
            filter_movies(&self.primary, &self.top_rated, &self.categories, criteria);

        let matched = matches.len();
        matches.truncate(self.candidate_cap);

        tracing::debug!(matched, candidates = matches.len(), "Filtered catalog");
        matches
    }

    /// Samples up to `count` ids from the records matching `criteria`
    ///
    /// The matching set is truncated to the candidate cap before sampling.
    /// Ids are drawn uniformly without replacement; an empty candidate set
    /// yields [`Recommendation::NoneAvailable`].
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        criteria: &FilterCriteria,
        count: usize,
        rng: &mut R,
    ) -> Recommendation {
        let candidates = self.candidates(criteria);

        if candidates.is_empty() {
            tracing::debug!("No movies matched the filter criteria");
            return Recommendation::NoneAvailable;
        }

        let ids: Vec<_> = candidates
            .choose_multiple(rng, count.min(candidates.len()))
            .map(|m| m.id)
            .collect();

        tracing::debug!(sampled = ids.len(), "Sampled recommendations");

        Recommendation::Movies(ids)
    }
}
