pub mod catalog;
pub mod categories;
pub mod filters;
pub mod recommender;

pub use catalog::{Catalog, LoadError};
pub use categories::{CategoryMatch, CategoryTable};
pub use recommender::Recommender;
