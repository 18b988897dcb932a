pub mod catalog;
pub mod image;
pub mod providers;
pub mod recommendations;
pub mod reconciler;
pub mod scorer;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use recommendations::{Recommender, Resolution, DEFAULT_LIMIT};
