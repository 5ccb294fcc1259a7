// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheKey, CacheStats, CatalogCache};
pub use catalog::{CatalogClient, CatalogError};
