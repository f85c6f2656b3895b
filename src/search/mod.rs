pub mod cache;
pub mod executor;

pub use cache::{CacheStats, QueryCache};
pub use executor::SearchEngine;
