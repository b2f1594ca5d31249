mod client;
mod error;
pub mod models;
mod query;
mod search;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use models::{PaginatedResponse, SearchResult};
pub use query::clean_search_query;

pub type Result<T> = std::result::Result<T, TmdbError>;
