//! Metadata-provider port and adapters.
//!
//! The catalog never talks to IMDb directly; it goes through
//! [`MetadataProvider`] so the import flow stays testable and the
//! concrete REST adapter stays replaceable.

mod imdb_api_provider;

pub use imdb_api_provider::{DEFAULT_API_BASE, ImdbApiProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How many search results a title search returns at most.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One hit from a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSearchResult {
    pub imdb_id: String,
    pub title: String,
    pub poster_url: String,
}

/// A credited person as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonCredit {
    pub name: String,
    pub imdb_id: Option<String>,
}

/// Everything the import flow needs to materialize a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieMetadata {
    pub imdb_id: String,
    pub title: String,
    pub runtime_minutes: Option<u32>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
    pub directors: Vec<PersonCredit>,
    pub producers: Vec<PersonCredit>,
    pub actors: Vec<PersonCredit>,
}

#[mockall::automock]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title, capped at `limit` results.
    async fn search_movies(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieSearchResult>, ProviderError>;

    /// Fetch full details and credits for one title.
    async fn get_movie_details(
        &self,
        imdb_id: &str,
    ) -> Result<MovieMetadata, ProviderError>;
}
