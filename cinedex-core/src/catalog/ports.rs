//! Repository port for the catalog. The Postgres implementation lives in
//! [`crate::catalog::postgres`]; tests use the generated mock.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, MovieDetail, MovieSummary, NewMovie, NewPerson};
use crate::error::Result;

/// Optional filters for the movie list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilters {
    /// Case-insensitive substring match on category name.
    pub category: Option<String>,
}

/// Related entities to attach when creating a movie. Every entry goes
/// through get-or-create so repeated imports reuse existing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRelations {
    pub directors: Vec<NewPerson>,
    pub producers: Vec<NewPerson>,
    pub actors: Vec<NewPerson>,
    pub categories: Vec<String>,
}

#[mockall::automock]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List movies ordered by title, optionally filtered by category.
    async fn list_movies(
        &self,
        filters: MovieFilters,
    ) -> Result<Vec<MovieSummary>>;

    /// Fetch one movie with all four relation lists.
    async fn get_movie(&self, id: Uuid) -> Result<MovieDetail>;

    /// Whether a movie with this IMDb identifier is already cataloged.
    async fn movie_exists(&self, imdb_id: &str) -> Result<bool>;

    /// Insert a movie and attach its relations in one transaction.
    async fn create_movie(
        &self,
        movie: NewMovie,
        relations: MovieRelations,
    ) -> Result<MovieDetail>;

    /// List all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>>;
}
