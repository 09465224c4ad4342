//! Movie import: provider search and add-by-identifier with
//! get-or-create normalization of related entities.

use std::sync::Arc;

use tracing::info;

use crate::catalog::ports::{CatalogRepository, MovieRelations};
use crate::domain::{MovieDetail, NewMovie, NewPerson, UNSPECIFIED};
use crate::error::{CatalogError, Result};
use crate::providers::{
    DEFAULT_SEARCH_LIMIT, MetadataProvider, MovieSearchResult, PersonCredit,
};
use crate::validate::{
    IMPORT_IMDB_ID_MAX_LEN, MSG_MOVIE_ALREADY_PRESENT, MSG_SEARCH_TITLE_BLANK,
    format_runtime, validate_imdb_id,
};

#[derive(Clone)]
pub struct MovieImportService {
    catalog: Arc<dyn CatalogRepository>,
    provider: Arc<dyn MetadataProvider>,
}

impl std::fmt::Debug for MovieImportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieImportService").finish_non_exhaustive()
    }
}

impl MovieImportService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self { catalog, provider }
    }

    /// Search the provider for titles matching `title`.
    pub async fn search(&self, title: &str) -> Result<Vec<MovieSearchResult>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::Validation(
                MSG_SEARCH_TITLE_BLANK.to_string(),
            ));
        }

        let results = self
            .provider
            .search_movies(title, DEFAULT_SEARCH_LIMIT)
            .await?;
        info!(title, count = results.len(), "Provider search complete");
        Ok(results)
    }

    /// Import one movie by IMDb identifier.
    ///
    /// Fails with a validation error when the identifier is malformed or
    /// the movie is already cataloged; related people and categories are
    /// fetched-or-created so repeated imports never duplicate rows.
    pub async fn add_movie(&self, imdb_id: &str) -> Result<MovieDetail> {
        let imdb_id = imdb_id.trim();
        validate_imdb_id(imdb_id, IMPORT_IMDB_ID_MAX_LEN)?;

        if self.catalog.movie_exists(imdb_id).await? {
            return Err(CatalogError::AlreadyExists(
                MSG_MOVIE_ALREADY_PRESENT.to_string(),
            ));
        }

        let metadata = self.provider.get_movie_details(imdb_id).await?;

        let movie = NewMovie {
            imdb_id: imdb_id.to_string(),
            title: metadata.title,
            duration: format_runtime(metadata.runtime_minutes),
            summary: metadata
                .plot
                .filter(|plot| !plot.trim().is_empty())
                .unwrap_or_else(|| UNSPECIFIED.to_string()),
            poster_url: metadata.poster_url.unwrap_or_default(),
        };
        let relations = MovieRelations {
            directors: credits_to_people(metadata.directors),
            producers: credits_to_people(metadata.producers),
            actors: credits_to_people(metadata.actors),
            categories: metadata.genres,
        };

        let detail = self.catalog.create_movie(movie, relations).await?;
        info!(imdb_id, title = %detail.movie.title, "Imported movie");
        Ok(detail)
    }
}

fn credits_to_people(credits: Vec<PersonCredit>) -> Vec<NewPerson> {
    credits
        .into_iter()
        .map(|credit| NewPerson {
            name: credit.name,
            imdb_id: credit.imdb_id,
        })
        .collect()
}
