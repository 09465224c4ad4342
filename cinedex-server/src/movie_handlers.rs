use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use cinedex_core::catalog::{MovieFilters, MovieRelations};
use cinedex_core::domain::{
    MovieDetail, MovieSummary, NewMovie, NewPerson, UNSPECIFIED,
};
use cinedex_core::providers::MovieSearchResult;
use cinedex_core::validate::{
    IMDB_ID_MAX_LEN, validate_duration, validate_imdb_id, validate_title,
};

use crate::{errors::AppResult, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct MovieListQuery {
    /// Case-insensitive substring match on category name.
    pub categories: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieSearchQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportMovieRequest {
    #[serde(default)]
    pub imdb_id: String,
}

/// Administrative direct create. Relation entries are plain names routed
/// through get-or-create, the same normalization the import flow uses.
#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default)]
    pub title: String,
    pub duration: Option<String>,
    pub summary: Option<String>,
    pub poster_url: Option<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub producers: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(query): Query<MovieListQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let movies = state
        .catalog
        .list_movies(MovieFilters {
            category: query.categories,
        })
        .await?;

    info!(count = movies.len(), "Listed movies");
    Ok(Json(movies))
}

pub async fn movie_details_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MovieDetail>> {
    let detail = state.catalog.get_movie(id).await?;
    Ok(Json(detail))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieDetail>)> {
    let imdb_id = request.imdb_id.trim();
    validate_imdb_id(imdb_id, IMDB_ID_MAX_LEN)?;
    validate_title(request.title.trim())?;

    let duration = match request.duration.filter(|d| !d.trim().is_empty()) {
        Some(duration) => {
            validate_duration(&duration)?;
            duration
        }
        None => UNSPECIFIED.to_string(),
    };

    let movie = NewMovie {
        imdb_id: imdb_id.to_string(),
        title: request.title.trim().to_string(),
        duration,
        summary: request
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        poster_url: request.poster_url.unwrap_or_default(),
    };
    let relations = MovieRelations {
        directors: names_to_people(request.directors),
        producers: names_to_people(request.producers),
        actors: names_to_people(request.actors),
        categories: request.categories,
    };

    let detail = state.catalog.create_movie(movie, relations).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn search_movies_handler(
    State(state): State<AppState>,
    Query(query): Query<MovieSearchQuery>,
) -> AppResult<Json<Vec<MovieSearchResult>>> {
    let results = state.importer.search(&query.title).await?;
    Ok(Json(results))
}

pub async fn import_movie_handler(
    State(state): State<AppState>,
    Json(request): Json<ImportMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieDetail>)> {
    let detail = state.importer.add_movie(&request.imdb_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

fn names_to_people(names: Vec<String>) -> Vec<NewPerson> {
    names
        .into_iter()
        .map(|name| NewPerson {
            name,
            imdb_id: None,
        })
        .collect()
}
