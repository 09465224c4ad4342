use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    category_handlers::list_categories_handler,
    movie_handlers::{
        create_movie_handler, import_movie_handler, list_movies_handler,
        movie_details_handler, search_movies_handler,
    },
    state::AppState,
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(list_movies_handler).post(create_movie_handler),
        )
        .route("/movies/search", get(search_movies_handler))
        .route("/movies/import", post(import_movie_handler))
        .route("/movies/{id}", get(movie_details_handler))
        .route("/categories", get(list_categories_handler))
}
