use axum::{extract::State, response::Json};

use cinedex_core::domain::Category;

use crate::{errors::AppResult, state::AppState};

pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}
