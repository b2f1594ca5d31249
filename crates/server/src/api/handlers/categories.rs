use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::Category;
use crate::repositories::CategoryRepository;
use crate::state::AppState;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepository::get_all(&state.db).await?;
    Ok(Json(categories))
}
