use crate::api::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use recipebox_core::{Envelope, Recipe};

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = Envelope<Vec<Recipe>>),
        (status = 500, description = "Server error while fetching recipes", body = Envelope<Recipe>)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Recipe>>>, AppError> {
    let recipes = state
        .store
        .find_all()
        .await
        .map_err(|e| state.store_error("Server error while fetching recipes", e))?;

    let count = recipes.len();
    Ok(Json(Envelope::data(recipes).with_count(count)))
}
