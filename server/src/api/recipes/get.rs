use crate::api::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use recipebox_core::{Envelope, Recipe};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Envelope<Recipe>),
        (status = 400, description = "Invalid recipe ID format", body = Envelope<Recipe>),
        (status = 404, description = "Recipe not found", body = Envelope<Recipe>)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Recipe>>, AppError> {
    state
        .store
        .find_by_id(&id)
        .await
        .map_err(|e| state.store_error("Server error while fetching recipe", e))?
        .map(|recipe| Json(Envelope::data(recipe)))
        .ok_or(AppError::NotFound)
}
