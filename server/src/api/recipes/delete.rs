use crate::api::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use recipebox_core::{Envelope, Recipe};

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted; the removed record is returned", body = Envelope<Recipe>),
        (status = 400, description = "Invalid recipe ID format", body = Envelope<Recipe>),
        (status = 404, description = "Recipe not found", body = Envelope<Recipe>)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Recipe>>, AppError> {
    let recipe = state
        .store
        .delete_by_id(&id)
        .await
        .map_err(|e| state.store_error("Server error while deleting recipe", e))?
        .ok_or(AppError::NotFound)?;

    tracing::info!(recipe_id = %recipe.id, "deleted recipe");

    Ok(Json(
        Envelope::data(recipe).with_message("Recipe deleted successfully"),
    ))
}
