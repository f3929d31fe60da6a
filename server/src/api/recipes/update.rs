use crate::api::AppError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use recipebox_core::{Envelope, Recipe, RecipeId, RecipePatch};

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipePatch,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Envelope<Recipe>),
        (status = 400, description = "Invalid ID or validation failed", body = Envelope<Recipe>),
        (status = 404, description = "Recipe not found", body = Envelope<Recipe>)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipePatch>, JsonRejection>,
) -> Result<Json<Envelope<Recipe>>, AppError> {
    // A bad id is reported even when the body is also broken
    RecipeId::parse(&id).map_err(|_| AppError::MalformedId)?;
    let Json(patch) = payload?;

    let recipe = state
        .store
        .update_by_id(&id, patch)
        .await
        .map_err(|e| state.store_error("Server error while updating recipe", e))?
        .ok_or(AppError::NotFound)?;

    tracing::info!(recipe_id = %recipe.id, "updated recipe");

    Ok(Json(
        Envelope::data(recipe).with_message("Recipe updated successfully"),
    ))
}
