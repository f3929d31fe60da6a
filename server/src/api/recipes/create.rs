use crate::api::AppError;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use recipebox_core::{validate, Envelope, Recipe, RecipeDraft};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeDraft,
    responses(
        (status = 201, description = "Recipe created successfully", body = Envelope<Recipe>),
        (status = 400, description = "Missing fields or validation failed", body = Envelope<Recipe>),
        (status = 500, description = "Server error while creating recipe", body = Envelope<Recipe>)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Recipe>>), AppError> {
    let Json(draft) = payload?;

    if !draft.has_required_fields() {
        return Err(AppError::BadRequest(
            "Please provide title, ingredients, and instructions".to_string(),
        ));
    }

    let recipe = validate(&draft).map_err(AppError::Validation)?;

    let recipe = state
        .store
        .insert(recipe)
        .await
        .map_err(|e| state.store_error("Server error while creating recipe", e))?;

    tracing::info!(recipe_id = %recipe.id, "created recipe");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(recipe).with_message("Recipe created successfully")),
    ))
}
