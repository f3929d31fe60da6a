use std::sync::Arc;

use recipebox_core::{ClientError, RecipeApi, RecipeClient, RecipeDraft, RecipePatch};
use recipebox_server::store::MemoryRecipeStore;
use recipebox_server::{app, cors_layer, AppState};
use serde_json::json;

const MISSING_ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

/// Serve the app with an in-memory store on an ephemeral port.
async fn spawn_server() -> RecipeClient {
    let state = AppState::new(Arc::new(MemoryRecipeStore::new()), false);
    let app = app(state, cors_layer("http://localhost:5173").unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    RecipeClient::new(format!("http://{}/api", addr)).unwrap()
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: Some(title.to_string()),
        ingredients: Some(vec!["bread".to_string(), "butter".to_string()]),
        instructions: Some("Toast and spread".to_string()),
        cooking_time: Some(json!(5)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_full_lifecycle() {
    let client = spawn_server().await;

    let created = client.create_recipe(&draft("Buttered toast")).await.unwrap();
    assert_eq!(created.cooking_time, Some(5));

    let id = created.id.to_string();
    let fetched = client.get_recipe(&id).await.unwrap();
    assert_eq!(fetched, created);

    let patch = RecipePatch {
        title: Some("Cinnamon toast".to_string()),
        ..Default::default()
    };
    let updated = client.update_recipe(&id, &patch).await.unwrap();
    assert_eq!(updated.title, "Cinnamon toast");
    assert!(updated.updated_at > created.updated_at);

    let listed = client.list_recipes().await.unwrap();
    assert_eq!(listed, vec![updated.clone()]);

    let deleted = client.delete_recipe(&id).await.unwrap();
    assert_eq!(deleted, updated);

    let err = client.get_recipe(&id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Recipe not found");
}

#[tokio::test]
async fn test_validation_errors_are_joined() {
    let client = spawn_server().await;

    let err = client
        .create_recipe(&RecipeDraft {
            title: Some(String::new()),
            ingredients: Some(vec![]),
            instructions: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match &err {
        ClientError::Rejected { status, errors, .. } => {
            assert_eq!(*status, 400);
            assert_eq!(errors.len(), 3);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Recipe title is required, Recipe must have at least one ingredient, Cooking instructions are required"
    );
}

#[tokio::test]
async fn test_envelope_message_when_no_field_errors() {
    let client = spawn_server().await;

    let err = client.get_recipe("not-an-id").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid recipe ID format");

    let patch = RecipePatch {
        title: Some("X".to_string()),
        ..Default::default()
    };
    let err = client.update_recipe(MISSING_ID, &patch).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_ids_with_url_delimiters_are_rejected_as_malformed() {
    let client = spawn_server().await;
    let created = client.create_recipe(&draft("Toast")).await.unwrap();
    let id = created.id.to_string();

    let malformed = [
        format!("{id}?junk"),
        format!("{id}#x"),
        format!("{id}/extra"),
        "a/b".to_string(),
        "..".to_string(),
    ];
    for bad in &malformed {
        let err = client.get_recipe(bad).await.unwrap_err();
        assert_eq!(err.status(), Some(400), "get {bad:?}");
        assert_eq!(err.to_string(), "Invalid recipe ID format");

        let err = client.delete_recipe(bad).await.unwrap_err();
        assert_eq!(err.status(), Some(400), "delete {bad:?}");

        let patch = RecipePatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = client.update_recipe(bad, &patch).await.unwrap_err();
        assert_eq!(err.status(), Some(400), "update {bad:?}");
    }

    let still_there = client.get_recipe(&id).await.unwrap();
    assert_eq!(still_there, created);
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RecipeClient::new(format!("http://{}/api", addr)).unwrap();
    let err = client.create_recipe(&draft("Toast")).await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable));
    assert_eq!(
        err.to_string(),
        "Unable to connect to server. Please check your connection."
    );
}
