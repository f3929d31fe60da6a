//! HTTP client for the recipe API.
//!
//! Every call returns the unwrapped `data` payload or a [`ClientError`] that
//! tells apart a server rejection, an unreachable server and anything else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::envelope::Envelope;
use crate::error::ClientError;
use crate::types::{Recipe, RecipeDraft, RecipePatch};

/// Requests that take longer than this fail as unreachable.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The five recipe operations, as seen by a consumer of the API.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError>;

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ClientError>;

    async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, ClientError>;

    async fn update_recipe(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ClientError>;

    async fn delete_recipe(&self, id: &str) -> Result<Recipe, ClientError>;
}

/// reqwest-backed [`RecipeApi`].
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecipeClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Unexpected(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// The id travels as one percent-encoded path segment, so `?`, `#` and
    /// `/` inside it reach the server as part of the id.
    fn recipe_path(id: &str) -> Result<String, ClientError> {
        let id = id.trim();
        // URL parsing collapses dot segments (encoded or not) and an empty
        // segment would address the collection
        if id.is_empty() || id.chars().all(|c| c == '.') {
            return Err(ClientError::malformed_id());
        }
        Ok(format!("/recipes/{}", urlencoding::encode(id)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "request failed before a response arrived");
            ClientError::from_transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        if !status.is_success() {
            let envelope = serde_json::from_slice::<Envelope<serde_json::Value>>(&body).ok();
            let err = ClientError::rejected(status.as_u16(), envelope);
            tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
            return Err(err);
        }

        tracing::debug!(status = status.as_u16(), "request completed");
        serde_json::from_slice(&body).map_err(|e| ClientError::Unexpected(e.to_string()))
    }

    async fn send_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.send::<T>(request)
            .await?
            .data
            .ok_or_else(|| ClientError::Unexpected("Response did not include data".to_string()))
    }
}

#[async_trait]
impl RecipeApi for RecipeClient {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        self.send_data(self.request(Method::GET, "/recipes")).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
        self.send_data(self.request(Method::GET, &Self::recipe_path(id)?))
            .await
    }

    async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, ClientError> {
        let request = self.request(Method::POST, "/recipes").json(draft);
        self.send_data(request).await
    }

    async fn update_recipe(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ClientError> {
        let request = self.request(Method::PUT, &Self::recipe_path(id)?).json(patch);
        self.send_data(request).await
    }

    async fn delete_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
        self.send_data(self.request(Method::DELETE, &Self::recipe_path(id)?))
            .await
    }
}
