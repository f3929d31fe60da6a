use async_trait::async_trait;
use chrono::Utc;
use recipebox_core::{Recipe, RecipeId, RecipePatch, ValidRecipe};
use tokio::sync::RwLock;

use super::{merge, next_timestamp, parse_id, RecipeStore, StoreError};

/// In-process gateway with the same contract as the PostgreSQL one.
///
/// Records are kept in insertion order; creation timestamps are strictly
/// increasing, so reverse insertion order is newest first.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    records: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn insert(&self, recipe: ValidRecipe) -> Result<Recipe, StoreError> {
        let mut records = self.records.write().await;

        let created_at = match records.last() {
            Some(last) => next_timestamp(last.created_at),
            None => Utc::now(),
        };

        let stored = Recipe {
            id: RecipeId::new(),
            title: recipe.title,
            image: recipe.image,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            cooking_time: recipe.cooking_time,
            created_at,
            updated_at: created_at,
        };
        records.push(stored.clone());

        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<Recipe> = records.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let mut records = self.records.write().await;

        let Some(current) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let valid = merge(current, &patch)?;
        current.title = valid.title;
        current.image = valid.image;
        current.ingredients = valid.ingredients;
        current.instructions = valid.instructions;
        current.cooking_time = valid.cooking_time;
        current.updated_at = next_timestamp(current.updated_at);

        Ok(Some(current.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let mut records = self.records.write().await;

        let removed = records
            .iter()
            .position(|r| r.id == id)
            .map(|index| records.remove(index));

        Ok(removed)
    }
}
