use async_trait::async_trait;
use diesel::prelude::*;
use recipebox_core::{Recipe, RecipePatch, ValidRecipe};

use super::{merge, next_timestamp, parse_id, RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, RecipeChanges, RecipeRow};
use crate::schema::recipes;

/// PostgreSQL gateway. Diesel is synchronous, so every query runs on the
/// blocking thread pool with its own pooled connection.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, recipe: ValidRecipe) -> Result<Recipe, StoreError> {
        self.run(move |conn| {
            let row: RecipeRow = diesel::insert_into(recipes::table)
                .values(NewRecipe::from(&recipe))
                .returning(RecipeRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    /// `created_at` comes from `clock_timestamp()`, so rows inserted one
    /// after another differ; a tie within the same microsecond falls back to
    /// the (random) id.
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        self.run(|conn| {
            let rows: Vec<RecipeRow> = recipes::table
                .order((recipes::created_at.desc(), recipes::id.desc()))
                .select(RecipeRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Recipe::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?.as_uuid();
        self.run(move |conn| {
            let row: Option<RecipeRow> = recipes::table
                .find(id)
                .select(RecipeRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Recipe::from))
        })
        .await
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?.as_uuid();
        self.run(move |conn| {
            conn.transaction::<_, StoreError, _>(|conn| {
                let current: Option<RecipeRow> = recipes::table
                    .find(id)
                    .select(RecipeRow::as_select())
                    .for_update()
                    .first(conn)
                    .optional()?;
                let Some(current) = current else {
                    return Ok(None);
                };
                let current = Recipe::from(current);

                let valid = merge(&current, &patch)?;
                let changes = RecipeChanges {
                    title: &valid.title,
                    image: valid.image.as_deref(),
                    ingredients: &valid.ingredients,
                    instructions: &valid.instructions,
                    cooking_time: valid.cooking_time,
                    updated_at: next_timestamp(current.updated_at),
                };

                let row: RecipeRow = diesel::update(recipes::table.find(id))
                    .set(&changes)
                    .returning(RecipeRow::as_returning())
                    .get_result(conn)?;
                Ok(Some(row.into()))
            })
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?.as_uuid();
        self.run(move |conn| {
            let row: Option<RecipeRow> = diesel::delete(recipes::table.find(id))
                .returning(RecipeRow::as_returning())
                .get_result(conn)
                .optional()?;
            Ok(row.map(Recipe::from))
        })
        .await
    }
}
