use chrono::{DateTime, Utc};
use diesel::prelude::*;
use recipebox_core::{Recipe, ValidRecipe};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id.into(),
            title: row.title,
            image: row.image,
            ingredients: row.ingredients,
            instructions: row.instructions,
            cooking_time: row.cooking_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub cooking_time: Option<i32>,
}

impl<'a> From<&'a ValidRecipe> for NewRecipe<'a> {
    fn from(recipe: &'a ValidRecipe) -> Self {
        NewRecipe {
            title: &recipe.title,
            image: recipe.image.as_deref(),
            ingredients: &recipe.ingredients,
            instructions: &recipe.instructions,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Full replacement of the mutable columns. `None` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub cooking_time: Option<i32>,
    pub updated_at: DateTime<Utc>,
}
