use std::io::Write;

use anyhow::{bail, Result};
use recipebox_core::{Recipe, RecipeApi};

use crate::form::{describe_errors, FormArgs, RecipeForm};

pub fn format_minutes(minutes: i32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

fn summary_line(recipe: &Recipe) -> String {
    let ingredients = recipe.ingredients.len();
    let plural = if ingredients == 1 { "" } else { "s" };
    match recipe.cooking_time {
        Some(minutes) => format!(
            "{}  {}  ({}, {} ingredient{})",
            recipe.id,
            recipe.title,
            format_minutes(minutes),
            ingredients,
            plural
        ),
        None => format!(
            "{}  {}  ({} ingredient{})",
            recipe.id, recipe.title, ingredients, plural
        ),
    }
}

pub async fn list(api: &dyn RecipeApi, out: &mut dyn Write) -> Result<()> {
    let recipes = api.list_recipes().await?;

    if recipes.is_empty() {
        writeln!(out, "No recipes yet. Add one with `recipebox add`.")?;
        return Ok(());
    }

    writeln!(out, "{} recipe(s), newest first:", recipes.len())?;
    for recipe in &recipes {
        writeln!(out, "{}", summary_line(recipe))?;
    }
    Ok(())
}

pub fn render_recipe(recipe: &Recipe, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", recipe.title)?;
    writeln!(out, "{}", "=".repeat(recipe.title.chars().count()))?;
    writeln!(out, "ID: {}", recipe.id)?;
    if let Some(minutes) = recipe.cooking_time {
        writeln!(out, "Cooking time: {}", format_minutes(minutes))?;
    }
    if let Some(image) = &recipe.image {
        writeln!(out, "Image: {}", image)?;
    }
    writeln!(out)?;
    writeln!(out, "Ingredients:")?;
    for ingredient in &recipe.ingredients {
        writeln!(out, "  - {}", ingredient)?;
    }
    writeln!(out)?;
    writeln!(out, "Instructions:")?;
    for line in recipe.instructions.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Created {}, last updated {}",
        recipe.created_at.format("%Y-%m-%d %H:%M"),
        recipe.updated_at.format("%Y-%m-%d %H:%M")
    )?;
    Ok(())
}

pub async fn show(api: &dyn RecipeApi, id: &str, out: &mut dyn Write) -> Result<()> {
    let recipe = api.get_recipe(id).await?;
    render_recipe(&recipe, out)
}

pub async fn add(api: &dyn RecipeApi, args: &FormArgs, out: &mut dyn Write) -> Result<Recipe> {
    let mut form = RecipeForm::default();
    form.apply(args);

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => bail!("Recipe not saved:\n{}", describe_errors(&errors)),
    };

    let recipe = api.create_recipe(&draft).await?;
    writeln!(out, "Created \"{}\" ({})", recipe.title, recipe.id)?;
    Ok(recipe)
}

pub async fn edit(
    api: &dyn RecipeApi,
    id: &str,
    args: &FormArgs,
    out: &mut dyn Write,
) -> Result<Recipe> {
    let original = api.get_recipe(id).await?;

    let mut form = RecipeForm::from_recipe(&original);
    form.apply(args);

    let patch = match form.to_patch(&original) {
        Ok(patch) => patch,
        Err(errors) => bail!("Recipe not saved:\n{}", describe_errors(&errors)),
    };

    if patch.is_empty() {
        writeln!(out, "Nothing to change for \"{}\"", original.title)?;
        return Ok(original);
    }

    let recipe = api.update_recipe(id, &patch).await?;
    writeln!(out, "Updated \"{}\" ({})", recipe.title, recipe.id)?;
    Ok(recipe)
}

/// Delete after `confirm` agrees; the recipe is fetched first so the
/// prompt can name it.
pub async fn delete<F>(
    api: &dyn RecipeApi,
    id: &str,
    confirm: F,
    out: &mut dyn Write,
) -> Result<Option<Recipe>>
where
    F: FnOnce(&Recipe) -> Result<bool>,
{
    let recipe = api.get_recipe(id).await?;

    if !confirm(&recipe)? {
        writeln!(out, "Kept \"{}\"", recipe.title)?;
        return Ok(None);
    }

    let deleted = api.delete_recipe(id).await?;
    writeln!(out, "Deleted \"{}\"", deleted.title)?;
    Ok(Some(deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use recipebox_core::{
        validate, ClientError, RecipeDraft, RecipeId, RecipePatch,
    };
    use std::sync::Mutex;

    /// In-process stand-in for the HTTP client.
    #[derive(Default)]
    struct FakeApi {
        recipes: Mutex<Vec<Recipe>>,
        patches: Mutex<Vec<RecipePatch>>,
    }

    impl FakeApi {
        fn with(recipes: Vec<Recipe>) -> Self {
            Self {
                recipes: Mutex::new(recipes),
                ..Default::default()
            }
        }

        fn find(&self, id: &str) -> Result<Recipe, ClientError> {
            self.recipes
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id.to_string() == id)
                .cloned()
                .ok_or(ClientError::Rejected {
                    status: 404,
                    message: "Recipe not found".to_string(),
                    errors: vec![],
                })
        }
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
            Ok(self.recipes.lock().unwrap().iter().rev().cloned().collect())
        }

        async fn get_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
            self.find(id)
        }

        async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, ClientError> {
            let valid = validate(draft).map_err(|e| ClientError::Rejected {
                status: 400,
                message: e.to_string(),
                errors: e.messages(),
            })?;
            let now = Utc::now();
            let recipe = Recipe {
                id: RecipeId::new(),
                title: valid.title,
                image: valid.image,
                ingredients: valid.ingredients,
                instructions: valid.instructions,
                cooking_time: valid.cooking_time,
                created_at: now,
                updated_at: now,
            };
            self.recipes.lock().unwrap().push(recipe.clone());
            Ok(recipe)
        }

        async fn update_recipe(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ClientError> {
            let current = self.find(id)?;
            self.patches.lock().unwrap().push(patch.clone());
            let valid = validate(&patch.apply_to(&current))
                .map_err(|e| ClientError::Unexpected(e.to_string()))?;
            let updated = Recipe {
                title: valid.title,
                image: valid.image,
                ingredients: valid.ingredients,
                instructions: valid.instructions,
                cooking_time: valid.cooking_time,
                updated_at: Utc::now(),
                ..current
            };
            let mut recipes = self.recipes.lock().unwrap();
            if let Some(slot) = recipes.iter_mut().find(|r| r.id == updated.id) {
                *slot = updated.clone();
            }
            Ok(updated)
        }

        async fn delete_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
            let recipe = self.find(id)?;
            self.recipes.lock().unwrap().retain(|r| r.id != recipe.id);
            Ok(recipe)
        }
    }

    fn recipe(title: &str, cooking_time: Option<i32>) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: RecipeId::new(),
            title: title.to_string(),
            image: None,
            ingredients: vec!["water".to_string()],
            instructions: "Boil".to_string(),
            cooking_time,
            created_at: now,
            updated_at: now,
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(60), "1 h");
        assert_eq!(format_minutes(95), "1 h 35 min");
        assert_eq!(format_minutes(1440), "24 h");
    }

    #[tokio::test]
    async fn test_list_empty_state() {
        let api = FakeApi::default();
        let mut out = Vec::new();
        list(&api, &mut out).await.unwrap();
        assert!(output(out).starts_with("No recipes yet"));
    }

    #[tokio::test]
    async fn test_list_shows_newest_first() {
        let api = FakeApi::with(vec![recipe("Old", None), recipe("New", Some(30))]);
        let mut out = Vec::new();
        list(&api, &mut out).await.unwrap();

        let text = output(out);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "2 recipe(s), newest first:");
        assert!(lines[1].contains("New") && lines[1].contains("30 min"));
        assert!(lines[2].contains("Old"));
    }

    #[tokio::test]
    async fn test_add_validates_before_sending() {
        let api = FakeApi::default();
        let mut out = Vec::new();
        let err = add(&api, &FormArgs::default(), &mut out).await.unwrap_err();

        assert!(err.to_string().contains("Recipe title is required"));
        assert!(api.recipes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_creates_recipe() {
        let api = FakeApi::default();
        let mut out = Vec::new();
        let args = FormArgs {
            title: Some("Tea".to_string()),
            ingredients: vec!["water".to_string(), "tea leaves".to_string()],
            instructions: Some("Steep".to_string()),
            cooking_time: Some("5".to_string()),
            ..Default::default()
        };
        let created = add(&api, &args, &mut out).await.unwrap();

        assert_eq!(created.cooking_time, Some(5));
        assert!(output(out).starts_with("Created \"Tea\""));
    }

    #[tokio::test]
    async fn test_edit_sends_only_changes() {
        let original = recipe("Soup", Some(20));
        let id = original.id.to_string();
        let api = FakeApi::with(vec![original]);
        let mut out = Vec::new();

        let args = FormArgs {
            instructions: Some("Simmer slowly".to_string()),
            ..Default::default()
        };
        let updated = edit(&api, &id, &args, &mut out).await.unwrap();

        assert_eq!(updated.instructions, "Simmer slowly");
        let patches = api.patches.lock().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].instructions.as_deref(), Some("Simmer slowly"));
        assert_eq!(patches[0].title, None);
    }

    #[tokio::test]
    async fn test_edit_without_changes_skips_request() {
        let original = recipe("Soup", None);
        let id = original.id.to_string();
        let api = FakeApi::with(vec![original]);
        let mut out = Vec::new();

        edit(&api, &id, &FormArgs::default(), &mut out).await.unwrap();
        assert!(api.patches.lock().unwrap().is_empty());
        assert!(output(out).starts_with("Nothing to change"));
    }

    #[tokio::test]
    async fn test_delete_respects_confirmation() {
        let soup = recipe("Soup", None);
        let id = soup.id.to_string();
        let api = FakeApi::with(vec![soup]);

        let mut out = Vec::new();
        let kept = delete(&api, &id, |_| Ok(false), &mut out).await.unwrap();
        assert!(kept.is_none());
        assert_eq!(api.recipes.lock().unwrap().len(), 1);

        let mut out = Vec::new();
        let deleted = delete(&api, &id, |_| Ok(true), &mut out).await.unwrap();
        assert_eq!(deleted.unwrap().title, "Soup");
        assert!(api.recipes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_show_missing_reports_server_message() {
        let api = FakeApi::default();
        let mut out = Vec::new();
        let err = show(&api, "67e55044-10b1-426f-9247-bb680e5fe0c8", &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Recipe not found");
    }
}
