//! Add/edit form state for a recipe.
//!
//! Holds the raw text the user typed, checks it with the shared validator
//! before anything is sent, and builds the create or update payload.

use clap::Args;
use recipebox_core::{validate, Recipe, RecipeDraft, RecipePatch, ValidRecipe, ValidationErrors};
use serde_json::Value;

#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Recipe title (1-100 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Ingredient line; repeat for each ingredient. Replaces the whole list on edit.
    #[arg(long = "ingredient", value_name = "INGREDIENT")]
    pub ingredients: Vec<String>,

    /// Cooking instructions
    #[arg(long)]
    pub instructions: Option<String>,

    /// Cooking time in minutes (1-1440)
    #[arg(long, value_name = "MINUTES")]
    pub cooking_time: Option<String>,

    /// Remove the stored image (edit only)
    #[arg(long, conflicts_with = "image")]
    pub clear_image: bool,

    /// Remove the stored cooking time (edit only)
    #[arg(long, conflicts_with = "cooking_time")]
    pub clear_cooking_time: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeForm {
    pub title: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
}

impl RecipeForm {
    /// Pre-fill the form from a stored recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            image: recipe.image.clone().unwrap_or_default(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            cooking_time: recipe
                .cooking_time
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }

    /// Overwrite the fields the user supplied on the command line.
    pub fn apply(&mut self, args: &FormArgs) {
        if let Some(title) = &args.title {
            self.title = title.clone();
        }
        if let Some(image) = &args.image {
            self.image = image.clone();
        }
        if args.clear_image {
            self.image.clear();
        }
        if !args.ingredients.is_empty() {
            self.ingredients = args.ingredients.clone();
        }
        if let Some(instructions) = &args.instructions {
            self.instructions = instructions.clone();
        }
        if let Some(cooking_time) = &args.cooking_time {
            self.cooking_time = cooking_time.clone();
        }
        if args.clear_cooking_time {
            self.cooking_time.clear();
        }
    }

    fn raw_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: Some(self.title.clone()),
            image: Some(self.image.clone()),
            ingredients: Some(self.ingredients.clone()),
            instructions: Some(self.instructions.clone()),
            cooking_time: Some(Value::String(self.cooking_time.clone())),
        }
    }

    pub fn validate(&self) -> Result<ValidRecipe, ValidationErrors> {
        validate(&self.raw_draft())
    }

    /// Trimmed create payload; blank ingredients dropped, cooking time sent
    /// as a number.
    pub fn to_draft(&self) -> Result<RecipeDraft, ValidationErrors> {
        let valid = self.validate()?;
        Ok(RecipeDraft {
            title: Some(valid.title),
            image: valid.image,
            ingredients: Some(valid.ingredients),
            instructions: Some(valid.instructions),
            cooking_time: valid.cooking_time.map(Value::from),
        })
    }

    /// Update payload holding only what differs from `original`.
    pub fn to_patch(&self, original: &Recipe) -> Result<RecipePatch, ValidationErrors> {
        let valid = self.validate()?;
        let mut patch = RecipePatch::default();

        if valid.title != original.title {
            patch.title = Some(valid.title);
        }
        if valid.image != original.image {
            patch.image = Some(valid.image);
        }
        if valid.ingredients != original.ingredients {
            patch.ingredients = Some(valid.ingredients);
        }
        if valid.instructions != original.instructions {
            patch.instructions = Some(valid.instructions);
        }
        if valid.cooking_time != original.cooking_time {
            patch.cooking_time = Some(valid.cooking_time.map(Value::from));
        }

        Ok(patch)
    }
}

/// One line per invalid field, for display under the form.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
