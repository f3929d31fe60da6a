//! Field rules a recipe must satisfy before it is persisted.
//!
//! The same rules run on the server before every write and in the CLI form
//! before submitting, so both sides agree on what a valid recipe is.

use serde_json::Value;

use crate::error::{FieldError, ValidationErrors};
use crate::types::RecipeDraft;

pub const TITLE_MAX_CHARS: usize = 100;
pub const COOKING_TIME_MIN: i64 = 1;
pub const COOKING_TIME_MAX: i64 = 1440;

pub const TITLE_REQUIRED: &str = "Recipe title is required";
pub const TITLE_TOO_LONG: &str = "Title cannot exceed 100 characters";
pub const INGREDIENTS_REQUIRED: &str = "Recipe must have at least one ingredient";
pub const INSTRUCTIONS_REQUIRED: &str = "Cooking instructions are required";
pub const COOKING_TIME_NOT_A_NUMBER: &str = "Cooking time must be a whole number of minutes";
pub const COOKING_TIME_TOO_SHORT: &str = "Cooking time must be at least 1 minute";
pub const COOKING_TIME_TOO_LONG: &str = "Cooking time cannot exceed 24 hours (1440 minutes)";

/// A recipe that passed every rule, with all text trimmed and blank
/// ingredients dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecipe {
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: Option<i32>,
}

/// Check every rule independently and report all violations at once.
pub fn validate(draft: &RecipeDraft) -> Result<ValidRecipe, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = draft.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        errors.push(FieldError::new("title", TITLE_REQUIRED));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new("title", TITLE_TOO_LONG));
    }

    let ingredients: Vec<String> = draft
        .ingredients
        .iter()
        .flatten()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();
    if ingredients.is_empty() {
        errors.push(FieldError::new("ingredients", INGREDIENTS_REQUIRED));
    }

    let instructions = draft
        .instructions
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if instructions.is_empty() {
        errors.push(FieldError::new("instructions", INSTRUCTIONS_REQUIRED));
    }

    let cooking_time = match draft.cooking_time.as_ref().map(parse_cooking_time) {
        Some(Ok(minutes)) => minutes,
        Some(Err(error)) => {
            errors.push(error);
            None
        }
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let image = draft
        .image
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(str::to_string);

    Ok(ValidRecipe {
        title: title.to_string(),
        image,
        ingredients,
        instructions: instructions.to_string(),
        cooking_time,
    })
}

/// The one numeric rule for cooking time, shared by server and client.
///
/// `null` and blank strings mean "not provided". Integers and strings holding
/// a base-10 integer are accepted; fractions, booleans and other text are not.
pub fn parse_cooking_time(raw: &Value) -> Result<Option<i32>, FieldError> {
    let minutes = match raw {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64().or_else(|| {
            // 1e2 style floats without a fractional part still count
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };

    let Some(minutes) = minutes else {
        return Err(FieldError::new("cookingTime", COOKING_TIME_NOT_A_NUMBER));
    };

    if minutes < COOKING_TIME_MIN {
        return Err(FieldError::new("cookingTime", COOKING_TIME_TOO_SHORT));
    }
    if minutes > COOKING_TIME_MAX {
        return Err(FieldError::new("cookingTime", COOKING_TIME_TOO_LONG));
    }

    // Bounded by COOKING_TIME_MAX above
    Ok(Some(minutes as i32))
}
