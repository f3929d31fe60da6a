use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::MalformedId;

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Check the identifier format without any lookup.
    pub fn parse(raw: &str) -> Result<Self, MalformedId> {
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| MalformedId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecipeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for RecipeId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted recipe as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Minutes, 1 to 1440
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate recipe, as submitted for creation.
///
/// Every field is optional at the type level so that missing fields surface
/// as field errors rather than as body decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Whole minutes, as a number or a numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub cooking_time: Option<Value>,
}

impl RecipeDraft {
    /// Whether title, ingredients and instructions were all supplied.
    pub fn has_required_fields(&self) -> bool {
        self.title.is_some() && self.ingredients.is_some() && self.instructions.is_some()
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: Some(recipe.title.clone()),
            image: recipe.image.clone(),
            ingredients: Some(recipe.ingredients.clone()),
            instructions: Some(recipe.instructions.clone()),
            cooking_time: recipe.cooking_time.map(Value::from),
        }
    }
}

/// Partial update. Absent fields keep their stored value; for `image` and
/// `cookingTime` an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub cooking_time: Option<Option<Value>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the patch over a stored recipe, yielding the draft to validate.
    pub fn apply_to(&self, current: &Recipe) -> RecipeDraft {
        let mut draft = RecipeDraft::from(current);

        if let Some(title) = &self.title {
            draft.title = Some(title.clone());
        }
        if let Some(image) = &self.image {
            draft.image = image.clone();
        }
        if let Some(ingredients) = &self.ingredients {
            draft.ingredients = Some(ingredients.clone());
        }
        if let Some(instructions) = &self.instructions {
            draft.instructions = Some(instructions.clone());
        }
        if let Some(cooking_time) = &self.cooking_time {
            draft.cooking_time = cooking_time.clone();
        }

        draft
    }
}

/// Distinguishes a field set to `null` (`Some(None)`) from an absent one (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> Recipe {
        let now = Utc::now();
        Recipe {
            id: RecipeId::new(),
            title: "Toast".to_string(),
            image: Some("https://example.com/toast.png".to_string()),
            ingredients: vec!["bread".to_string()],
            instructions: "Toast it".to_string(),
            cooking_time: Some(5),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_recipe_id_rejects_garbage() {
        assert!(RecipeId::parse("not-an-id").is_err());
        assert!(RecipeId::parse("").is_err());
        let id = RecipeId::new();
        assert_eq!(RecipeId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_recipe_serializes_camel_case_without_absent_fields() {
        let mut recipe = stored();
        recipe.image = None;
        recipe.cooking_time = None;
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("cookingTime").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: RecipePatch =
            serde_json::from_value(json!({ "title": "X", "cookingTime": null })).unwrap();
        assert_eq!(patch.title.as_deref(), Some("X"));
        assert_eq!(patch.cooking_time, Some(None));
        assert_eq!(patch.image, None);
    }

    #[test]
    fn test_patch_apply_keeps_and_clears() {
        let current = stored();
        let patch = RecipePatch {
            image: Some(None),
            instructions: Some("Toast it well".to_string()),
            ..Default::default()
        };
        let draft = patch.apply_to(&current);
        assert_eq!(draft.title.as_deref(), Some("Toast"));
        assert_eq!(draft.image, None);
        assert_eq!(draft.instructions.as_deref(), Some("Toast it well"));
        assert_eq!(draft.cooking_time, Some(json!(5)));
    }

    #[test]
    fn test_draft_required_fields() {
        let draft: RecipeDraft =
            serde_json::from_value(json!({ "title": "", "ingredients": [], "instructions": "" }))
                .unwrap();
        assert!(draft.has_required_fields());
        let draft: RecipeDraft = serde_json::from_value(json!({ "title": "Toast" })).unwrap();
        assert!(!draft.has_required_fields());
    }
}
