use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field error messages, in rule order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Raw internal error detail, only sent in development mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
            count: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors: None,
            count: None,
            error: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.error = detail;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_empty_fields() {
        let value = serde_json::to_value(Envelope::failure("Recipe not found")).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "Recipe not found" }));
    }

    #[test]
    fn test_list_envelope_carries_count() {
        let value = serde_json::to_value(Envelope::data(vec![1, 2]).with_count(2)).unwrap();
        assert_eq!(value, json!({ "success": true, "data": [1, 2], "count": 2 }));
    }

    #[test]
    fn test_error_envelope_parses_without_data() {
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(json!({
            "success": false,
            "message": "Validation failed",
            "errors": ["Recipe title is required"]
        }))
        .unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.unwrap(), vec!["Recipe title is required"]);
    }

    #[test]
    fn test_recipe_envelope_parses_with_and_without_data() {
        use crate::types::Recipe;

        let missing: Envelope<Recipe> = serde_json::from_value(json!({
            "success": false,
            "message": "Recipe not found"
        }))
        .unwrap();
        assert!(missing.data.is_none());

        let found: Envelope<Recipe> = serde_json::from_value(json!({
            "success": true,
            "data": {
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "title": "Toast",
                "ingredients": ["bread"],
                "instructions": "Toast it",
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z"
            }
        }))
        .unwrap();
        assert_eq!(found.data.unwrap().title, "Toast");
    }
}
