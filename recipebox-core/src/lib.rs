pub mod client;
pub mod envelope;
pub mod error;
pub mod types;
pub mod validate;

pub use client::{RecipeApi, RecipeClient, DEFAULT_TIMEOUT};
pub use envelope::{Envelope, HealthResponse};
pub use error::{ClientError, FieldError, MalformedId, ValidationErrors};
pub use types::{Recipe, RecipeDraft, RecipeId, RecipePatch};
pub use validate::{parse_cooking_time, validate, ValidRecipe};
