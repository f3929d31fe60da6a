use std::io::Write;

use anyhow::{Context, Result};
use recipebox_core::{RecipeApi, RecipeDraft};
use serde_json::Value;

struct SeedRecipe {
    title: &'static str,
    image: Option<&'static str>,
    ingredients: &'static [&'static str],
    instructions: &'static str,
    cooking_time: Option<i32>,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Classic Spaghetti Carbonara",
        image: None,
        ingredients: &[
            "400 g spaghetti",
            "200 g pancetta or guanciale",
            "4 large eggs",
            "100 g Pecorino Romano, freshly grated",
            "2 tsp black pepper, freshly ground",
            "salt, for pasta water",
        ],
        instructions: "1. Bring a large pot of salted water to boil and cook spaghetti until al dente.
2. While pasta cooks, cut pancetta into small cubes and fry until crispy.
3. In a bowl, whisk together eggs, grated Pecorino Romano, and black pepper.
4. Reserve 1 cup pasta water, then drain.
5. Off the heat, toss the hot pasta with the pancetta and the egg mixture.
6. Add pasta water as needed and serve immediately.",
        cooking_time: Some(25),
    },
    SeedRecipe {
        title: "Banana Bread",
        image: None,
        ingredients: &[
            "3 ripe bananas, mashed",
            "1/3 cup melted butter",
            "3/4 cup sugar",
            "1 egg, beaten",
            "1 tsp vanilla extract",
            "1 tsp baking soda",
            "1 1/2 cups all-purpose flour",
            "pinch of salt",
        ],
        instructions: "1. Preheat oven to 350°F (175°C) and butter a loaf pan.
2. Mix melted butter into the mashed bananas.
3. Stir in baking soda, salt, sugar, egg, and vanilla.
4. Fold in the flour until just combined.
5. Pour into the pan and bake for 55-65 minutes until a toothpick comes out clean.",
        cooking_time: Some(75),
    },
    SeedRecipe {
        title: "Greek Salad",
        image: None,
        ingredients: &[
            "4 tomatoes, cut into wedges",
            "1 cucumber, sliced",
            "1/2 red onion, thinly sliced",
            "1/2 cup Kalamata olives",
            "200 g feta cheese",
            "3 tbsp olive oil",
            "1 tbsp red wine vinegar",
            "1 tsp dried oregano",
        ],
        instructions: "1. Combine tomatoes, cucumber, and onion in a large bowl.
2. Add olives and crumbled feta.
3. Drizzle with olive oil and vinegar, then season with oregano.
4. Toss gently and serve immediately.",
        cooking_time: Some(15),
    },
    SeedRecipe {
        title: "Overnight Oats",
        image: None,
        ingredients: &[
            "1/2 cup rolled oats",
            "1/2 cup milk",
            "1/4 cup Greek yogurt",
            "1 tbsp chia seeds",
            "1 tbsp maple syrup",
            "1/2 cup fresh berries, for topping",
        ],
        instructions: "1. Stir oats, milk, yogurt, chia seeds, and maple syrup together in a jar.
2. Cover and refrigerate overnight.
3. Top with berries before serving.",
        cooking_time: None,
    },
];

impl SeedRecipe {
    fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: Some(self.title.to_string()),
            image: self.image.map(str::to_string),
            ingredients: Some(self.ingredients.iter().map(|i| i.to_string()).collect()),
            instructions: Some(self.instructions.to_string()),
            cooking_time: self.cooking_time.map(Value::from),
        }
    }
}

/// Create the sample recipes unless the collection already has some.
/// Returns how many were created.
pub async fn seed(api: &dyn RecipeApi, out: &mut dyn Write) -> Result<usize> {
    let existing = api
        .list_recipes()
        .await
        .context("Failed to list existing recipes")?;
    if !existing.is_empty() {
        writeln!(
            out,
            "{} recipe(s) already stored, skipping seed",
            existing.len()
        )?;
        return Ok(0);
    }

    writeln!(out, "Creating {} sample recipes...", SAMPLE_RECIPES.len())?;

    for recipe in SAMPLE_RECIPES {
        let created = api
            .create_recipe(&recipe.to_draft())
            .await
            .with_context(|| format!("Failed to create recipe: {}", recipe.title))?;
        tracing::debug!(id = %created.id, "seeded recipe");
        writeln!(out, "  Created: {}", created.title)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "SEED DATA COMPLETE")?;
    writeln!(out, "{}", "=".repeat(50))?;

    Ok(SAMPLE_RECIPES.len())
}
