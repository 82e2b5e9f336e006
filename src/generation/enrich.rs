use rand::Rng;

use super::dto::{EnrichedRecipe, GeneratedRecipe};

pub const RECIPE_IMAGES: [&str; 8] = [
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?q=80&w=2080&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1504674900247-0877df9cc836?q=80&w=2070&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?q=80&w=2070&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1473093295043-cdd812d0e601?q=80&w=2070&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe?q=80&w=2067&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?q=80&w=2081&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1565958011703-44f9829ba187?q=80&w=2065&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1482049016688-2d3e1b311543?q=80&w=2010&auto=format&fit=crop",
];

pub const COOKING_TIMES: [&str; 6] = [
    "15 mins",
    "30 mins",
    "45 mins",
    "1 hour",
    "1.5 hours",
    "2 hours",
];

pub const DIFFICULTY_LEVELS: [&str; 3] = ["Easy", "Medium", "Hard"];

pub const FOOD_TAGS: [&str; 19] = [
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Low-Carb",
    "Keto",
    "Paleo",
    "Mediterranean",
    "Asian",
    "Italian",
    "Mexican",
    "Quick & Easy",
    "Comfort Food",
    "Healthy",
    "Breakfast",
    "Lunch",
    "Dinner",
    "Dessert",
    "Snack",
];

/// Number of tags drawn when the model gave none.
const FALLBACK_TAG_DRAWS: usize = 2;

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> String {
    pool[rng.gen_range(0..pool.len())].to_string()
}

/// Fills the cosmetic fields the model left out.
///
/// Values already present are kept. Fallback tags are drawn with replacement
/// and then deduplicated, so a repeated draw leaves a single tag.
pub fn enrich<R: Rng + ?Sized>(recipe: GeneratedRecipe, rng: &mut R) -> EnrichedRecipe {
    let image_url = recipe.image_url.unwrap_or_else(|| pick(rng, &RECIPE_IMAGES));
    let cooking_time = recipe
        .cooking_time
        .unwrap_or_else(|| pick(rng, &COOKING_TIMES));
    let difficulty = recipe
        .difficulty
        .unwrap_or_else(|| pick(rng, &DIFFICULTY_LEVELS));

    let tags = match recipe.tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => {
            let mut drawn: Vec<String> = Vec::with_capacity(FALLBACK_TAG_DRAWS);
            for _ in 0..FALLBACK_TAG_DRAWS {
                let tag = pick(rng, &FOOD_TAGS);
                if !drawn.contains(&tag) {
                    drawn.push(tag);
                }
            }
            drawn
        }
    };

    EnrichedRecipe {
        title: recipe.title,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        tags,
        image_url,
        cooking_time,
        difficulty,
    }
}
