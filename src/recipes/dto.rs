use serde::Deserialize;

use super::repo::NewRecipe;

/// Request body for saving a generated recipe. Same shape as the
/// generation response.
#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub cooking_time: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<SaveRecipeRequest> for NewRecipe {
    fn from(r: SaveRecipeRequest) -> Self {
        Self {
            title: r.title.trim().to_string(),
            ingredients: r.ingredients,
            instructions: r.instructions,
            image_url: r.image_url,
            cooking_time: r.cooking_time,
            difficulty: r.difficulty,
            tags: r.tags,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive search over title, tags and ingredients.
    pub q: Option<String>,
}
