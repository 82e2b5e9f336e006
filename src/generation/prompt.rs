pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 800;

pub fn build_prompt(ingredients: &[String]) -> String {
    format!(
        r#"Create a recipe using some or all of these ingredients: {list}.

Format the response as a JSON object with the following structure:
{{
  "title": "Recipe Title",
  "ingredients": ["Ingredient 1 with quantity", "Ingredient 2 with quantity", ...],
  "instructions": ["Step 1", "Step 2", ...],
  "tags": ["tag1", "tag2", ...]
}}

Make the recipe creative, delicious, and practical. Include quantities for ingredients.
Limit to 5-10 ingredients and 3-7 steps. You can add basic ingredients like salt, pepper, oil, etc.
Add 2-4 relevant tags for the recipe."#,
        list = ingredients.join(", ")
    )
}
