use super::repo::StoredRecipe;

/// Blank terms match everything; otherwise a case-insensitive substring of
/// the title, any tag or any ingredient.
pub fn matches_search(recipe: &StoredRecipe, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let hit = |s: &String| s.to_lowercase().contains(&term);
    hit(&recipe.title) || recipe.tags.iter().any(hit) || recipe.ingredients.iter().any(hit)
}

pub fn filter_recipes(recipes: Vec<StoredRecipe>, term: Option<&str>) -> Vec<StoredRecipe> {
    match term {
        Some(t) => recipes.into_iter().filter(|r| matches_search(r, t)).collect(),
        None => recipes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn recipe(title: &str, tags: &[&str], ingredients: &[&str]) -> StoredRecipe {
        StoredRecipe {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            title: title.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: vec!["Cook".into()],
            image_url: None,
            cooking_time: None,
            difficulty: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn matches_title_tag_or_ingredient_ignoring_case() {
        let r = recipe("Thai Green Curry", &["Asian", "Dinner"], &["200g Tofu", "Coconut milk"]);
        assert!(matches_search(&r, "curry"));
        assert!(matches_search(&r, "ASIAN"));
        assert!(matches_search(&r, "tofu"));
        assert!(matches_search(&r, "  milk "));
        assert!(!matches_search(&r, "pasta"));
    }

    #[test]
    fn blank_term_matches_all() {
        let r = recipe("Toast", &[], &["bread"]);
        assert!(matches_search(&r, ""));
        assert!(matches_search(&r, "   "));
    }

    #[test]
    fn filter_keeps_order() {
        let all = vec![
            recipe("Pasta Bake", &["Italian"], &["penne"]),
            recipe("Pad Thai", &["Asian"], &["rice noodles"]),
            recipe("Carbonara", &["Italian"], &["spaghetti"]),
        ];
        let titles: Vec<String> = filter_recipes(all.clone(), Some("italian"))
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Pasta Bake", "Carbonara"]);
        assert_eq!(filter_recipes(all, None).len(), 3);
    }
}
