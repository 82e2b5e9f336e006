use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Saved recipe row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredRecipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub cooking_time: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Column values supplied by the caller on save.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub cooking_time: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Owner-scoped persistence for saved recipes.
///
/// Every call takes the owner; rows of other owners are never returned or
/// removed.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn save(&self, owner: Uuid, recipe: NewRecipe) -> Result<StoredRecipe, StoreError>;

    /// All recipes of `owner`, newest first.
    async fn list(&self, owner: Uuid) -> Result<Vec<StoredRecipe>, StoreError>;

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn save(&self, owner: Uuid, recipe: NewRecipe) -> Result<StoredRecipe, StoreError> {
        let row = sqlx::query_as::<_, StoredRecipe>(
            r#"
            INSERT INTO recipes
                (user_id, title, ingredients, instructions, image_url, cooking_time, difficulty, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, ingredients, instructions, image_url,
                      cooking_time, difficulty, tags, created_at
            "#,
        )
        .bind(owner)
        .bind(recipe.title)
        .bind(recipe.ingredients)
        .bind(recipe.instructions)
        .bind(recipe.image_url)
        .bind(recipe.cooking_time)
        .bind(recipe.difficulty)
        .bind(recipe.tags)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<StoredRecipe>, StoreError> {
        let rows = sqlx::query_as::<_, StoredRecipe>(
            r#"
            SELECT id, user_id, title, ingredients, instructions, image_url,
                   cooking_time, difficulty, tags, created_at
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), StoreError> {
        let res = sqlx::query(r#"DELETE FROM recipes WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryRecipeStore;
    use super::*;

    fn new_recipe(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.into(),
            ingredients: vec!["1 cup rice".into(), "2 eggs".into()],
            instructions: vec!["Cook rice".into(), "Scramble eggs".into()],
            image_url: Some("https://images.example/egg.jpg".into()),
            cooking_time: Some("15 mins".into()),
            difficulty: Some("Easy".into()),
            tags: vec!["Breakfast".into(), "Quick & Easy".into()],
        }
    }

    #[tokio::test]
    async fn saved_recipe_lists_with_identical_fields() {
        let store = MemoryRecipeStore::default();
        let owner = Uuid::new_v4();
        let saved = store.save(owner, new_recipe("Egg Fried Rice")).await.unwrap();

        let listed = store.list(owner).await.unwrap();
        assert_eq!(listed, vec![saved.clone()]);
        let r = &listed[0];
        let expected = new_recipe("Egg Fried Rice");
        assert_eq!(r.user_id, owner);
        assert_eq!(r.title, expected.title);
        assert_eq!(r.ingredients, expected.ingredients);
        assert_eq!(r.instructions, expected.instructions);
        assert_eq!(r.image_url, expected.image_url);
        assert_eq!(r.cooking_time, expected.cooking_time);
        assert_eq!(r.difficulty, expected.difficulty);
        assert_eq!(r.tags, expected.tags);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_owner_scoped() {
        let store = MemoryRecipeStore::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.save(alice, new_recipe("First")).await.unwrap();
        store.save(bob, new_recipe("Bob's")).await.unwrap();
        store.save(alice, new_recipe("Second")).await.unwrap();

        let titles: Vec<String> = store
            .list(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
        assert!(store.list(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_only_touches_the_owner() {
        let store = MemoryRecipeStore::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let a = store.save(alice, new_recipe("Alice soup")).await.unwrap();
        let b = store.save(bob, new_recipe("Bob soup")).await.unwrap();

        // bob cannot delete alice's row
        assert!(matches!(
            store.delete(bob, a.id).await,
            Err(StoreError::NotFound)
        ));
        assert_eq!(store.list(alice).await.unwrap().len(), 1);

        store.delete(alice, a.id).await.unwrap();
        assert!(store.list(alice).await.unwrap().is_empty());
        assert_eq!(store.list(bob).await.unwrap(), vec![b]);

        assert!(matches!(
            store.delete(alice, a.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn stored_recipe_serializes_created_at_as_rfc3339() {
        let row = StoredRecipe {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: "T".into(),
            ingredients: vec![],
            instructions: vec![],
            image_url: None,
            cooking_time: None,
            difficulty: None,
            tags: vec![],
            created_at: time::macros::datetime!(2024-05-01 12:00 UTC),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
    }
}
