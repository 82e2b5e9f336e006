use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{ListQuery, SaveRecipeRequest},
    repo::{NewRecipe, StoreError, StoredRecipe},
    services::filter_recipes,
};
use crate::{
    auth::services::AuthUser,
    error::{ApiError, StoreOp},
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(save_recipe))
        .route("/recipes/:id", delete(delete_recipe))
}

#[instrument(skip(state, payload))]
pub async fn save_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<SaveRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredRecipe>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, %user_id, "unreadable recipe body");
        ApiError::InvalidInput("Invalid recipe data".into())
    })?;
    let recipe = NewRecipe::from(body);
    if recipe.title.is_empty() {
        warn!(%user_id, "save without title");
        return Err(ApiError::InvalidInput("Recipe title is required".into()));
    }

    let stored = state.recipes.save(user_id, recipe).await.map_err(|e| {
        error!(error = %e, %user_id, "save recipe failed");
        ApiError::Persistence(StoreOp::Save)
    })?;

    info!(%user_id, recipe_id = %stored.id, "recipe saved");
    Ok((StatusCode::CREATED, Json(stored)))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StoredRecipe>>, ApiError> {
    let recipes = state.recipes.list(user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "list recipes failed");
        ApiError::Persistence(StoreOp::Load)
    })?;
    Ok(Json(filter_recipes(recipes, query.q.as_deref())))
}

#[instrument(skip(state, id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|rejection| {
        warn!(error = %rejection, %user_id, "bad recipe id");
        ApiError::InvalidInput("Invalid recipe id".into())
    })?;

    match state.recipes.delete(user_id, id).await {
        Ok(()) => {
            info!(%user_id, recipe_id = %id, "recipe deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound) => {
            warn!(%user_id, recipe_id = %id, "delete of missing or foreign recipe");
            Err(ApiError::Persistence(StoreOp::Delete))
        }
        Err(e) => {
            error!(error = %e, %user_id, recipe_id = %id, "delete recipe failed");
            Err(ApiError::Persistence(StoreOp::Delete))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        extract::FromRef,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{app::build_app, auth::services::JwtKeys, state::AppState};

    fn bearer(state: &AppState, user: Uuid) -> String {
        let token = JwtKeys::from_ref(state).sign_access(user).unwrap();
        format!("Bearer {token}")
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(a) = auth {
            req = req.header(header::AUTHORIZATION, a);
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn generated() -> Value {
        json!({
            "title": "Lemon Chicken",
            "ingredients": ["2 chicken breasts", "1 lemon", "Salt"],
            "instructions": ["Season", "Roast 25 minutes"],
            "image_url": "https://images.unsplash.com/photo-1546069901-ba9599a7e63c",
            "cooking_time": "30 mins",
            "difficulty": "Easy",
            "tags": ["Dinner", "Healthy"]
        })
    }

    #[tokio::test]
    async fn requires_bearer_token() {
        let app = build_app(AppState::fake());
        let (status, body) = call(&app, Method::GET, "/api/v1/recipes", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());

        let (status, _) = call(
            &app,
            Method::GET,
            "/api/v1/recipes",
            Some("Bearer not-a-jwt"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn save_then_list_round_trips() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, saved) = call(
            &app,
            Method::POST,
            "/api/v1/recipes",
            Some(&auth),
            Some(generated()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(saved["id"].is_string());

        let (status, listed) = call(&app, Method::GET, "/api/v1/recipes", Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = listed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        for key in [
            "title",
            "ingredients",
            "instructions",
            "image_url",
            "cooking_time",
            "difficulty",
            "tags",
        ] {
            assert_eq!(rows[0][key], generated()[key], "field {key}");
        }
        assert_eq!(rows[0], saved);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        let mut body = generated();
        body["title"] = json!("   ");
        let (status, _) =
            call(&app, Method::POST, "/api/v1/recipes", Some(&auth), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_generic_failure() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        let uri = format!("/api/v1/recipes/{}", Uuid::new_v4());
        let (status, body) = call(&app, Method::DELETE, &uri, Some(&auth), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to delete recipe" }));
    }

    #[tokio::test]
    async fn malformed_save_body_is_json_bad_request() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/recipes",
            Some(&auth),
            Some(json!({ "title": "x", "tags": "Dinner" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid recipe data" }));

        let (_, listed) = call(&app, Method::GET, "/api/v1/recipes", Some(&auth), None).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_uuid_id_is_json_bad_request() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        let (status, body) =
            call(&app, Method::DELETE, "/api/v1/recipes/abc", Some(&auth), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid recipe id" }));
    }

    #[tokio::test]
    async fn search_filters_listing() {
        let state = AppState::fake();
        let auth = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        call(&app, Method::POST, "/api/v1/recipes", Some(&auth), Some(generated())).await;
        let mut other = generated();
        other["title"] = json!("Mushroom Risotto");
        other["ingredients"] = json!(["1 cup arborio rice", "200g mushrooms"]);
        other["tags"] = json!(["Italian"]);
        call(&app, Method::POST, "/api/v1/recipes", Some(&auth), Some(other)).await;

        let (_, hits) =
            call(&app, Method::GET, "/api/v1/recipes?q=italian", Some(&auth), None).await;
        let hits = hits.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "Mushroom Risotto");

        let (_, all) = call(&app, Method::GET, "/api/v1/recipes", Some(&auth), None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_owner() {
        let state = AppState::fake();
        let alice = bearer(&state, Uuid::new_v4());
        let bob = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (_, a) = call(
            &app,
            Method::POST,
            "/api/v1/recipes",
            Some(&alice),
            Some(generated()),
        )
        .await;
        call(&app, Method::POST, "/api/v1/recipes", Some(&bob), Some(generated())).await;
        let uri = format!("/api/v1/recipes/{}", a["id"].as_str().unwrap());

        let (status, body) = call(&app, Method::DELETE, &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to delete recipe" }));

        let (status, _) = call(&app, Method::DELETE, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, left) = call(&app, Method::GET, "/api/v1/recipes", Some(&alice), None).await;
        assert!(left.as_array().unwrap().is_empty());
        let (_, bobs) = call(&app, Method::GET, "/api/v1/recipes", Some(&bob), None).await;
        assert_eq!(bobs.as_array().unwrap().len(), 1);
    }
}
