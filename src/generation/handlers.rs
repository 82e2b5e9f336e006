use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument, warn};

use super::{
    dto::{EnrichedRecipe, GenerateRequest},
    services::generate_recipe,
};
use crate::{error::ApiError, state::AppState};

pub fn generate_routes() -> Router<AppState> {
    Router::new().route("/generate-recipe", post(generate))
}

/// POST /generate-recipe { "ingredients": ["chicken", "rice"] }
#[instrument(skip(state, payload))]
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<EnrichedRecipe>, ApiError> {
    if state.completion.is_none() {
        return Err(ApiError::Configuration);
    }

    let ingredients = match payload {
        Ok(Json(GenerateRequest {
            ingredients: Some(list),
        })) => list,
        Ok(_) => {
            warn!("request without ingredients");
            return Err(ApiError::InvalidInput(
                "At least 2 ingredients are required".into(),
            ));
        }
        Err(rejection) => {
            warn!(error = %rejection, "unreadable generate request");
            return Err(ApiError::InvalidInput(
                "At least 2 ingredients are required".into(),
            ));
        }
    };

    let recipe = generate_recipe(
        state.completion.as_deref(),
        &state.config.completion.model,
        &ingredients,
        StdRng::from_entropy(),
    )
    .await?;

    info!(title = recipe.title.as_deref().unwrap_or(""), "recipe generated");
    Ok(Json(recipe))
}
