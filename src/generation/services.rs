use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::{
    completion::{CompletionClient, CompletionError, CompletionRequest},
    dto::EnrichedRecipe,
    enrich::enrich,
    extract::{extract_recipe, ExtractError},
    prompt::{build_prompt, MAX_TOKENS, TEMPERATURE},
};
use crate::error::ApiError;

pub const MIN_INGREDIENTS: usize = 2;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("At least 2 ingredients are required")]
    InvalidInput,

    #[error("completion backend not configured")]
    Configuration,

    #[error("completion backend unavailable: {0}")]
    UpstreamUnavailable(#[from] CompletionError),

    #[error("malformed completion: {0}")]
    MalformedUpstreamResponse(#[from] ExtractError),
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        match &e {
            GenerateError::InvalidInput => ApiError::InvalidInput(e.to_string()),
            GenerateError::Configuration => ApiError::Configuration,
            GenerateError::UpstreamUnavailable(_) => ApiError::UpstreamUnavailable,
            GenerateError::MalformedUpstreamResponse(_) => ApiError::MalformedUpstreamResponse,
        }
    }
}

/// Trims entries and drops the blank ones. Order and repeats are kept;
/// deduplication is up to the caller.
pub fn prompt_ingredients(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Full generation pipeline: credential check, validation, completion,
/// extraction and enrichment.
///
/// `client` is `None` when no API key is configured; that is reported before
/// anything else so an unconfigured deployment never goes to the network.
pub async fn generate_recipe<R: Rng + Send>(
    client: Option<&dyn CompletionClient>,
    model: &str,
    ingredients: &[String],
    mut rng: R,
) -> Result<EnrichedRecipe, GenerateError> {
    let Some(client) = client else {
        error!("completion api key not configured");
        return Err(GenerateError::Configuration);
    };

    if ingredients.len() < MIN_INGREDIENTS {
        warn!(count = ingredients.len(), "not enough ingredients");
        return Err(GenerateError::InvalidInput);
    }
    let ingredients = prompt_ingredients(ingredients);

    let request = CompletionRequest {
        model: model.to_string(),
        prompt: build_prompt(&ingredients),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };

    let text = client.complete(&request).await.map_err(|e| {
        error!(error = %e, "completion backend error");
        GenerateError::from(e)
    })?;
    debug!(len = text.len(), "completion received");

    let recipe = extract_recipe(&text).map_err(|e| {
        error!(error = %e, "could not extract recipe json");
        GenerateError::from(e)
    })?;

    Ok(enrich(recipe, &mut rng))
}
