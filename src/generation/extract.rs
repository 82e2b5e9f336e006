use serde_json::{Map, Value};
use thiserror::Error;

use super::dto::GeneratedRecipe;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in completion")]
    NoJsonFound,

    #[error("completion JSON did not parse: {0}")]
    ParseFailure(#[from] serde_json::Error),
}

/// Greedy span from the first `{` to the last `}` of the text.
///
/// The model is asked for exactly one object; anything around it is prose.
/// Braces inside that prose will widen the span and usually fail to parse.
pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractError> {
    let span = json_span(text).ok_or(ExtractError::NoJsonFound)?;
    // A span bounded by braces can only be valid JSON as an object.
    let obj: Map<String, Value> = serde_json::from_str(span)?;
    Ok(obj)
}

pub fn extract_recipe(text: &str) -> Result<GeneratedRecipe, ExtractError> {
    let obj = extract_json_object(text)?;
    Ok(GeneratedRecipe::from_object(&obj))
}
