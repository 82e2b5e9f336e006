use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /generate-recipe`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// Recipe as the model described it. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl GeneratedRecipe {
    /// Lenient conversion from whatever object the model produced.
    ///
    /// Fields of the wrong shape are treated as missing rather than failing the
    /// whole generation. Non-string list items are kept as compact JSON text.
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: string_field(obj, "title"),
            ingredients: list_field(obj, "ingredients").unwrap_or_default(),
            instructions: list_field(obj, "instructions").unwrap_or_default(),
            tags: list_field(obj, "tags"),
            image_url: string_field(obj, "image_url"),
            cooking_time: string_field(obj, "cooking_time"),
            difficulty: string_field(obj, "difficulty"),
        }
    }
}

/// Generated recipe after cosmetic metadata has been filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: String,
    pub cooking_time: String,
    pub difficulty: String,
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match obj.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}
