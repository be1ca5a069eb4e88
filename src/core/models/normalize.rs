//! Normalizer: the single place that resolves key aliasing in raw descriptors.

use serde_json::{Map, Value};

use super::fetch::FetchError;
use super::recommend::Recommender;
use super::record::{ModelRecord, RecordFields};

const ID_KEYS: &[&str] = &[
    "name",
    "model",
    "id",
    "model_id",
    "modelId",
    "model_name",
    "modelName",
];
const DISPLAY_NAME_KEYS: &[&str] = &["display_name", "displayName"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const VERSION_KEYS: &[&str] = &["version"];
const INPUT_LIMIT_KEYS: &[&str] = &["input_token_limit", "inputTokenLimit"];
const OUTPUT_LIMIT_KEYS: &[&str] = &["output_token_limit", "outputTokenLimit"];
const ACTION_KEYS: &[&str] = &[
    "supported_actions",
    "supportedActions",
    "supported_generation_methods",
    "supportedGenerationMethods",
];
const STATE_KEYS: &[&str] = &["state", "lifecycle_state", "lifecycleState"];
const BASE_MODEL_KEYS: &[&str] = &["base_model", "base_model_id", "baseModelId"];
const TEMPERATURE_KEYS: &[&str] = &["temperature"];
const MAX_TEMPERATURE_KEYS: &[&str] = &["max_temperature", "maxTemperature"];
const TOP_P_KEYS: &[&str] = &["top_p", "topP"];
const TOP_K_KEYS: &[&str] = &["top_k", "topK"];

/// Build records from raw descriptors, preserving order.
/// Descriptors that are not objects or carry no identifier are skipped.
pub fn normalize(raw: &[Value], recommender: &Recommender) -> Vec<ModelRecord> {
    let records: Vec<ModelRecord> = raw
        .iter()
        .filter_map(|item| normalize_one(item, recommender))
        .collect();
    let skipped = raw.len() - records.len();
    if skipped > 0 {
        log::debug!("Skipped {} model descriptor(s) without an identifier", skipped);
    }
    records
}

/// Normalize a listing result. A failed listing yields no records plus the error.
pub fn normalize_listing(
    listing: Result<Vec<Value>, FetchError>,
    recommender: &Recommender,
) -> (Vec<ModelRecord>, Option<FetchError>) {
    match listing {
        Ok(raw) => (normalize(&raw, recommender), None),
        Err(e) => (Vec::new(), Some(e)),
    }
}

fn normalize_one(item: &Value, recommender: &Recommender) -> Option<ModelRecord> {
    let obj = item.as_object()?;
    let fields = RecordFields {
        full_id: text(obj, ID_KEYS)?,
        display_name: text(obj, DISPLAY_NAME_KEYS).unwrap_or_default(),
        description: text(obj, DESCRIPTION_KEYS).unwrap_or_default(),
        input_token_limit: unsigned(obj, INPUT_LIMIT_KEYS),
        output_token_limit: unsigned(obj, OUTPUT_LIMIT_KEYS),
        version: text(obj, VERSION_KEYS),
        supported_actions: strings(obj, ACTION_KEYS),
        state: text(obj, STATE_KEYS),
        base_model: text(obj, BASE_MODEL_KEYS),
        temperature: float(obj, TEMPERATURE_KEYS),
        max_temperature: float(obj, MAX_TEMPERATURE_KEYS),
        top_p: float(obj, TOP_P_KEYS),
        top_k: unsigned(obj, TOP_K_KEYS),
    };
    ModelRecord::from_fields(fields, recommender)
}

/// First non-empty string under any of `keys`. Numbers are stringified.
fn text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-negative integer, accepting integer strings (`"1048576"`).
fn unsigned(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn float(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// String list; a single string is treated as a one-element list.
fn strings(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|k| match obj.get(*k)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            Value::String(s) if !s.trim().is_empty() => Some(vec![s.trim().to_string()]),
            _ => None,
        })
        .unwrap_or_default()
}
