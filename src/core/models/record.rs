//! Uniform, immutable model record built by the normalizer.

use serde::Serialize;

use super::family::{Family, classify};
use super::recommend::Recommender;

/// Placeholder shown for empty text fields.
pub const PLACEHOLDER: &str = "—";

/// One model, normalized. Family and recommendation are fixed at construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelRecord {
    full_id: String,
    short_id: String,
    display_name: String,
    description: String,
    family: Family,
    recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_token_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_token_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    supported_actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u64>,
}

/// Raw field values gathered by the normalizer, before classification.
#[derive(Debug, Default)]
pub(super) struct RecordFields {
    pub full_id: String,
    pub display_name: String,
    pub description: String,
    pub input_token_limit: Option<u64>,
    pub output_token_limit: Option<u64>,
    pub version: Option<String>,
    pub supported_actions: Vec<String>,
    pub state: Option<String>,
    pub base_model: Option<String>,
    pub temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u64>,
}

/// Trailing path segment of a qualified id (`models/gemini-2.5-pro` → `gemini-2.5-pro`).
pub fn short_id(full_id: &str) -> &str {
    full_id.rsplit('/').next().unwrap_or(full_id)
}

impl ModelRecord {
    /// Returns `None` when the identifier is empty.
    pub(super) fn from_fields(fields: RecordFields, recommender: &Recommender) -> Option<Self> {
        let full_id = fields.full_id.trim().to_string();
        if full_id.is_empty() {
            return None;
        }
        let short = short_id(&full_id).to_string();
        Some(Self {
            family: classify(&short),
            recommended: recommender.is_recommended(&short),
            short_id: short,
            full_id,
            display_name: fields.display_name,
            description: fields.description,
            input_token_limit: fields.input_token_limit,
            output_token_limit: fields.output_token_limit,
            version: fields.version,
            supported_actions: fields.supported_actions,
            state: fields.state,
            base_model: fields.base_model,
            temperature: fields.temperature,
            max_temperature: fields.max_temperature,
            top_p: fields.top_p,
            top_k: fields.top_k,
        })
    }

    pub fn full_id(&self) -> &str {
        &self.full_id
    }

    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display name, or the placeholder when empty.
    pub fn display_name_or_placeholder(&self) -> &str {
        or_placeholder(&self.display_name)
    }

    /// Description, or the placeholder when empty.
    pub fn description_or_placeholder(&self) -> &str {
        or_placeholder(&self.description)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn is_recommended(&self) -> bool {
        self.recommended
    }

    pub fn input_token_limit(&self) -> Option<u64> {
        self.input_token_limit
    }

    pub fn output_token_limit(&self) -> Option<u64> {
        self.output_token_limit
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn supported_actions(&self) -> &[String] {
        &self.supported_actions
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn base_model(&self) -> Option<&str> {
        self.base_model.as_deref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn max_temperature(&self) -> Option<f64> {
        self.max_temperature
    }

    pub fn top_p(&self) -> Option<f64> {
        self.top_p
    }

    pub fn top_k(&self) -> Option<u64> {
        self.top_k
    }

    /// Lifecycle check. A record without a state counts as active.
    pub fn is_active(&self) -> bool {
        self.state
            .as_deref()
            .is_none_or(|s| s.trim().eq_ignore_ascii_case("active"))
    }

    /// Case-insensitive support check for a generation method such as `generateContent`.
    pub fn supports(&self, action: &str) -> bool {
        self.supported_actions
            .iter()
            .any(|a| a.eq_ignore_ascii_case(action))
    }

    /// Lowercased text the search query is matched against.
    pub(super) fn search_text(&self) -> String {
        let actions = self.supported_actions.join(" ");
        [
            self.full_id.as_str(),
            self.short_id.as_str(),
            self.display_name.as_str(),
            self.description.as_str(),
            self.family.label(),
            actions.as_str(),
        ]
        .join("\n")
        .to_lowercase()
    }
}

fn or_placeholder(s: &str) -> &str {
    if s.trim().is_empty() { PLACEHOLDER } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_id: &str) -> Option<ModelRecord> {
        ModelRecord::from_fields(
            RecordFields {
                full_id: full_id.to_string(),
                ..Default::default()
            },
            &Recommender::default(),
        )
    }

    #[test]
    fn short_id_strips_path_prefix() {
        assert_eq!(short_id("models/gemini-2.5-pro"), "gemini-2.5-pro");
        assert_eq!(short_id("a/b/c"), "c");
        assert_eq!(short_id("gemma-2b"), "gemma-2b");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(record("").is_none());
        assert!(record("   ").is_none());
    }

    #[test]
    fn derived_fields_are_set_at_construction() {
        let r = record(" models/gemini-2.5-flash ").unwrap();
        assert_eq!(r.full_id(), "models/gemini-2.5-flash");
        assert_eq!(r.short_id(), "gemini-2.5-flash");
        assert_eq!(r.family(), Family::Gemini);
        assert!(r.is_recommended());
    }

    #[test]
    fn empty_text_renders_placeholder() {
        let r = record("models/aqa").unwrap();
        assert_eq!(r.display_name(), "");
        assert_eq!(r.display_name_or_placeholder(), PLACEHOLDER);
        assert_eq!(r.description_or_placeholder(), PLACEHOLDER);
    }

    #[test]
    fn absent_state_counts_as_active() {
        let mut r = record("models/aqa").unwrap();
        assert!(r.is_active());
        r.state = Some("ACTIVE".into());
        assert!(r.is_active());
        r.state = Some("DEPRECATED".into());
        assert!(!r.is_active());
    }
}
