//! Curated allow-list of models suitable for routine use.

use std::collections::HashSet;

use super::record::short_id;

/// Built-in recommended short ids (overridable through configuration).
pub const DEFAULT_RECOMMENDED: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash",
    "gemini-embedding-001",
    "text-embedding-004",
];

/// Exact-match tagger over a closed list of ids.
#[derive(Clone, Debug)]
pub struct Recommender {
    ids: HashSet<String>,
}

impl Recommender {
    /// Entries are lowercased and reduced to their short id, so
    /// `models/gemini-2.5-pro` and `gemini-2.5-pro` name the same model.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|s| short_id(s.as_ref().trim()).trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// True iff the id equals an entry, or ends with `/` followed by one.
    /// No substring matching: `gemini-2.5-flash-experimental` is not `gemini-2.5-flash`.
    pub fn is_recommended(&self, model_id: &str) -> bool {
        let id = model_id.trim().to_lowercase();
        self.ids.contains(&id) || self.ids.iter().any(|e| id.ends_with(&format!("/{e}")))
    }

    /// Entries in sorted order, for display.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMENDED)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::models::normalize;

    #[test]
    fn exact_match_only() {
        let r = Recommender::default();
        assert!(r.is_recommended("gemini-2.5-flash"));
        assert!(!r.is_recommended("gemini-2.5-flash-experimental"));
        assert!(!r.is_recommended("2.5-flash"));
        assert!(!r.is_recommended("gemini-2.5"));
    }

    #[test]
    fn matches_after_path_separator() {
        let r = Recommender::default();
        assert!(r.is_recommended("models/gemini-2.5-pro"));
        assert!(!r.is_recommended("models/gemini-2.5-pro-preview"));
        assert!(!r.is_recommended("xgemini-2.5-pro"));
    }

    #[test]
    fn matches_after_any_path_prefix() {
        let r = Recommender::default();
        assert!(r.is_recommended("x/models/gemini-2.5-pro"));
        assert!(r.is_recommended("tunedModels/base/gemini-2.0-flash"));
        assert!(!r.is_recommended("x/models/gemini-2.5-pro/extra"));
    }

    #[test]
    fn qualified_entries_reduce_to_short_ids() {
        let r = Recommender::new(["models/gemini-2.5-pro", " Models/Gemma-3-27B-IT "]);
        assert_eq!(r.ids(), vec!["gemini-2.5-pro", "gemma-3-27b-it"]);
        assert!(r.is_recommended("gemini-2.5-pro"));
        assert!(r.is_recommended("x/models/gemini-2.5-pro"));
        assert!(r.is_recommended("gemma-3-27b-it"));
    }

    #[test]
    fn qualified_entries_tag_normalized_records() {
        let r = Recommender::new(["models/gemini-2.5-pro"]);
        let records = normalize(
            &[
                json!({"name": "models/gemini-2.5-pro"}),
                json!({"name": "models/gemini-2.5-flash"}),
            ],
            &r,
        );
        assert!(records[0].is_recommended());
        assert!(!records[1].is_recommended());
    }

    #[test]
    fn case_insensitive_both_ways() {
        let r = Recommender::new(["Gemma-3-27B-IT"]);
        assert!(r.is_recommended("gemma-3-27b-it"));
        assert!(r.is_recommended("GEMMA-3-27B-IT"));
    }

    #[test]
    fn unknown_ids_default_to_false() {
        let r = Recommender::new(Vec::<String>::new());
        assert!(!r.is_recommended("gemini-2.5-pro"));
        assert!(!r.is_recommended(""));
    }

    #[test]
    fn ids_are_sorted_and_blank_entries_dropped() {
        let r = Recommender::new(["b", " ", "a"]);
        assert_eq!(r.ids(), vec!["a", "b"]);
    }
}
