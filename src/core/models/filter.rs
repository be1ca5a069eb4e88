//! Filter pipeline: text query, family allow-list, and flag filters.

use std::collections::BTreeSet;

use super::family::Family;
use super::record::ModelRecord;

/// Generation method offered by text models.
pub const TEXT_ACTION: &str = "generateContent";
/// Generation method offered by embedding models.
pub const EMBED_ACTION: &str = "embedContent";

/// User-supplied filter criteria. The default matches every record.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over ids, names, description, family and actions.
    /// Matched verbatim, surrounding whitespace included.
    pub text_query: String,
    pub families: BTreeSet<Family>,
    pub recommended_only: bool,
    /// Excludes records whose lifecycle state is present and not "active".
    pub active_only: bool,
    /// Every listed action must be supported (case-insensitive).
    pub required_actions: Vec<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            families: Family::ALL.into_iter().collect(),
            recommended_only: false,
            active_only: false,
            required_actions: Vec::new(),
        }
    }
}

impl FilterCriteria {
    /// Toggle a required action on or off.
    pub fn set_action(&mut self, action: &str, required: bool) {
        self.required_actions
            .retain(|a| !a.eq_ignore_ascii_case(action));
        if required {
            self.required_actions.push(action.to_string());
        }
    }

    pub fn requires(&self, action: &str) -> bool {
        self.required_actions
            .iter()
            .any(|a| a.eq_ignore_ascii_case(action))
    }

    /// Restrict to models supporting `generateContent`.
    pub fn text_only(mut self) -> Self {
        self.set_action(TEXT_ACTION, true);
        self
    }

    /// Restrict to models supporting `embedContent`.
    pub fn embeddings_only(mut self) -> Self {
        self.set_action(EMBED_ACTION, true);
        self
    }

    /// Flip one family in the allow-list.
    pub fn toggle_family(&mut self, family: Family) {
        if !self.families.remove(&family) {
            self.families.insert(family);
        }
    }

    pub fn matches(&self, record: &ModelRecord) -> bool {
        if !self.families.contains(&record.family()) {
            return false;
        }
        if self.recommended_only && !record.is_recommended() {
            return false;
        }
        if self.active_only && !record.is_active() {
            return false;
        }
        if !self.required_actions.iter().all(|a| record.supports(a)) {
            return false;
        }
        self.text_query.is_empty()
            || record
                .search_text()
                .contains(&self.text_query.to_lowercase())
    }
}

/// Records matching `criteria`, in input order.
pub fn filter<'a>(records: &'a [ModelRecord], criteria: &FilterCriteria) -> Vec<&'a ModelRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::models::{Recommender, normalize};

    fn sample() -> Vec<ModelRecord> {
        let raw = vec![
            json!({"name": "models/gemini-2.5-flash", "displayName": "Gemini 2.5 Flash",
                   "supportedGenerationMethods": ["generateContent"], "state": "ACTIVE"}),
            json!({"name": "models/text-embedding-004", "description": "Legacy embeddings",
                   "supportedGenerationMethods": ["embedContent"]}),
            json!({"name": "models/gemini-1.0-pro", "state": "DEPRECATED",
                   "supportedGenerationMethods": ["generateContent"]}),
            json!({"name": "models/gemma-3-27b-it", "description": "Open weights",
                   "supportedGenerationMethods": ["generateContent", "countTokens"]}),
            json!({"name": "models/gemini-2.0-flash-live-001",
                   "supportedGenerationMethods": ["bidiGenerateContent"]}),
            json!({"name": "models/aqa"}),
        ];
        normalize(&raw, &Recommender::default())
    }

    fn ids(records: &[&ModelRecord]) -> Vec<String> {
        records.iter().map(|r| r.short_id().to_string()).collect()
    }

    #[test]
    fn default_criteria_is_identity() {
        let records = sample();
        let out: Vec<ModelRecord> = filter(&records, &FilterCriteria::default())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(out, records);
        assert!(filter(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let records = sample();
        let criteria = FilterCriteria {
            text_query: "gem".into(),
            ..Default::default()
        };
        let out = ids(&filter(&records, &criteria));
        assert_eq!(
            out,
            vec![
                "gemini-2.5-flash",
                "gemini-1.0-pro",
                "gemma-3-27b-it",
                "gemini-2.0-flash-live-001"
            ]
        );

        let mut reversed = records.clone();
        reversed.reverse();
        let out_rev = ids(&filter(&reversed, &criteria));
        let mut expected = out.clone();
        expected.reverse();
        assert_eq!(out_rev, expected);
    }

    #[test]
    fn text_query_is_case_insensitive_across_fields() {
        let records = sample();
        let by = |q: &str| {
            let criteria = FilterCriteria {
                text_query: q.into(),
                ..Default::default()
            };
            ids(&filter(&records, &criteria))
        };
        assert_eq!(by("OPEN WEIGHTS"), vec!["gemma-3-27b-it"]);
        assert_eq!(by("gemini 2.5 flash"), vec!["gemini-2.5-flash"]);
        assert_eq!(by("bidigenerate"), vec!["gemini-2.0-flash-live-001"]);
        // family label is searchable
        assert_eq!(by("audio / live"), vec!["gemini-2.0-flash-live-001"]);
        assert_eq!(by("models/aqa"), vec!["aqa"]);
        assert!(by("no-such-model").is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_query() {
        let records = sample();
        let by = |q: &str| {
            let criteria = FilterCriteria {
                text_query: q.into(),
                ..Default::default()
            };
            ids(&filter(&records, &criteria))
        };
        assert_eq!(by(" flash"), vec!["gemini-2.5-flash"]);
        assert!(by(" aqa").is_empty());
    }

    #[test]
    fn family_allowlist_excludes_others() {
        let records = sample();
        let criteria = FilterCriteria {
            families: [Family::Gemma, Family::Other].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &criteria)), vec!["gemma-3-27b-it", "aqa"]);

        let none = FilterCriteria {
            families: BTreeSet::new(),
            ..Default::default()
        };
        assert!(filter(&records, &none).is_empty());
    }

    #[test]
    fn recommended_only() {
        let records = sample();
        let criteria = FilterCriteria {
            recommended_only: true,
            ..Default::default()
        };
        assert_eq!(
            ids(&filter(&records, &criteria)),
            vec!["gemini-2.5-flash", "text-embedding-004"]
        );
    }

    #[test]
    fn active_only_keeps_records_without_state() {
        let records = sample();
        let criteria = FilterCriteria {
            active_only: true,
            ..Default::default()
        };
        let out = ids(&filter(&records, &criteria));
        assert!(!out.contains(&"gemini-1.0-pro".to_string()));
        assert_eq!(out.len(), records.len() - 1);
    }

    #[test]
    fn action_filters() {
        let records = sample();
        let text = FilterCriteria::default().text_only();
        assert_eq!(
            ids(&filter(&records, &text)),
            vec!["gemini-2.5-flash", "gemini-1.0-pro", "gemma-3-27b-it"]
        );
        let embed = FilterCriteria::default().embeddings_only();
        assert_eq!(ids(&filter(&records, &embed)), vec!["text-embedding-004"]);
        let both = FilterCriteria::default().text_only().embeddings_only();
        assert!(filter(&records, &both).is_empty());
    }

    #[test]
    fn set_action_toggles_without_duplicates() {
        let mut c = FilterCriteria::default();
        c.set_action(TEXT_ACTION, true);
        c.set_action("GENERATECONTENT", true);
        assert_eq!(c.required_actions.len(), 1);
        assert!(c.requires(TEXT_ACTION));
        c.set_action(TEXT_ACTION, false);
        assert!(c.required_actions.is_empty());
    }

    #[test]
    fn toggle_family_flips_membership() {
        let mut c = FilterCriteria::default();
        c.toggle_family(Family::Other);
        assert!(!c.families.contains(&Family::Other));
        c.toggle_family(Family::Other);
        assert!(c.families.contains(&Family::Other));
    }

    #[test]
    fn filtering_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let criteria = FilterCriteria {
            text_query: "flash".into(),
            recommended_only: true,
            ..Default::default()
        };
        let _ = filter(&records, &criteria);
        assert_eq!(records, before);
    }
}
