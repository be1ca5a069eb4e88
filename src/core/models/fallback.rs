//! Static fallback catalog, served when the live listing fails or is empty.
//!
//! Entries are loaded from `config/fallback-models.json` (embedded at compile time,
//! validated by `build.rs`) and go through the same normalizer as live data.

use std::sync::OnceLock;

use serde_json::Value;

use super::normalize::normalize;
use super::recommend::Recommender;
use super::record::ModelRecord;

static FALLBACK_DESCRIPTORS: OnceLock<Vec<Value>> = OnceLock::new();

fn load_descriptors() -> Vec<Value> {
    let json = include_str!("../../../config/fallback-models.json");
    serde_json::from_str(json).expect("fallback-models.json must be valid")
}

/// Raw fallback descriptors, parsed on first access.
pub fn fallback_descriptors() -> &'static [Value] {
    FALLBACK_DESCRIPTORS.get_or_init(load_descriptors)
}

/// Immutable set of curated records. Share it with `Arc`; filtering only narrows a view.
#[derive(Debug)]
pub struct FallbackCatalog {
    records: Vec<ModelRecord>,
}

impl FallbackCatalog {
    /// The built-in catalog, tagged with `recommender`.
    pub fn builtin(recommender: &Recommender) -> Self {
        Self {
            records: normalize(fallback_descriptors(), recommender),
        }
    }

    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Family, FilterCriteria, filter};

    #[test]
    fn every_fallback_entry_becomes_a_record() {
        let catalog = FallbackCatalog::builtin(&Recommender::default());
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), fallback_descriptors().len());
    }

    #[test]
    fn fallback_covers_every_family() {
        let catalog = FallbackCatalog::builtin(&Recommender::default());
        for family in Family::ALL {
            assert!(
                catalog.records().iter().any(|r| r.family() == family),
                "no fallback entry for {}",
                family
            );
        }
    }

    #[test]
    fn searching_embedding_returns_only_embedding_entries() {
        let catalog = FallbackCatalog::builtin(&Recommender::default());
        let criteria = FilterCriteria {
            text_query: "embedding".into(),
            ..Default::default()
        };
        let out = filter(catalog.records(), &criteria);
        assert!(!out.is_empty());
        for r in &out {
            let haystack = format!("{} {} {}", r.full_id(), r.family(), r.description())
                .to_lowercase();
            assert!(haystack.contains("embedding"), "unexpected match {}", r.full_id());
        }
        assert!(out.iter().all(|r| r.family() == Family::Embeddings));
    }

    #[test]
    fn filtering_leaves_catalog_untouched() {
        let catalog = FallbackCatalog::builtin(&Recommender::default());
        let before = catalog.records().to_vec();
        let criteria = FilterCriteria {
            recommended_only: true,
            ..Default::default()
        };
        let narrowed = filter(catalog.records(), &criteria);
        assert!(narrowed.len() < before.len());
        assert_eq!(catalog.records(), before.as_slice());
    }
}
