//! Fetch orchestration: one listing per session, fallback on error or empty result.

use std::sync::Arc;

use super::fallback::FallbackCatalog;
use super::fetch::{FetchError, GeminiClient, ModelSource};
use super::normalize::normalize_listing;
use super::recommend::Recommender;
use super::record::ModelRecord;
use crate::core::config::Config;

/// Result of a single listing attempt, after normalization.
#[derive(Debug)]
pub enum FetchOutcome {
    Succeeded(Vec<ModelRecord>),
    /// The source answered, but no usable record came out of it.
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn from_records(records: Vec<ModelRecord>) -> Self {
        if records.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Succeeded(records)
        }
    }
}

/// List, normalize, and classify once. Errors are logged and captured, never raised.
pub async fn fetch_outcome<S: ModelSource>(source: &S, recommender: &Recommender) -> FetchOutcome {
    let (records, error) = normalize_listing(source.list_models().await, recommender);
    match error {
        Some(e) => {
            log::warn!("Model listing failed: {}", e);
            FetchOutcome::Failed(e)
        }
        None => {
            log::info!("Model listing returned {} record(s)", records.len());
            FetchOutcome::from_records(records)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NoModels,
    FetchFailed(String),
}

/// Message to show above a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Info(String),
}

/// What the presentation layer renders: live records or the fallback catalog.
#[derive(Debug, Clone)]
pub enum Listing {
    Live(Vec<ModelRecord>),
    Fallback {
        catalog: Arc<FallbackCatalog>,
        reason: FallbackReason,
    },
}

impl Listing {
    /// Empty and failed outcomes both route to the fallback catalog.
    pub fn from_outcome(outcome: FetchOutcome, fallback: Arc<FallbackCatalog>) -> Self {
        match outcome {
            FetchOutcome::Succeeded(records) => Listing::Live(records),
            FetchOutcome::Empty => Listing::Fallback {
                catalog: fallback,
                reason: FallbackReason::NoModels,
            },
            FetchOutcome::Failed(e) => Listing::Fallback {
                catalog: fallback,
                reason: FallbackReason::FetchFailed(e.to_string()),
            },
        }
    }

    pub fn records(&self) -> &[ModelRecord] {
        match self {
            Listing::Live(records) => records,
            Listing::Fallback { catalog, .. } => catalog.records(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Listing::Fallback { .. })
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            Listing::Live(_) => None,
            Listing::Fallback {
                reason: FallbackReason::FetchFailed(msg),
                ..
            } => Some(Notice::Warning(format!(
                "Could not list models ({}). Showing the built-in catalog.",
                msg
            ))),
            Listing::Fallback {
                reason: FallbackReason::NoModels,
                ..
            } => Some(Notice::Info(
                "The API returned no models for this key. Showing the built-in catalog."
                    .to_string(),
            )),
        }
    }
}

/// Request-scoped context: listing source, tagging policy, fallback handle, and cached listing.
pub struct Session<S> {
    source: Arc<S>,
    recommender: Recommender,
    fallback: Arc<FallbackCatalog>,
    cached: Option<Listing>,
}

impl<S: ModelSource> Session<S> {
    pub fn new(source: S, recommender: Recommender, fallback: Arc<FallbackCatalog>) -> Self {
        Self {
            source: Arc::new(source),
            recommender,
            fallback,
            cached: None,
        }
    }

    /// Cached listing, fetching it first if needed. No retries.
    pub async fn listing(&mut self) -> &Listing {
        let listing = match self.cached.take() {
            Some(listing) => listing,
            None => {
                let outcome = fetch_outcome(self.source.as_ref(), &self.recommender).await;
                Listing::from_outcome(outcome, Arc::clone(&self.fallback))
            }
        };
        self.cached.insert(listing)
    }

    /// Store an outcome fetched elsewhere (e.g. on a background thread).
    pub fn install(&mut self, outcome: FetchOutcome) -> &Listing {
        let listing = Listing::from_outcome(outcome, Arc::clone(&self.fallback));
        self.cached.insert(listing)
    }

    pub fn cached(&self) -> Option<&Listing> {
        self.cached.as_ref()
    }

    /// Drop the cached listing; the next `listing()` call fetches again.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn fallback(&self) -> &Arc<FallbackCatalog> {
        &self.fallback
    }
}

impl Session<GeminiClient> {
    /// Session against the Gemini API, tagged with the configured recommended list.
    pub fn connect(config: &Config) -> Result<Self, FetchError> {
        let recommender = Recommender::new(&config.recommended_models);
        let fallback = Arc::new(FallbackCatalog::builtin(&recommender));
        Ok(Self::new(GeminiClient::new(config)?, recommender, fallback))
    }
}
