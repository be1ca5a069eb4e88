//! Model discovery: normalization, classification, filtering, and fallback.

mod fallback;
mod family;
mod fetch;
mod filter;
mod normalize;
mod recommend;
mod record;
mod session;

pub use fallback::FallbackCatalog;
pub use family::Family;
pub use fetch::{FetchError, ModelSource};
pub use filter::{EMBED_ACTION, FilterCriteria, TEXT_ACTION, filter};
pub use normalize::normalize;
pub use recommend::{DEFAULT_RECOMMENDED, Recommender};
pub use record::{ModelRecord, PLACEHOLDER};
pub use session::{FallbackReason, FetchOutcome, Listing, Notice, Session, fetch_outcome};
