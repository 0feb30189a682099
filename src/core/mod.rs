// Core verification pipeline exports
pub mod comparator;
pub mod extractor;
pub mod observer;
pub mod scoring;
pub mod verifier;

pub use comparator::{age_matches, compare, country_matches, normalize, text_matches};
pub use extractor::{extract_profile, split_name, AgeReading};
pub use observer::{Attempt, ExtractionObserver, RecordingObserver, TracingObserver};
pub use scoring::{calculate_score, collect_discrepancies, is_verified, POINTS_PER_FIELD, VERIFIED_THRESHOLD};
pub use verifier::ProfileVerifier;
