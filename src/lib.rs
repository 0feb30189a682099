//! GameSetMatch verify - ATP profile verification for player signup
//!
//! This library cross-checks the identity a tennis player submits at signup
//! against their public ATP tour profile and scores how well they agree.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_profile, ExtractionObserver, ProfileVerifier};
pub use error::VerificationError;
pub use models::{ExtractedProfile, MatchFlags, VerificationOutcome, VerificationRequest, VerificationResult};
pub use services::ProfileFetcher;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let profile = extract_profile(
            "<h1>Roger Federer</h1>",
            &crate::core::RecordingObserver::new(),
        )
        .unwrap();
        assert_eq!(profile.last_name, "Federer");
    }
}
