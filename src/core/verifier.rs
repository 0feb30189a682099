use crate::core::{
    comparator::compare,
    extractor::extract_profile,
    observer::{ExtractionObserver, TracingObserver},
    scoring::{calculate_score, collect_discrepancies, is_verified},
};
use crate::error::VerificationError;
use crate::models::{VerificationOutcome, VerificationRequest, VerificationResult};
use crate::services::ProfileFetcher;
use chrono::Utc;
use std::sync::Arc;

/// Main verification orchestrator - runs the pipeline for one applicant
///
/// # Pipeline Stages
/// 1. URL allow-list check and page fetch
/// 2. Field extraction
/// 3. Field comparison
/// 4. Scoring
///
/// Operational failures never escape: they become a failed result with a
/// score of zero so signup can always continue.
#[derive(Clone)]
pub struct ProfileVerifier {
    fetcher: Arc<ProfileFetcher>,
    observer: Arc<dyn ExtractionObserver>,
}

impl ProfileVerifier {
    pub fn new(fetcher: Arc<ProfileFetcher>) -> Self {
        Self::with_observer(fetcher, Arc::new(TracingObserver))
    }

    pub fn with_observer(fetcher: Arc<ProfileFetcher>, observer: Arc<dyn ExtractionObserver>) -> Self {
        Self { fetcher, observer }
    }

    /// Fetch the applicant's ATP profile and score it against their claims
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        tracing::info!(
            "Verifying ATP profile for {} {}: {}",
            request.first_name,
            request.last_name,
            request.profile_url
        );

        let html = match self.fetcher.fetch(&request.profile_url).await {
            Ok(html) => html,
            Err(e) => return failure(e),
        };

        self.verify_html(request, &html)
    }

    /// Score already-fetched profile HTML against the applicant's claims
    pub fn verify_html(&self, request: &VerificationRequest, html: &str) -> VerificationResult {
        let profile = match extract_profile(html, self.observer.as_ref()) {
            Ok(profile) => profile,
            Err(e) => return failure(e),
        };

        let matches = compare(request, &profile);
        let score = calculate_score(&matches);
        let verified = is_verified(score);
        let discrepancies = collect_discrepancies(request, &profile, &matches);

        tracing::info!(
            "ATP verification for {}: score={}, verified={}, discrepancies={}",
            request.profile_url,
            score,
            verified,
            discrepancies.len()
        );

        VerificationResult {
            verified,
            score,
            matches,
            extracted_profile: Some(profile),
            discrepancies,
            outcome: VerificationOutcome::Scored,
            checked_at: Utc::now(),
        }
    }
}

fn failure(err: VerificationError) -> VerificationResult {
    tracing::warn!("ATP verification failed: {}", err);

    if err.is_fetch_failure() {
        VerificationResult::failed(
            VerificationOutcome::FetchFailed,
            format!("Could not fetch ATP profile - {}", err),
        )
    } else {
        VerificationResult::failed(
            VerificationOutcome::ParseFailed,
            format!("Could not parse ATP profile - {}", err),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerificationSettings;
    use crate::core::observer::RecordingObserver;
    use crate::models::ProfileField;

    const FEDERER_HTML: &str = r#"<html><body>
        <h1>Roger Federer</h1>
        <div class="country">Switzerland</div>
        <div class="age">41 (1981.08.08)</div>
    </body></html>"#;

    fn create_verifier() -> ProfileVerifier {
        let fetcher = ProfileFetcher::new(&VerificationSettings::default()).unwrap();
        ProfileVerifier::new(Arc::new(fetcher))
    }

    fn create_request(country: &str, age: u8) -> VerificationRequest {
        VerificationRequest {
            first_name: "Roger".to_string(),
            last_name: "Federer".to_string(),
            country: country.to_string(),
            age,
            profile_url: "https://www.atptour.com/en/players/roger-federer/f324/overview".to_string(),
        }
    }

    #[test]
    fn test_full_match() {
        let result = create_verifier().verify_html(&create_request("Switzerland", 41), FEDERER_HTML);

        assert_eq!(result.score, 100);
        assert!(result.verified);
        assert!(result.discrepancies.is_empty());
        assert_eq!(result.outcome, VerificationOutcome::Scored);
    }

    #[test]
    fn test_two_mismatches_not_verified() {
        let result = create_verifier().verify_html(&create_request("Spain", 30), FEDERER_HTML);

        assert_eq!(result.score, 50);
        assert!(!result.verified);
        assert_eq!(result.discrepancies.len(), 2);
    }

    #[test]
    fn test_unparseable_page() {
        let result = create_verifier().verify_html(
            &create_request("Switzerland", 41),
            "<html><body><p>Access denied</p></body></html>",
        );

        assert!(!result.verified);
        assert_eq!(result.score, 0);
        assert!(result.extracted_profile.is_none());
        assert_eq!(result.outcome, VerificationOutcome::ParseFailed);
        assert!(result.discrepancies[0].starts_with("Could not parse ATP profile"));
    }

    #[test]
    fn test_custom_observer_receives_attempts() {
        let fetcher = ProfileFetcher::new(&VerificationSettings::default()).unwrap();
        let observer = Arc::new(RecordingObserver::new());
        let verifier = ProfileVerifier::with_observer(Arc::new(fetcher), observer.clone());

        verifier.verify_html(&create_request("Switzerland", 41), FEDERER_HTML);

        assert_eq!(observer.strategies_for(ProfileField::Name), vec!["hero_name", "h1"]);
        assert_eq!(observer.strategies_for(ProfileField::Country), vec!["text_node"]);
    }

    #[tokio::test]
    async fn test_disallowed_host_is_fetch_failure() {
        let mut request = create_request("Switzerland", 41);
        request.profile_url = "https://example.com/en/players/roger-federer/f324/overview".to_string();

        let result = create_verifier().verify(&request).await;

        assert!(!result.verified);
        assert_eq!(result.score, 0);
        assert!(result.extracted_profile.is_none());
        assert_eq!(result.outcome, VerificationOutcome::FetchFailed);
        assert!(result.discrepancies[0].starts_with("Could not fetch ATP profile"));
    }
}
