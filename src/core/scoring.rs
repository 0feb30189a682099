use crate::models::{ExtractedProfile, MatchFlags, VerificationRequest};

/// Points awarded for every matching field
pub const POINTS_PER_FIELD: u8 = 25;

/// Minimum score for a profile to count as verified (three of four fields)
pub const VERIFIED_THRESHOLD: u8 = 75;

/// Label used for the extracted side of a discrepancy
const SOURCE_LABEL: &str = "ATP";

/// Calculate the verification score (0-100) from the match flags
///
/// score = 25 * (number of matching fields)
#[inline]
pub fn calculate_score(matches: &MatchFlags) -> u8 {
    POINTS_PER_FIELD * matches.count()
}

#[inline]
pub fn is_verified(score: u8) -> bool {
    score >= VERIFIED_THRESHOLD
}

/// Describe every field that failed to match, in field order
pub fn collect_discrepancies(
    request: &VerificationRequest,
    profile: &ExtractedProfile,
    matches: &MatchFlags,
) -> Vec<String> {
    let extracted_age = if profile.age > 0 {
        profile.age.to_string()
    } else {
        String::new()
    };

    let fields = [
        (matches.first_name, "First name", request.first_name.clone(), profile.first_name.clone()),
        (matches.last_name, "Last name", request.last_name.clone(), profile.last_name.clone()),
        (matches.country, "Country", request.country.clone(), profile.country.clone()),
        (matches.age, "Age", request.age.to_string(), extracted_age),
    ];

    fields
        .into_iter()
        .filter(|(matched, ..)| !matched)
        .map(|(_, label, submitted, extracted)| discrepancy(label, &submitted, &extracted))
        .collect()
}

fn discrepancy(label: &str, submitted: &str, extracted: &str) -> String {
    let extracted = if extracted.trim().is_empty() {
        "unknown"
    } else {
        extracted
    };
    format!("{}: \"{}\" vs {} \"{}\"", label, submitted, SOURCE_LABEL, extracted)
}
