use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identity claims submitted by a player during signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerificationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(range(min = 1, max = 120))]
    pub age: u8,
    #[validate(length(min = 1))]
    #[serde(alias = "profile_url", rename = "profileUrl")]
    pub profile_url: String,
}

/// Player data recovered from an ATP profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub country: String,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Zero when the page carried no usable age
    pub age: u8,
    #[serde(rename = "currentRanking", default)]
    pub current_ranking: Option<u32>,
    #[serde(rename = "profileExists")]
    pub profile_exists: bool,
}

/// Per-field comparison outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    #[serde(rename = "firstName")]
    pub first_name: bool,
    #[serde(rename = "lastName")]
    pub last_name: bool,
    pub country: bool,
    pub age: bool,
}

impl MatchFlags {
    pub fn count(&self) -> u8 {
        [self.first_name, self.last_name, self.country, self.age]
            .iter()
            .filter(|m| **m)
            .count() as u8
    }
}

/// Coarse verdict of one verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    Scored,
    FetchFailed,
    ParseFailed,
}

/// Output of the profile verifier, handed back to the signup flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    pub score: u8,
    pub matches: MatchFlags,
    #[serde(rename = "extractedProfile")]
    pub extracted_profile: Option<ExtractedProfile>,
    pub discrepancies: Vec<String>,
    pub outcome: VerificationOutcome,
    #[serde(rename = "checkedAt")]
    pub checked_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Result for a call that never produced a profile
    pub fn failed(outcome: VerificationOutcome, discrepancy: String) -> Self {
        Self {
            verified: false,
            score: 0,
            matches: MatchFlags::default(),
            extracted_profile: None,
            discrepancies: vec![discrepancy],
            outcome,
            checked_at: Utc::now(),
        }
    }
}

/// Profile field being recovered by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Country,
    Age,
    Ranking,
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProfileField::Name => "name",
            ProfileField::Country => "country",
            ProfileField::Age => "age",
            ProfileField::Ranking => "ranking",
        };
        f.write_str(label)
    }
}
