// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    ExtractedProfile, MatchFlags, ProfileField, VerificationOutcome, VerificationRequest,
    VerificationResult,
};
pub use responses::{ErrorResponse, HealthResponse};
