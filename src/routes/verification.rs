use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::ProfileVerifier;
use crate::models::{ErrorResponse, HealthResponse, VerificationRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub verifier: ProfileVerifier,
}

/// Configure all verification-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/verification/atp", web::post().to(verify_atp_profile));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// ATP profile verification endpoint
///
/// POST /api/v1/verification/atp
///
/// Request body:
/// ```json
/// {
///   "firstName": "Roger",
///   "lastName": "Federer",
///   "country": "Switzerland",
///   "age": 41,
///   "profileUrl": "https://www.atptour.com/en/players/roger-federer/f324/overview"
/// }
/// ```
///
/// A profile that could not be verified is still a 200: the signup flow
/// creates the account either way and flags it for admin review.
async fn verify_atp_profile(
    state: web::Data<AppState>,
    req: web::Json<VerificationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for verification request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let result = state.verifier.verify(&req).await;

    if !result.verified {
        tracing::info!(
            "Profile {} flagged for manual review (score {})",
            req.profile_url,
            result.score
        );
    }

    HttpResponse::Ok().json(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerificationSettings;
    use crate::models::VerificationResult;
    use crate::services::ProfileFetcher;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn create_state() -> AppState {
        let fetcher = ProfileFetcher::new(&VerificationSettings::default()).unwrap();
        AppState {
            verifier: ProfileVerifier::new(Arc::new(fetcher)),
        }
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn test_invalid_request_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verification/atp")
            .set_json(serde_json::json!({
                "firstName": "",
                "lastName": "Federer",
                "country": "Switzerland",
                "age": 41,
                "profileUrl": "https://www.atptour.com/en/players/roger-federer/f324/overview"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_disallowed_host_returns_unverified_result() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verification/atp")
            .set_json(serde_json::json!({
                "firstName": "Roger",
                "lastName": "Federer",
                "country": "Switzerland",
                "age": 41,
                "profileUrl": "https://example.com/en/players/roger-federer"
            }))
            .to_request();
        let resp: VerificationResult = test::call_and_read_body_json(&app, req).await;

        assert!(!resp.verified);
        assert_eq!(resp.score, 0);
        assert!(resp.extracted_profile.is_none());
        assert_eq!(resp.discrepancies.len(), 1);
    }
}
