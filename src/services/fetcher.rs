use crate::config::VerificationSettings;
use crate::error::VerificationError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Url};
use std::time::Duration;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP client for ATP profile pages
///
/// Only URLs on allow-listed hosts are ever requested. Redirects are not
/// followed, so a 3xx surfaces as `HttpStatus` instead of leaving the
/// allow-list. Each fetch is a single GET with no retries; the client timeout
/// bounds how long it may take.
pub struct ProfileFetcher {
    client: Client,
    allowed_hosts: Vec<String>,
    profile_path_marker: String,
    user_agent: String,
    accept_language: String,
    timeout: Duration,
}

impl ProfileFetcher {
    /// Create a new fetcher from the verification settings
    pub fn new(settings: &VerificationSettings) -> Result<Self, VerificationError> {
        let timeout = Duration::from_secs(settings.timeout_secs);

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(VerificationError::ClientBuild)?;

        Ok(Self {
            client,
            allowed_hosts: settings
                .allowed_hosts
                .iter()
                .map(|host| host.trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
            profile_path_marker: settings.profile_path_marker.clone(),
            user_agent: settings.user_agent.clone(),
            accept_language: settings.accept_language.clone(),
            timeout,
        })
    }

    /// Check that a profile URL points at an allow-listed host and looks like
    /// a player profile. No network I/O happens here.
    pub fn validate_url(&self, profile_url: &str) -> Result<Url, VerificationError> {
        let invalid = || VerificationError::InvalidUrlHost(profile_url.to_string());

        let url = Url::parse(profile_url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        let host = url.host_str().ok_or_else(invalid)?.to_ascii_lowercase();
        let host_allowed = self
            .allowed_hosts
            .iter()
            .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)));

        if !host_allowed || !url.path().contains(&self.profile_path_marker) {
            return Err(invalid());
        }

        Ok(url)
    }

    /// Fetch the raw HTML of a profile page
    pub async fn fetch(&self, profile_url: &str) -> Result<String, VerificationError> {
        let url = self.validate_url(profile_url)?;

        tracing::debug!("Fetching ATP profile from: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("ATP profile request for {} returned {}", profile_url, status);
            return Err(VerificationError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.request_error(e))
    }

    fn request_error(&self, err: reqwest::Error) -> VerificationError {
        if err.is_timeout() {
            VerificationError::Timeout(self.timeout)
        } else {
            VerificationError::Network(err)
        }
    }
}
