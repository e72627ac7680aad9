//! Unofficial LinkedIn profile lookup client.

use crate::error::LinkedInError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Default retry configuration
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;
const DEFAULT_MAX_BACKOFF_MS: u64 = 8000;

/// Client for the unofficial cookie-session profile API.
///
/// The session cookie and CSRF token are stored as `SecretString` to keep
/// them out of logs and debug output. Every call can fail transiently
/// (throttling, challenge walls); callers treat the whole client as a
/// best-effort data source.
#[derive(Clone)]
pub struct LinkedInClient {
    client: Client,
    base_url: String,
    session_cookie: SecretString,
    csrf_token: SecretString,
}

impl LinkedInClient {
    /// Create a new client from an authenticated browser session.
    pub fn new(
        session_cookie: impl Into<String>,
        csrf_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LinkedInError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            session_cookie: SecretString::new(session_cookie.into()),
            csrf_token: SecretString::new(csrf_token.into()),
        })
    }

    /// Fetch a profile view by public handle.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self, handle: &str) -> Result<ProfileData, LinkedInError> {
        let csrf = self.csrf_token.expose_secret().to_string();
        let response = self
            .client
            .get(format!(
                "{}/identity/profiles/{}/profileView",
                self.base_url, handle
            ))
            .header(
                "Cookie",
                format!(
                    "li_at={}; JSESSIONID=\"{}\"",
                    self.session_cookie.expose_secret(),
                    csrf
                ),
            )
            .header("csrf-token", csrf)
            .header("x-restli-protocol-version", "2.0.0")
            .send()
            .await?;

        let view = self.handle_response::<ProfileView>(response).await?;
        Ok(view.into())
    }

    /// Fetch a profile with bounded retry and exponential backoff.
    ///
    /// Retries only transient failures; authentication and challenge errors
    /// are returned immediately since retrying cannot fix them.
    #[instrument(skip(self))]
    pub async fn fetch_with_retry(
        &self,
        handle: &str,
        max_retries: Option<u32>,
    ) -> Result<ProfileData, LinkedInError> {
        let max_retries = max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        let mut backoff_ms = DEFAULT_INITIAL_BACKOFF_MS;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                debug!("Retry attempt {} after {}ms backoff", attempt, backoff_ms);
                sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(DEFAULT_MAX_BACKOFF_MS);
            }

            match self.fetch_profile(handle).await {
                Ok(data) => return Ok(data),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!("Profile fetch failed (attempt {}): {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(LinkedInError::Api {
            status: 0,
            message: "Max retries exceeded".into(),
        }))
    }

    /// Fetch a profile picture. Independent sub-step; callers swallow
    /// failures.
    #[instrument(skip(self))]
    pub async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, LinkedInError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(LinkedInError::Api {
                status: response.status().as_u16(),
                message: "picture fetch failed".into(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, LinkedInError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(LinkedInError::from)
        } else {
            Err(Self::extract_error(response).await)
        }
    }

    async fn extract_error(response: reqwest::Response) -> LinkedInError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Profile lookup throttled");
                LinkedInError::Throttled
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Session cookie rejected");
                LinkedInError::Unauthorized
            }
            StatusCode::FORBIDDEN => {
                let message = response.text().await.unwrap_or_default();
                if message.to_lowercase().contains("challenge") {
                    warn!("Challenge verification wall raised");
                    LinkedInError::Challenge
                } else {
                    LinkedInError::Api {
                        status: status.as_u16(),
                        message,
                    }
                }
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                LinkedInError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
