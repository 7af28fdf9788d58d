//! API client for the URL-categorization REST API.
//!
//! This module provides the `ApiClient` struct for logging in, classifying
//! URLs in fixed-size batches and logging out again.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, info, warn};

use crate::auth::{derive_credential_now, Credentials, SessionToken};
use crate::models::{ClassificationResult, LoginRequest};
use crate::utils::split;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Endpoint (relative to the base URL) for login and logout
pub const DEFAULT_AUTH_ENDPOINT: &str = "authenticatedSession";

/// Endpoint (relative to the base URL) for URL classification
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "urlLookup";

/// Cookie carrying the session token
pub const DEFAULT_SESSION_COOKIE: &str = "JSESSIONID";

/// Largest batch the lookup endpoint accepts.
pub const MAX_CHUNK_SIZE: usize = 100;

/// Pause between successful lookup requests, in seconds.
pub const DEFAULT_CHUNK_DELAY_SECS: u64 = 2;

/// Connection and batching settings for an `ApiClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub auth_endpoint: String,
    pub lookup_endpoint: String,
    pub session_cookie: String,
    pub chunk_size: usize,
    pub chunk_delay: Duration,
    /// Per-request timeout; `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            chunk_size: MAX_CHUNK_SIZE,
            chunk_delay: Duration::from_secs(DEFAULT_CHUNK_DELAY_SECS),
            request_timeout: None,
        }
    }
}

/// API client for the URL-categorization service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    settings: ApiSettings,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, settings })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn session_headers(&self, token: &SessionToken) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            header::HeaderValue::from_str(&format!(
                "{}={}",
                self.settings.session_cookie,
                token.as_str()
            ))
            .context("Session token is not a valid cookie value")?,
        );
        Ok(headers)
    }

    // ===== Session =====

    /// Authenticate and return the session token from the response cookie.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let derived = derive_credential_now(&credentials.api_key)
            .context("Failed to derive API key from seed")?;
        let url = self.endpoint_url(&self.settings.auth_endpoint);

        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
            api_key: &derived.key,
            timestamp: derived.timestamp_ms,
        };

        debug!(url = %url, username = %credentials.username, "Sending authentication request");
        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send authentication request")?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::authentication(status, &body).into());
        }

        let cookie_name = &self.settings.session_cookie;
        let token = response
            .cookies()
            .find(|c| c.name() == cookie_name.as_str())
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty());

        match token {
            Some(token) => Ok(SessionToken::new(token)),
            None => Err(ApiError::MissingToken {
                cookie: cookie_name.clone(),
            }
            .into()),
        }
    }

    /// End the session. Failures are logged and never returned.
    pub async fn logout(&self, token: &SessionToken) {
        match self.try_logout(token).await {
            Ok(()) => info!("Successfully logged out"),
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(error = %error, "Logout failed");
            }
        }
    }

    async fn try_logout(&self, token: &SessionToken) -> Result<()> {
        let url = self.endpoint_url(&self.settings.auth_endpoint);

        let response = self
            .client
            .delete(&url)
            .headers(self.session_headers(token)?)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Logout(format!(
                "Status {}: {}",
                status,
                ApiError::truncate_body(&body)
            ))
            .into());
        }
        Ok(())
    }

    // ===== Lookup =====

    /// Classify `urls` in chunks of `chunk_size`, preserving input order.
    ///
    /// A chunk that fails (non-200, transport error, unparseable body) is
    /// logged and skipped, so the result may hold fewer entries than `urls`.
    pub async fn lookup(
        &self,
        token: &SessionToken,
        urls: &[String],
    ) -> Result<Vec<ClassificationResult>> {
        let url = self.endpoint_url(&self.settings.lookup_endpoint);

        let mut headers = self.session_headers(token)?;
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let chunks = split(urls, self.settings.chunk_size);
        let total = chunks.len();
        let mut results = Vec::with_capacity(urls.len());
        let mut failed = 0;

        for (index, chunk) in chunks.enumerate() {
            let number = index + 1;
            match self.lookup_chunk(&url, &headers, number, chunk).await {
                Ok(batch) => {
                    debug!(chunk = number, total, returned = batch.len(), "Chunk classified");
                    results.extend(batch);

                    // Rate limit between requests
                    if number < total && !self.settings.chunk_delay.is_zero() {
                        tokio::time::sleep(self.settings.chunk_delay).await;
                    }
                }
                Err(e) => {
                    failed += 1;
                    warn!(chunk = number, total, urls = ?chunk, error = %e, "Lookup request failed, skipping chunk");
                }
            }
        }

        info!(
            requested = urls.len(),
            classified = results.len(),
            failed_chunks = failed,
            "Lookup finished"
        );
        Ok(results)
    }

    async fn lookup_chunk(
        &self,
        url: &str,
        headers: &header::HeaderMap,
        number: usize,
        chunk: &[String],
    ) -> Result<Vec<ClassificationResult>, ApiError> {
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(chunk)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::chunk_request(number, status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("chunk {}: {}", number, e)))
    }
}
