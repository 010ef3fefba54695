// crates/secret-gate-github/src/client.rs
// ============================================================================
// Module: GitHub REST Client
// Description: Authenticated GET/POST calls with strict transport limits.
// Purpose: Fetch alerts and policy text and post PR comments, fail closed.
// Dependencies: secret-gate-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! The client issues bounded blocking requests against the GitHub REST API.
//! Redirects are not followed, responses are read under a hard byte limit,
//! and any non-success status aborts immediately with the endpoint and
//! status recorded. Cleartext HTTP is rejected unless explicitly allowed
//! (loopback test servers).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use secret_gate_core::Alert;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// GitHub API transport and protocol errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - No variant is retried; every error aborts the run.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// An endpoint URL could not be constructed from the API base.
    #[error("invalid endpoint for api base `{0}`")]
    Endpoint(String),
    /// Cleartext HTTP was requested without being explicitly allowed.
    #[error("cleartext http is not allowed for `{0}`")]
    CleartextBlocked(String),
    /// The request failed to send or timed out.
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status {
        /// Endpoint the request targeted.
        endpoint: String,
        /// HTTP status code received.
        status: u16,
    },
    /// The response body exceeded the configured size limit.
    #[error("response from {endpoint} exceeds the {limit} byte limit")]
    ResponseTooLarge {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Configured byte limit.
        limit: usize,
    },
    /// The response body could not be read from the connection.
    #[error("failed to read response from {endpoint}")]
    ResponseRead {
        /// Endpoint the request targeted.
        endpoint: String,
    },
    /// The response body was not the expected JSON shape.
    #[error("response from {endpoint} is not valid JSON: {source}")]
    Decode {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The response body was not valid UTF-8 text.
    #[error("response from {endpoint} is not valid UTF-8")]
    NotText {
        /// Endpoint the request targeted.
        endpoint: String,
    },
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the GitHub client.
///
/// # Invariants
/// - `timeout_ms` applies to the full lifecycle of every request.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `allow_http = false` blocks cleartext `http://` API bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubClientConfig {
    /// Base URL of the REST API.
    pub api_base: Url,
    /// Bearer token sent with every request.
    pub token: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Allow cleartext HTTP (loopback test servers only).
    pub allow_http: bool,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl GithubClientConfig {
    /// Creates a configuration for the given API base and token with
    /// defaults for the remaining limits.
    #[must_use]
    pub fn new(api_base: Url, token: String) -> Self {
        Self {
            api_base,
            token,
            timeout_ms: 10_000,
            max_response_bytes: 4 * 1024 * 1024,
            allow_http: false,
            user_agent: "secret-gate/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Comment creation payload for the issues API.
#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    /// Markdown body of the comment.
    body: &'a str,
}

/// Blocking GitHub REST client with strict transport limits.
///
/// # Invariants
/// - Redirects are never followed.
/// - Every response body is read under `max_response_bytes`.
/// - No request is retried.
#[derive(Debug)]
pub struct GithubClient {
    /// Client configuration, including limits and credentials.
    config: GithubClientConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl GithubClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the API base uses a blocked scheme or the
    /// HTTP client cannot be constructed.
    pub fn new(config: GithubClientConfig) -> Result<Self, ApiError> {
        match config.api_base.scheme() {
            "https" => {}
            "http" if config.allow_http => {}
            _ => return Err(ApiError::CleartextBlocked(config.api_base.to_string())),
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Fetches the open secret-scanning alerts for a repository, in
    /// upstream order. A single page is assumed; no pagination is handled.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status,
    /// oversized response, or unexpected payload shape.
    pub fn fetch_alerts(&self, repository: &str) -> Result<Vec<Alert>, ApiError> {
        let url = self.endpoint(repository, &["secret-scanning", "alerts"])?;
        let endpoint = url.to_string();
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        let body = self.send_limited(request, &endpoint)?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            endpoint,
            source,
        })
    }

    /// Fetches the raw text of a file from a configuration repository.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status,
    /// oversized response, or a body that is not UTF-8 text.
    pub fn fetch_raw_file(&self, repository: &str, path: &str) -> Result<String, ApiError> {
        let mut segments = vec!["contents"];
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        let url = self.endpoint(repository, &segments)?;
        let endpoint = url.to_string();
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.raw+json");
        let body = self.send_limited(request, &endpoint)?;
        String::from_utf8(body).map_err(|_| ApiError::NotText {
            endpoint,
        })
    }

    /// Posts a comment on a pull request via the issues API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    pub fn post_pr_comment(
        &self,
        repository: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        let number = pr_number.to_string();
        let url = self.endpoint(repository, &["issues", &number, "comments"])?;
        let endpoint = url.to_string();
        let request = self
            .client
            .post(url)
            .header("Accept", "application/vnd.github+json")
            .json(&CommentBody {
                body,
            });
        self.send_limited(request, &endpoint)?;
        Ok(())
    }

    /// Builds a `repos/{repository}/...` endpoint under the API base.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Endpoint`] when the base URL cannot carry path
    /// segments.
    fn endpoint(&self, repository: &str, tail: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.api_base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::Endpoint(self.config.api_base.to_string()))?;
            path.pop_if_empty();
            path.push("repos");
            for segment in repository.split('/').filter(|segment| !segment.is_empty()) {
                path.push(segment);
            }
            for segment in tail {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Sends a request and reads the response body under the size limit.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or a
    /// body exceeding `max_response_bytes`.
    fn send_limited(&self, request: RequestBuilder, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let response = request
            .bearer_auth(&self.config.token)
            .send()
            .map_err(|source| ApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        read_response_limited(response, endpoint, self.config.max_response_bytes)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: Response,
    endpoint: &str,
    max_bytes: usize,
) -> Result<Vec<u8>, ApiError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|_| ApiError::ResponseRead {
        endpoint: endpoint.to_string(),
    })?;
    if buf.len() > max_bytes {
        return Err(ApiError::ResponseTooLarge {
            endpoint: endpoint.to_string(),
            limit: max_bytes,
        });
    }
    Ok(buf)
}
