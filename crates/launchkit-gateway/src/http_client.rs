//! Shared HTTP client for the stage and preview services.
//!
//! One `reqwest::Client` is built per gateway and reused across calls. Every
//! request gets a per-call timeout capped by a global maximum. Network errors
//! and 5xx responses are retried a bounded number of times with a linear
//! backoff unless the owner sets the retry budget to zero; the stage gateway
//! does, since a stage POST is not idempotent. 4xx responses are never
//! retried.

use launchkit_utils::error::GatewayError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default maximum HTTP timeout. Stage calls run multi-agent generation and
/// can take several minutes.
const DEFAULT_MAX_HTTP_TIMEOUT: Duration = Duration::from_secs(900);

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retry attempts for 5xx and network failures
const MAX_RETRIES: u32 = 2;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    max_timeout: Duration,
    initial_backoff: Duration,
    max_retries: u32,
}

impl HttpClient {
    /// Create a client with the default maximum timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Misconfiguration` if the client cannot be built.
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_max_timeout(DEFAULT_MAX_HTTP_TIMEOUT)
    }

    pub fn with_max_timeout(max_timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| {
                GatewayError::Misconfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client: Arc::new(client),
            max_timeout,
            initial_backoff: INITIAL_BACKOFF,
            max_retries: MAX_RETRIES,
        })
    }

    /// Override the delay before the first retry. Later retries wait
    /// `backoff * attempt`.
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Set how many times a 5xx or network failure is retried. Zero issues
    /// every request exactly once.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub(crate) fn inner(&self) -> &Client {
        &self.client
    }

    /// Execute a request with the timeout and retry policy.
    ///
    /// - Per-request timeout: `min(request_timeout, max_timeout)`
    /// - Up to `max_retries` retries (2 by default) for 5xx and network failures
    /// - No retries for 4xx or timeouts
    ///
    /// # Errors
    ///
    /// - `ProviderAuth` for 401/403
    /// - `ProviderQuota` for 429
    /// - `Transport` for other 4xx and for network errors after retries
    /// - `ProviderOutage` for 5xx after retries
    /// - `Timeout` when the request timed out
    pub async fn execute_with_retry(
        &self,
        request_builder: RequestBuilder,
        request_timeout: Duration,
        service: &str,
    ) -> Result<Response, GatewayError> {
        let effective_timeout = request_timeout.min(self.max_timeout);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let request = request_builder
                .try_clone()
                .ok_or_else(|| {
                    GatewayError::Transport("Failed to clone request for retry".to_string())
                })?
                .timeout(effective_timeout)
                .build()
                .map_err(|e| GatewayError::Transport(format!("Failed to build request: {e}")))?;

            debug!(
                service,
                attempt,
                method = %request.method(),
                path = request.url().path(),
                timeout_secs = effective_timeout.as_secs(),
                "Executing HTTP request"
            );

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_client_error() {
                        return Err(map_client_error(status, service));
                    }

                    if status.is_server_error() {
                        if attempt <= self.max_retries {
                            warn!(
                                service,
                                attempt,
                                status = status.as_u16(),
                                "Server error, will retry"
                            );
                            tokio::time::sleep(self.initial_backoff * attempt).await;
                            continue;
                        }
                        return Err(GatewayError::ProviderOutage(format!(
                            "{service} returned server error: {status}"
                        )));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        return Err(GatewayError::Timeout {
                            duration: effective_timeout,
                        });
                    }

                    if attempt <= self.max_retries {
                        warn!(
                            service,
                            attempt,
                            error = %redact_error_message(&e.to_string()),
                            "Network error, will retry"
                        );
                        tokio::time::sleep(self.initial_backoff * attempt).await;
                        continue;
                    }

                    return Err(GatewayError::Transport(format!(
                        "{service} request failed: {}",
                        redact_error_message(&e.to_string())
                    )));
                }
            }
        }
    }
}

/// Map 4xx statuses to gateway errors.
fn map_client_error(status: StatusCode, service: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::ProviderAuth(format!("{service} refused the request: {status}"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            GatewayError::ProviderQuota(format!("{service} rate limit exceeded: {status}"))
        }
        _ => GatewayError::Transport(format!("{service} returned client error: {status}")),
    }
}

/// URLs with embedded credentials
static URL_WITH_CREDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://)[^:@\s/]+:[^@\s/]+@").expect("valid credentials regex"));

/// Long opaque tokens (32+ key characters)
static POTENTIAL_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_-]{32,}").expect("valid key regex"));

/// Strip credentials and long opaque tokens from an error message before it
/// is logged or surfaced.
fn redact_error_message(message: &str) -> String {
    let redacted = URL_WITH_CREDS.replace_all(message, "$1[REDACTED]@");
    POTENTIAL_KEY
        .replace_all(&redacted, "[REDACTED_KEY]")
        .into_owned()
}
