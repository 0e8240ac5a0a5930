//! Shared plumbing for the two outbound HTTP adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::warn;

use super::retry::RetryPolicy;
use crate::config::{ConfigError, Secret};

/// Failure to construct an outbound adapter at startup.
#[derive(Debug, thiserror::Error)]
pub enum AdapterSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Terminal outcome of a request after any retries.
#[derive(Debug, thiserror::Error)]
pub enum OutboundFailure {
    #[error("{service} responded with {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
        detail: String,
    },
    #[error("{service} unreachable after {attempts} attempt(s): {source}")]
    Transport {
        service: &'static str,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, AdapterSetupError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn require_secret(
    secret: Option<&Secret>,
    var: &'static str,
) -> Result<Secret, ConfigError> {
    secret.cloned().ok_or(ConfigError::MissingSecret { var })
}

/// Send the request built by `build`, retrying transport errors and
/// 408/429/5xx responses while the policy allows.
pub(crate) async fn send_with_retry<B>(
    policy: &RetryPolicy,
    service: &'static str,
    mut build: B,
) -> Result<Response, OutboundFailure>
where
    B: FnMut() -> RequestBuilder,
{
    let mut backoff = policy.backoff();

    loop {
        match build().send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                if is_retryable(status) {
                    if let Some(delay) = backoff.next_delay() {
                        warn!(
                            service,
                            %status,
                            delay_ms = delay.as_millis() as u64,
                            attempt = backoff.attempt(),
                            "retryable response from outbound service"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }

                let detail = response.text().await.unwrap_or_default();
                return Err(OutboundFailure::Status {
                    service,
                    status,
                    detail,
                });
            }
            Err(source) => {
                if let Some(delay) = backoff.next_delay() {
                    warn!(
                        service,
                        error = %source,
                        delay_ms = delay.as_millis() as u64,
                        attempt = backoff.attempt(),
                        "outbound request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }

                return Err(OutboundFailure::Transport {
                    service,
                    attempts: backoff.attempt(),
                    source,
                });
            }
        }
    }
}

const fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
}
