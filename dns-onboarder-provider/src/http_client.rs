//! Shared request execution for providers
//!
//! Each provider builds its own `RequestBuilder` (auth, body) and hands it
//! here for sending, status classification and JSON decoding.
//! Nothing is retried: a failed onboarding step is attempted again on the
//! next reconciliation pass.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Status codes that never carry a usable API envelope.
///
/// Anything else (including 4xx) is returned to the provider, whose JSON
/// envelope describes the error.
fn classify_status(
    provider: &str,
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> Option<ProviderError> {
    match status.as_u16() {
        429 => Some(ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after,
            raw_message: Some(body.to_string()),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("HTTP {}: {}", status.as_u16(), truncate_for_log(body)),
        }),
        _ => None,
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    }
}

/// Send a request and return the response body.
pub(crate) async fn send(
    request: RequestBuilder,
    provider: &str,
    method: &str,
    url: &str,
) -> Result<String> {
    log::debug!("[{provider}] {method} {url}");

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    let status = response.status();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    log::debug!(
        "[{provider}] {} {}",
        status.as_u16(),
        truncate_for_log(&body)
    );

    match classify_status(provider, status, retry_after, &body) {
        Some(err) => {
            log::warn!("[{provider}] {method} {url} failed: {err}");
            Err(err)
        }
        None => Ok(body),
    }
}

/// Decode a JSON body, logging the raw text on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!(
            "[{provider}] Unexpected response ({e}): {}",
            truncate_for_log(body)
        );
        ProviderError::ParseError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    })
}
