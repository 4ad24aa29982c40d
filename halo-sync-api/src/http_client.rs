//! Generic HTTP helpers
//!
//! Sending, logging and reading responses is shared here; URL and body
//! construction stays with the caller.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;
use crate::types::BaseResponse;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// Rate limiting (429) and gateway errors (502-504) are mapped to
    /// retryable errors before the body is inspected.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[halo] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[halo] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            log::warn!("[halo] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ApiError::RateLimited { retry_after });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[halo] Server error (HTTP {status_code})");
            return Err(ApiError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[halo] Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse JSON text into `T`.
    pub fn parse_json<T>(response_text: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[halo] JSON parse failed: {e}");
            log::error!("[halo] Raw response: {}", truncate_for_log(response_text));
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Turn a status code and body into an envelope.
    ///
    /// Non-2xx responses become [`ApiError::Api`] when the body is an
    /// envelope and [`ApiError::Http`] otherwise.
    pub fn parse_envelope<T>(status_code: u16, response_text: &str) -> Result<BaseResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if (200..300).contains(&status_code) {
            return Self::parse_json(response_text);
        }

        match serde_json::from_str::<BaseResponse<serde_json::Value>>(response_text) {
            Ok(envelope) if !envelope.message.is_empty() => {
                log::warn!(
                    "[halo] API error {}: {}",
                    envelope.status,
                    envelope.message
                );
                Err(ApiError::Api {
                    status: envelope.status,
                    message: envelope.message,
                    dev_message: envelope.dev_message,
                })
            }
            _ => Err(ApiError::Http {
                status: status_code,
                body: truncate_for_log(response_text),
            }),
        }
    }

    /// Performs an HTTP request with retries for transient failures.
    ///
    /// Only read-only requests should go through here; writes are sent
    /// once with [`execute_request`](Self::execute_request).
    ///
    /// # Retry strategy
    /// - Only network errors, timeouts and rate limiting are retried
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[halo] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method_name, url).await;
            };

            match Self::execute_request(req, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[halo] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Use the server's `Retry-After` (capped at 30s) when present, otherwise back off.
fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
