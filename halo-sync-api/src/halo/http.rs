//! Halo HTTP request methods

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::types::BaseResponse;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{HaloPostApi, MAX_READ_RETRIES};

impl HaloPostApi {
    /// Absolute url for a path below the post collection.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Execute a GET request (retried on transient failures).
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<BaseResponse<T>> {
        let url = self.url(path);
        let (status, body) = HttpUtils::execute_request_with_retry(
            self.client.get(&url),
            "GET",
            &url,
            MAX_READ_RETRIES,
        )
        .await?;
        HttpUtils::parse_envelope(status, &body)
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<BaseResponse<T>> {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        self.send_write(request, "POST", &url, body).await
    }

    /// Execute a PUT request with an optional JSON body.
    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<BaseResponse<T>> {
        let url = self.url(path);
        let mut request = self.client.put(&url);
        if let Some(body) = body {
            request = request.json(body);
            self.send_write(request, "PUT", &url, body).await
        } else {
            let (status, text) = HttpUtils::execute_request(request, "PUT", &url).await?;
            HttpUtils::parse_envelope(status, &text)
        }
    }

    /// Writes are sent exactly once; side effects are never repeated.
    async fn send_write<T: DeserializeOwned, B: Serialize>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        url: &str,
        body: &B,
    ) -> Result<BaseResponse<T>> {
        let body_json = serde_json::to_string(body).map_err(|e| ApiError::ParseError {
            detail: format!("Failed to serialize request body: {e}"),
        })?;
        log::debug!("[halo] Request Body: {}", truncate_for_log(&body_json));

        let (status, text) = HttpUtils::execute_request(request, method, url).await?;
        HttpUtils::parse_envelope(status, &text)
    }
}
