use std::time::Duration;

use parley_core::ProviderError;
use parley_core::util::truncate_preview;
use reqwest::{Client, Response};
use serde_json::Value;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("parley/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all providers of a process.
pub fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::Request(format!("failed to create HTTP client: {e}")))
}

pub fn request_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Request(e.to_string())
}

/// Read a JSON body, turning non-success statuses into `ProviderError::Status`.
pub async fn read_json(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: truncate_preview(body.trim(), 300),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

pub fn endpoint(
    base: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<url::Url, ProviderError> {
    let raw = format!("{}{path}", base.trim_end_matches('/'));
    url::Url::parse_with_params(&raw, params)
        .map_err(|e| ProviderError::Request(format!("invalid URL '{raw}': {e}")))
}
