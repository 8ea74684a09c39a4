//! Blocking HTTP transport backed by ureq.

use std::time::Duration;

use sales_inquiry_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Header carrying the API key expected by the SAP API Business Hub.
pub const API_KEY_HEADER: &str = "APIKey";

/// Largest response body read before the request fails. ureq on its own
/// stops at 10 MB, which a wide `to_Item` navigation can exceed.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes core requests with a shared ureq agent.
///
/// 4xx/5xx responses come back as data so the core decides how to report
/// them; only connection-level failures become `ApiError::Transport`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    api_key: Option<String>,
    max_body_bytes: u64,
}

impl UreqTransport {
    pub fn new(timeout: Duration, api_key: Option<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            api_key,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Bodies larger than `bytes` fail with `ApiError::Transport`.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.max_body_bytes = bytes;
        self
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "request");

        let mut builder = match req.method {
            HttpMethod::Get => self.agent.get(&req.url),
        };
        for (key, value) in &req.query {
            builder = builder.query(key, value);
        }
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
