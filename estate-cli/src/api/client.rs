//! HTTP client for the property-management API

use async_trait::async_trait;
use log::debug;
use std::time::Instant;

use super::parameters::{BaseParameters, ParametersError, ParametersSource, parse_listing};
use super::resilience::{ResilienceConfig, RetryPolicy, RetryableError};

impl RetryableError for ParametersError {
    fn is_retryable(&self) -> bool {
        match self {
            ParametersError::Http(_) => true,
            ParametersError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Client for the remote listing endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    parameters_path: String,
    token: Option<String>,
    retry: RetryPolicy,
    request_logging: bool,
}

impl ApiClient {
    /// Create a client for `base_url`, listing Base Parameters at `parameters_path`
    pub fn new(
        base_url: &str,
        parameters_path: &str,
        token: Option<String>,
        resilience: ResilienceConfig,
    ) -> Result<Self, ParametersError> {
        let http = reqwest::Client::builder()
            .timeout(resilience.timeout)
            .build()
            .map_err(|e| ParametersError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            parameters_path: parameters_path.trim_start_matches('/').to_string(),
            token,
            retry: RetryPolicy::new(resilience.retry),
            request_logging: resilience.request_logging,
        })
    }

    /// Full URL of the Base Parameters listing
    pub fn parameters_url(&self) -> String {
        format!("{}/{}", self.base_url, self.parameters_path)
    }

    async fn get_text(&self, url: &str) -> Result<String, ParametersError> {
        let start = Instant::now();

        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ParametersError::Http(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ParametersError::Http(e.to_string()))?;

        if self.request_logging {
            debug!("GET {} -> {} in {:?}", url, status, start.elapsed());
        }

        if !status.is_success() {
            return Err(ParametersError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ParametersSource for ApiClient {
    async fn list(&self) -> Result<Vec<BaseParameters>, ParametersError> {
        let url = self.parameters_url();
        let url = url.as_str();
        let body = self
            .retry
            .execute("list base parameters", move || self.get_text(url))
            .await?;

        parse_listing(&body)
    }
}
