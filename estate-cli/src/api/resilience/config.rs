//! Resilience configuration with builder pattern
//!
//! Bundles retry policy, request timeout and request logging for calls to
//! the property-management API, with sane defaults.

use super::retry::RetryConfig;
use std::time::Duration;

/// Resilience configuration for API requests
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    pub retry: RetryConfig,
    /// Per-request timeout
    pub timeout: Duration,
    /// Log every request/response pair at debug level
    pub request_logging: bool,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            timeout: Duration::from_secs(30),
            request_logging: true,
        }
    }
}

impl ResilienceConfig {
    /// Create a new builder for ResilienceConfig
    pub fn builder() -> ResilienceConfigBuilder {
        ResilienceConfigBuilder::new()
    }

    /// Disable retries and logging (for testing)
    pub fn disabled() -> Self {
        Self {
            retry: RetryConfig::disabled(),
            timeout: Duration::from_secs(5),
            request_logging: false,
        }
    }
}

/// Builder for ResilienceConfig
#[derive(Debug)]
pub struct ResilienceConfigBuilder {
    config: ResilienceConfig,
}

impl Default for ResilienceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResilienceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResilienceConfig::default(),
        }
    }

    /// Configure retry behavior
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable/disable request logging
    pub fn request_logging(mut self, enabled: bool) -> Self {
        self.config.request_logging = enabled;
        self
    }

    pub fn build(self) -> ResilienceConfig {
        self.config
    }
}
