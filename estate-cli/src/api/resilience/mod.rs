//! Retry and timeout handling for API requests
//!
//! Provides the retry policy and configuration applied to every call made
//! against the property-management API.

pub mod config;
pub mod retry;

pub use config::ResilienceConfig;
pub use retry::{RetryConfig, RetryPolicy, RetryableError};
