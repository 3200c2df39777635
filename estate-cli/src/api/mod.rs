//! Property-management API access
//!
//! Only the Base Parameters listing is consumed here: the records holding the
//! current consumer price index and currency rates that indexation depends on.
//! Sources are abstracted behind [`ParametersSource`] so the calculator can be
//! fed from the HTTP API, a local file, or an in-memory fixture.

pub mod client;
pub mod parameters;
pub mod resilience;

pub use client::ApiClient;
pub use parameters::{BaseParameters, FileParametersSource, ParametersError, ParametersSource};
pub use resilience::{ResilienceConfig, RetryConfig};
