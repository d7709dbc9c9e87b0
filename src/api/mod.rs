pub mod client;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

pub use client::{ApiError, PatronApi};
pub use http::HttpPatronApi;

/// Default location of the tally service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Create the tally service client for the configured base URL
pub fn create_api(base_url: &str) -> Arc<dyn PatronApi> {
    let api = HttpPatronApi::new(base_url);
    log::info!("Using tally service at {}", api.base_url());
    Arc::new(api)
}
