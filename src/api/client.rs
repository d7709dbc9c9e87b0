use async_trait::async_trait;

use crate::models::{NewPatron, Patron, PatronDefaults, PatronId, SaturationReading};

/// Why a remote call failed.
/// Only used for diagnostics; users see one fixed message per operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("service responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Trait for the remote tally service
/// Implemented over HTTP for real use and by an in-memory fake in tests
#[async_trait]
pub trait PatronApi: Send + Sync {
    /// Fetch every patron
    async fn list_patrons(&self) -> Result<Vec<Patron>, ApiError>;

    /// Create a patron, returning the stored record with its new id
    async fn create_patron(&self, patron: &NewPatron) -> Result<Patron, ApiError>;

    /// Delete a patron
    async fn delete_patron(&self, id: PatronId) -> Result<(), ApiError>;

    /// Add a drink to a patron's tally
    async fn add_drink(&self, patron_id: PatronId, drink_id: &str) -> Result<(), ApiError>;

    /// Read a patron's current saturation level
    async fn saturation_level(&self, patron_id: PatronId) -> Result<SaturationReading, ApiError>;

    /// Fetch suggested values for a new patron
    async fn default_values(&self) -> Result<PatronDefaults, ApiError>;

    /// Backend name (for logging)
    fn name(&self) -> &'static str;
}
