use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::client::{ApiError, PatronApi};
use crate::models::{NewPatron, Patron, PatronDefaults, PatronId, SaturationReading};

/// Tally service client over HTTP/JSON.
///
/// Success is the HTTP status class alone; bodies of failed responses are
/// never inspected. No timeouts are set.
#[derive(Clone)]
pub struct HttpPatronApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPatronApi {
    /// Create a client rooted at `base_url` (e.g. "http://localhost:8000/api/")
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    /// Base URL, always ending in '/'
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and fail on a non-success status
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(ApiError::Decode)
    }
}

#[async_trait]
impl PatronApi for HttpPatronApi {
    async fn list_patrons(&self) -> Result<Vec<Patron>, ApiError> {
        self.send_json(self.client.get(self.url("patrons"))).await
    }

    async fn create_patron(&self, patron: &NewPatron) -> Result<Patron, ApiError> {
        self.send_json(self.client.post(self.url("patrons/")).json(patron))
            .await
    }

    async fn delete_patron(&self, id: PatronId) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(&format!("patrons/{}/", id))))
            .await?;
        Ok(())
    }

    async fn add_drink(&self, patron_id: PatronId, drink_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("patrons/add_drink/{}/{}/", patron_id, drink_id));
        self.send(
            self.client
                .post(url)
                .header(CONTENT_TYPE, "application/json"),
        )
        .await?;
        Ok(())
    }

    async fn saturation_level(&self, patron_id: PatronId) -> Result<SaturationReading, ApiError> {
        let url = self.url(&format!(
            "patrons/{}/get_alcohol_saturation_level",
            patron_id
        ));
        self.send_json(self.client.get(url)).await
    }

    async fn default_values(&self) -> Result<PatronDefaults, ApiError> {
        self.send_json(
            self.client
                .post(self.url("patrons/add-default-values/"))
                .header(CONTENT_TYPE, "application/json"),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Ensure the base URL ends with exactly one '/'
fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}
