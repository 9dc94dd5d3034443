//! Cabin Meter HTTP client implementation.

use reqwest::{Client, Url};
use std::time::Duration;

use cabin_meter_core::{Cabin, CompleteUsage, NewUsage, Usage, UsageEdit, UsageId, UsageSummary};

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, CreateCabinRequest, DeletedResponse, HealthResponse};

/// Cabin Meter API client.
///
/// Provides one method per API operation.
#[derive(Debug, Clone)]
pub struct CabinMeterClient {
    client: Client,
    base_url: Url,
}

impl CabinMeterClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"http://cabin-meter:8000"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn with_options(
        base_url: impl AsRef<str>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.as_ref().trim_end_matches('/'))
            .map_err(|e| ClientError::Configuration(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url(&["health"])).send().await?;
        self.handle_response(response).await
    }

    // ========================================================================
    // Cabins
    // ========================================================================

    /// List all cabins ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_cabins(&self) -> Result<Vec<Cabin>, ClientError> {
        let response = self.client.get(self.url(&["api", "cabins"])).send().await?;
        self.handle_response(response).await
    }

    /// Create a cabin.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the cabin exists, or another error if
    /// the request fails.
    pub async fn create_cabin(&self, number: impl Into<String>) -> Result<Cabin, ClientError> {
        let request = CreateCabinRequest {
            number: number.into(),
        };

        let response = self
            .client
            .post(self.url(&["api", "cabins"]))
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a cabin by number.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the cabin doesn't exist.
    pub async fn get_cabin(&self, number: &str) -> Result<Cabin, ClientError> {
        let response = self
            .client
            .get(self.url(&["api", "cabins", number]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a cabin and all its usages.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the cabin doesn't exist.
    pub async fn delete_cabin(&self, number: &str) -> Result<DeletedResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&["api", "cabins", number]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the usages of one cabin, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_cabin_usages(&self, number: &str) -> Result<Vec<Usage>, ClientError> {
        let response = self
            .client
            .get(self.url(&["api", "cabins", number, "usages"]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Latest known meter value of a cabin, `0.0` if it has no usages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn last_meter_reading(&self, number: &str) -> Result<f64, ClientError> {
        let response = self
            .client
            .get(self.url(&["api", "cabins", number, "last-meter-reading"]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    // ========================================================================
    // Usages
    // ========================================================================

    /// List all usages, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_usages(&self) -> Result<Vec<Usage>, ClientError> {
        let response = self.client.get(self.url(&["api", "usages"])).send().await?;
        self.handle_response(response).await
    }

    /// List the `limit` most recent usages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_latest_usages(&self, limit: u32) -> Result<Vec<Usage>, ClientError> {
        let limit = limit.to_string();

        let response = self
            .client
            .get(self.url(&["api", "usages", "latest", &limit]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Consumption and cost totals, optionally for one cabin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn usage_summary(
        &self,
        cabin_number: Option<&str>,
    ) -> Result<UsageSummary, ClientError> {
        let mut request = self.client.get(self.url(&["api", "usages", "summary"]));
        if let Some(number) = cabin_number {
            request = request.query(&[("cabinNumber", number)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Record a usage.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotFound` if the cabin doesn't exist.
    /// - `ClientError::Validation` if the dates or readings are invalid.
    pub async fn create_usage(&self, usage: &NewUsage) -> Result<Usage, ClientError> {
        let response = self
            .client
            .post(self.url(&["api", "usages"]))
            .json(usage)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a usage by ID.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the usage doesn't exist.
    pub async fn get_usage(&self, id: UsageId) -> Result<Usage, ClientError> {
        let id = id.to_string();

        let response = self
            .client
            .get(self.url(&["api", "usages", &id]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Record the final meter reading of a usage.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotFound` if the usage doesn't exist.
    /// - `ClientError::Validation` if the reading does not exceed the initial one.
    pub async fn complete_usage(
        &self,
        id: UsageId,
        completion: &CompleteUsage,
    ) -> Result<Usage, ClientError> {
        let id = id.to_string();

        let response = self
            .client
            .put(self.url(&["api", "usages", &id]))
            .json(completion)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Change fields of an open usage.
    ///
    /// # Errors
    ///
    /// - `ClientError::NotFound` if the usage doesn't exist.
    /// - `ClientError::InvalidState` if the usage is completed.
    pub async fn edit_usage(&self, id: UsageId, edit: &UsageEdit) -> Result<Usage, ClientError> {
        let id = id.to_string();

        let response = self
            .client
            .patch(self.url(&["api", "usages", &id, "edit"]))
            .json(edit)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a usage.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the usage doesn't exist.
    pub async fn delete_usage(&self, id: UsageId) -> Result<DeletedResponse, ClientError> {
        let id = id.to_string();

        let response = self
            .client
            .delete(self.url(&["api", "usages", &id]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message;

                tracing::debug!(status = status.as_u16(), code, %message, "API error response");

                // Map specific error codes to typed errors
                match code {
                    "not_found" => Err(ClientError::NotFound(message)),
                    "conflict" => Err(ClientError::Conflict(message)),
                    "invalid_state" => Err(ClientError::InvalidState(message)),
                    "validation_error" => {
                        let rule = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("rule"))
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or("unknown")
                            .to_string();

                        Err(ClientError::Validation { rule, message })
                    }
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
