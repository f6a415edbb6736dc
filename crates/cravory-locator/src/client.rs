//! HTTP client for the restaurants backend (`/api/restaurants`).

use std::time::Duration;

use cravory_core::{AppConfig, NewRestaurant, RestaurantRecord, SubmitOutcome};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::error::ClientError;

const RESTAURANTS_PATH: &str = "api/restaurants";

/// Error body shape used by the backend: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for listing and submitting restaurants.
///
/// Listing uses the client-wide timeout; submissions carry their own
/// (15 seconds by default) because their bodies embed images.
#[derive(Debug, Clone)]
pub struct RestaurantsClient {
    client: Client,
    base_url: Url,
    submit_timeout_secs: u64,
}

impl RestaurantsClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout_secs: u64,
        submit_timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            submit_timeout_secs,
        })
    }

    /// # Errors
    ///
    /// See [`RestaurantsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            &config.user_agent,
            config.api_timeout_secs,
            config.submit_timeout_secs,
        )
    }

    fn restaurants_url(&self) -> Result<Url, ClientError> {
        self.base_url
            .join(RESTAURANTS_PATH)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetch every restaurant, newest first.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] for a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a record list.
    pub async fn list(&self) -> Result<Vec<RestaurantRecord>, ClientError> {
        let url = self.restaurants_url()?;
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let records: Vec<RestaurantRecord> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("restaurant list from {url}"),
                source: e,
            })?;

        tracing::debug!(count = records.len(), "fetched restaurants");
        Ok(records)
    }

    /// Create a restaurant, or update the one with the same name.
    ///
    /// The payload is validated before any request is made.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] when a field is blank (no request sent).
    /// - [`ClientError::Timeout`] when the server does not answer in time.
    /// - [`ClientError::Api`] for a non-2xx response, carrying the server message.
    /// - [`ClientError::Http`] / [`ClientError::Deserialize`] otherwise.
    pub async fn submit(&self, restaurant: &NewRestaurant) -> Result<SubmitOutcome, ClientError> {
        restaurant.validate()?;

        let url = self.restaurants_url()?;
        let timeout_secs = self.submit_timeout_secs;
        let response = self
            .client
            .post(url.clone())
            .timeout(Duration::from_secs(timeout_secs))
            .json(restaurant)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ClientError::Timeout {
                        url: url.to_string(),
                        timeout_secs,
                    }
                } else {
                    ClientError::Http(err)
                }
            })?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let outcome: SubmitOutcome =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("submit response from {url}"),
                source: e,
            })?;

        tracing::info!(
            id = %outcome.id,
            updated = outcome.updated,
            name = %restaurant.name,
            "restaurant submitted"
        );
        Ok(outcome)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], preferring the
    /// server's `error` message over the raw body.
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        tracing::warn!(status = status.as_u16(), message = %message, "restaurants API error");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
