//! Map link resolution over HTTP.
//!
//! Shortened links (`maps.app.goo.gl/...`) carry no coordinates themselves.
//! The resolver follows the redirect chain, then looks for a coordinate in
//! the final URL and, failing that, in the page body.

use std::future::Future;
use std::time::Duration;

use cravory_core::{AppConfig, Coordinate};
use reqwest::Client;

use crate::error::ClientError;
use crate::extract::extract_coordinate_with_rule;

/// Upper bound on redirects followed for a single map link.
const MAX_REDIRECTS: usize = 10;

/// Anything that can turn a map link into a coordinate.
///
/// Implementations must not fail: every error becomes `None`.
pub trait ResolveLink: Send + Sync {
    fn resolve(&self, link: &str) -> impl Future<Output = Option<Coordinate>> + Send;
}

/// HTTP-backed [`ResolveLink`] implementation.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    client: Client,
}

impl LinkResolver {
    /// Creates a resolver with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a resolver from the shared application configuration.
    ///
    /// # Errors
    ///
    /// See [`LinkResolver::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(config.resolve_timeout_secs, &config.user_agent)
    }

    /// Fetch `link` and look for a coordinate in the final URL, then the body.
    ///
    /// The response status is not checked: error pages are scanned too.
    pub async fn resolve(&self, link: &str) -> Option<Coordinate> {
        let response = match self
            .client
            .get(link)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(link, error = %err, "map link request failed");
                return None;
            }
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        if let Some((coord, rule)) = extract_coordinate_with_rule(&final_url) {
            tracing::debug!(link, %final_url, %rule, "coordinate found in final URL");
            return Some(coord);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(link, %final_url, error = %err, "failed to read map link body");
                return None;
            }
        };

        if let Some((coord, rule)) = extract_coordinate_with_rule(&body) {
            tracing::debug!(link, %final_url, status, %rule, "coordinate found in page body");
            return Some(coord);
        }

        tracing::info!(link, %final_url, status, "no coordinate found for map link");
        None
    }
}

impl ResolveLink for LinkResolver {
    async fn resolve(&self, link: &str) -> Option<Coordinate> {
        LinkResolver::resolve(self, link).await
    }
}
