//! Shopify Storefront API client implementation.
//!
//! Requests are plain GraphQL-over-HTTP POSTs made with `reqwest`; responses
//! are decoded through `graphql_client::Response`. Caching is opt-in via
//! [`CachePolicy`].

mod cache;
pub mod queries;

pub use cache::CachePolicy;

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{GraphQLError, ShopifyError};

use cache::cache_key;
use queries::{ShopName, shop_name};

/// Longest response excerpt carried in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    token_header: &'static str,
    access_token: SecretString,
    cache: Option<Cache<String, Value>>,
}

/// Request body for an ad-hoc document.
#[derive(Serialize)]
struct RawQueryBody<'a> {
    query: &'a str,
    variables: &'a Value,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client over an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: &ShopifyStorefrontConfig, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint: config.endpoint(),
                token_header: config.token_kind.header_name(),
                access_token: config.access_token.clone(),
                cache: CachePolicy::from_ttl(config.cache_ttl).build(),
            }),
        }
    }

    /// GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Run an arbitrary GraphQL document and decode its `data` payload.
    ///
    /// Missing variables are sent as an empty object.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unreachable, answers with a
    /// non-success status, the body is not a GraphQL response, the response
    /// carries errors, or `data` does not decode as `T`.
    #[instrument(skip_all, fields(endpoint = %self.inner.endpoint))]
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Option<Value>,
    ) -> Result<T, ShopifyError> {
        let variables = variables.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let key = cache_key(document, Some(&variables));

        if let Some(cache) = &self.inner.cache
            && let Some(data) = cache.get(&key).await
        {
            debug!("Cache hit for query");
            return Ok(serde_json::from_value(data)?);
        }

        let data = self
            .post(&RawQueryBody {
                query: document,
                variables: &variables,
            })
            .await?;

        if let Some(cache) = &self.inner.cache {
            cache.insert(key, data.clone()).await;
        }

        Ok(serde_json::from_value(data)?)
    }

    /// Run a typed query.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::query`].
    pub async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let data = self.post(&Q::build_query(variables)).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Name of the shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn shop_name(&self) -> Result<String, ShopifyError> {
        let data = self.execute::<ShopName>(shop_name::Variables).await?;
        Ok(data.shop.name)
    }

    /// POST a request body and return the response's `data`.
    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ShopifyError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(
                self.inner.token_header,
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = excerpt(&response_text);
            tracing::error!(
                status = %status,
                body = %body,
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: Response<Value> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %excerpt(&response_text),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %excerpt(&response_text),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::MissingData
        })
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(BODY_EXCERPT_CHARS).collect()
}
