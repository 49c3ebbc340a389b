//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - `graphql_client` envelope types for requests and responses; HTTP via
//!   `reqwest`
//! - Shopify is the source of truth for catalog data; the session managers
//!   never call it, page-level code does
//! - Optional in-memory caching via `moka` (no-store by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use akasha_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify.unwrap());
//!
//! let name = client.shop_name().await?;
//! let data: serde_json::Value = client
//!     .query("query { products(first: 3) { nodes { handle } } }", None)
//!     .await?;
//! ```

mod storefront;

pub use storefront::{CachePolicy, StorefrontClient, queries};

use thiserror::Error;

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Endpoint unreachable or the request failed in transit.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Shopify HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response carried neither data nor errors.
    #[error("Shopify response missing data")]
    MissingData,

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Storefront API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ShopifyError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Shopify HTTP 401: Unauthorized");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field 'shopp' doesn't exist".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'shopp' doesn't exist; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_path_and_location() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");

        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_from_graphql_client_error() {
        let raw: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Throttled",
            "locations": [{"line": 2, "column": 3}],
            "path": ["shop", 1]
        }))
        .unwrap();

        let err = GraphQLError::from(raw);
        assert_eq!(err.message, "Throttled");
        assert_eq!(err.locations.len(), 1);
        assert_eq!(err.path.len(), 2);
    }
}
