//! Response caching policy for Storefront API queries.

use std::time::Duration;

use moka::future::Cache;

/// How query responses are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Every call goes to the network.
    #[default]
    NoStore,
    /// Successful `data` payloads are kept for the given duration.
    Ttl(Duration),
}

impl CachePolicy {
    /// Policy for an optional TTL (`None` means no caching).
    #[must_use]
    pub const fn from_ttl(ttl: Option<Duration>) -> Self {
        match ttl {
            Some(ttl) => Self::Ttl(ttl),
            None => Self::NoStore,
        }
    }

    pub(super) fn build(self) -> Option<Cache<String, serde_json::Value>> {
        match self {
            Self::NoStore => None,
            Self::Ttl(ttl) => Some(
                Cache::builder()
                    .max_capacity(1000)
                    .time_to_live(ttl)
                    .build(),
            ),
        }
    }
}

/// Cache key: the document and its variables.
pub(super) fn cache_key(document: &str, variables: Option<&serde_json::Value>) -> String {
    match variables {
        Some(vars) => format!("{document}\u{0}{vars}"),
        None => document.to_string(),
    }
}
