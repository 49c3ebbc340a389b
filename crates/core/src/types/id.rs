//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are opaque strings (slugs such as `flow-legging`), so
//! the `define_id!` macro wraps a `String` rather than an integer.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use akasha_core::define_id;
/// define_id!(ProductId);
/// define_id!(MovementId);
///
/// let product = ProductId::new("flow-legging");
/// let movement = MovementId::new("flow-legging");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = movement;
/// assert_eq!(product.as_str(), movement.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

define_id!(ProductId);
define_id!(MovementId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("sage-tank");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"sage-tank\""));
    }

    #[test]
    fn test_id_compares_with_str() {
        let id = MovementId::from("yoga");
        assert!(id == *"yoga");
        assert_eq!(id.to_string(), "yoga");
    }
}
