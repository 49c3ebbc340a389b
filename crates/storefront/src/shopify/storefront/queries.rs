//! Typed Storefront API queries.
//!
//! Documents are declared inline and implement `graphql_client::GraphQLQuery`
//! by hand, so no schema download is needed at build time.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

/// `query ShopName { shop { name } }`
pub struct ShopName;

pub mod shop_name {
    use super::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "ShopName";
    pub const QUERY: &str = "query ShopName {\n  shop {\n    name\n  }\n}\n";

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub shop: Shop,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Shop {
        pub name: String,
    }
}

impl GraphQLQuery for ShopName {
    type Variables = shop_name::Variables;
    type ResponseData = shop_name::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: shop_name::QUERY,
            operation_name: shop_name::OPERATION_NAME,
        }
    }
}
