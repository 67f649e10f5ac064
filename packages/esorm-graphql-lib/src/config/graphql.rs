use crate::{config::utils::derive_http_url, defaults};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct GraphQLConfig {
    /// GraphQL API host.
    #[serde(default)]
    pub host: String,

    /// GraphQL API port.
    #[serde(default)]
    pub port: String,

    /// Max body size for GraphQL API requests.
    #[serde(default)]
    pub max_body_size: usize,
}

impl GraphQLConfig {
    pub fn http_url(&self) -> String {
        derive_http_url(&self.host, &self.port)
    }
}

impl std::fmt::Display for GraphQLConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            host: defaults::GRAPHQL_API_HOST.into(),
            port: defaults::GRAPHQL_API_PORT.into(),
            max_body_size: defaults::MAX_BODY_SIZE,
        }
    }
}
