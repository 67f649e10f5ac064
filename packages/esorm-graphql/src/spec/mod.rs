//! `async_graphql::dynamic` extensions for the GraphQL shapes this crate emits.
//!
//! GraphQL Spec: https://spec.graphql.org/draft/
//! GraphQL Cursor Connections Spec: https://relay.dev/graphql/connections.htm
//! Global Object Identification: https://graphql.org/learn/global-object-identification/

pub mod connection;
pub mod node;
pub mod paging;
pub mod root;
pub mod scalar;
pub mod util;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use async_graphql::dynamic::*;
}

pub use connection::*;
pub use node::*;
pub use paging::*;
pub use root::*;
pub use scalar::*;
pub use util::*;
