//! Builds GraphQL types and resolvers from [`Model`](crate::store::Model)s.

pub mod args;
pub mod mutation;
pub mod node;
pub mod paging;
pub mod query;
pub mod resolver;
pub mod schema_builder;
pub mod type_cache;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use crate::spec::*;
    pub use crate::store::*;
    pub use async_graphql::dynamic::*;
    pub use convert_case::{Case, Casing};
}

pub use args::*;
pub use mutation::*;
pub use node::*;
pub use paging::*;
pub use query::*;
pub use resolver::*;
pub use schema_builder::*;
pub use type_cache::*;
