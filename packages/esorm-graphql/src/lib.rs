//! # esorm-graphql
//!
//! `esorm-graphql` turns document-store model definitions into an
//! `async_graphql::dynamic` schema: node, edge and connection types, Relay-style
//! cursor pagination over the store's search API, and bulk-create mutations.

pub mod field_type;
pub mod relay;
pub mod schema;
pub mod sdl;
pub mod spec;
pub mod store;
pub mod testing;

pub(self) mod self_prelude {
    pub use crate::{GraphqlError, GraphqlResult};
    pub use async_trait::async_trait;
    pub use extension_trait::extension_trait;
    pub use serde_json::{json, Value as JsonValue};
    pub use std::sync::Arc;
}

use thiserror::Error;

pub type GraphqlResult<T> = Result<T, GraphqlError>;

#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error("Unable to create resolver without an edge specified")]
    NoEdgeType,
    #[error("Unable to create custom node resolver without a custom edge name")]
    MissingCustomEdgeName,
    #[error("Type {0:?} is already generated for another resolver")]
    DuplicateTypeName(String),
    #[error("Invalid argument {0:?}: {1}")]
    InvalidArgument(String, String),
    #[error("Cursor error: {0}")]
    Cursor(#[from] relay::CursorError),
    #[error("Global ID error: {0}")]
    GlobalId(#[from] relay::GlobalIdError),
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    #[error("Error building dynamic schema: {0:?}")]
    DynamicSchemaBuildError(#[from] async_graphql::dynamic::SchemaError),
    #[error("Could not convert value: {0:?}")]
    Serde(#[from] serde_json::Error),
}

pub mod prelude {
    pub use crate::field_type::*;
    pub use crate::relay::{cursor::*, global_id::*};
    pub use crate::schema::{
        args::*, mutation::*, node::*, paging::*, query::*, resolver::*,
        schema_builder::*, type_cache::*,
    };
    pub use crate::sdl::*;
    pub use crate::spec::{
        connection::*, node::*, paging::*, root::*, scalar::*, util::*,
    };
    pub use crate::store::{memory::*, model::*, model_schema::*};
    pub use crate::testing::*;
    pub use crate::{GraphqlError, GraphqlResult};
}
