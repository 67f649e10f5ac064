//! Connection and edge object types.
//!
//! A connection carries `pageInfo`, the `total` number of matching records and
//! its `edges`. See: https://relay.dev/graphql/connections.htm#sec-Connection-Types

use super::paging::*;
use super::self_prelude::*;

#[extension_trait]
pub impl ConnectionTypeRef for TypeRef {
    /// Connection type of a model, e.g. `EsORMUser`.
    fn connection(model_name: impl Into<String>) -> String {
        format!("EsORM{}", model_name.into())
    }
    /// Connection type over a custom edge, e.g. `UserSummaryEdgeConnection`.
    fn custom_connection(edge_name: impl Into<String>) -> String {
        format!("{}Connection", edge_name.into())
    }
    fn connection_edge(model_name: impl Into<String>) -> String {
        format!("EsORM{}Edge", model_name.into())
    }
}

#[extension_trait]
pub impl ConnectionObject for Object {
    fn new_connection<Resolver: ConnectionResolver>(
        name: impl Into<String>,
        edge_name: impl Into<String>,
    ) -> Self {
        Self::new(name)
            .field(Field::new(
                "pageInfo",
                TypeRef::named(TypeRef::PAGE_INFO),
                Resolver::resolve_page_info,
            ))
            .field(Field::new(
                "total",
                TypeRef::named(TypeRef::INT),
                Resolver::resolve_total,
            ))
            .field(Field::new(
                "edges",
                TypeRef::named_list(edge_name),
                Resolver::resolve_edges,
            ))
    }
}

pub trait ConnectionResolver: Send + Sync + 'static {
    fn resolve_page_info(ctx: ResolverContext) -> FieldFuture;
    fn resolve_total(ctx: ResolverContext) -> FieldFuture;
    fn resolve_edges(ctx: ResolverContext) -> FieldFuture;
}

/// See: https://relay.dev/graphql/connections.htm#sec-Edge-Types
#[extension_trait]
pub impl ConnectionEdgeObject for Object {
    fn new_connection_edge<Resolver: ConnectionEdgeResolver>(
        name: impl Into<String>,
        node_name: impl Into<String>,
    ) -> Self {
        Self::new(name)
            .field(Field::new(
                "cursor",
                TypeRef::named(TypeRef::CURSOR),
                Resolver::resolve_cursor,
            ))
            .field(Field::new(
                "node",
                TypeRef::named(node_name),
                Resolver::resolve_node,
            ))
    }
}

pub trait ConnectionEdgeResolver: Send + Sync + 'static {
    fn resolve_cursor(ctx: ResolverContext) -> FieldFuture;
    fn resolve_node(ctx: ResolverContext) -> FieldFuture;
}
