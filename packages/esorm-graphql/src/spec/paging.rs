//! Relay pagination arguments and the shared page info type.
//! See: https://relay.dev/graphql/connections.htm#sec-Arguments

use super::scalar::*;
use super::self_prelude::*;

pub type CursorString = String;

#[extension_trait]
pub impl PagingTypeRef for TypeRef {
    const CURSOR: &'static str = "String";
    const PAGE_INFO: &'static str = "EsORMPageInfo";
}

/// Default arguments of every connection field, in declaration order.
const CONNECTION_ARGUMENTS: [(&str, &str, &str); 5] = [
    ("after", TypeRef::CURSOR, "Return edges after the given cursor."),
    ("first", TypeRef::INT, "Return at most this many edges, paging forward."),
    ("before", TypeRef::CURSOR, "Return edges before the given cursor."),
    ("last", TypeRef::INT, "Return at most this many edges, paging backward."),
    ("query", TypeRef::JSON, "Structured store query. IDs may be global IDs."),
];

#[extension_trait]
pub impl PagingField for Field {
    /// `after`, `first`, `before`, `last` and `query`.
    fn connection_arguments(self) -> Self {
        CONNECTION_ARGUMENTS
            .iter()
            .fold(self, |field, (name, type_name, description)| {
                field.argument(
                    InputValue::new(*name, TypeRef::named(*type_name))
                        .description(*description),
                )
            })
    }
}

/// See: https://relay.dev/graphql/connections.htm#sec-PageInfo
#[extension_trait]
pub impl PageInfoObject for Object {
    fn new_page_info<Resolver: PageInfoResolver>() -> Self {
        Self::new(TypeRef::PAGE_INFO)
            .field(Field::new(
                "hasNextPage",
                TypeRef::named(TypeRef::BOOLEAN),
                Resolver::resolve_has_next_page,
            ))
            .field(Field::new(
                "hasPreviousPage",
                TypeRef::named(TypeRef::BOOLEAN),
                Resolver::resolve_has_previous_page,
            ))
            .field(Field::new(
                "startCursor",
                TypeRef::named(TypeRef::CURSOR),
                Resolver::resolve_start_cursor,
            ))
            .field(Field::new(
                "endCursor",
                TypeRef::named(TypeRef::CURSOR),
                Resolver::resolve_end_cursor,
            ))
    }
}

pub trait PageInfoResolver: Send + Sync + 'static {
    fn resolve_has_next_page(ctx: ResolverContext) -> FieldFuture;
    fn resolve_has_previous_page(ctx: ResolverContext) -> FieldFuture;
    fn resolve_start_cursor(ctx: ResolverContext) -> FieldFuture;
    fn resolve_end_cursor(ctx: ResolverContext) -> FieldFuture;
}
