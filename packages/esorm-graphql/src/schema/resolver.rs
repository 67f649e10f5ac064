use super::args::*;
use super::node::*;
use super::paging::*;
use super::query::*;
use super::self_prelude::*;
use super::type_cache::*;
use crate::relay::{decode_cursor, encode_cursor};
use tracing::debug;

/// A resolved page of a connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub page_info: PageInfo,
    pub total: u64,
    pub edges: Vec<ConnectionEdge>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<CursorString>,
    pub end_cursor: Option<CursorString>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionEdge {
    pub cursor: CursorString,
    pub node: Record,
}

/// Options for [`create_resolver`].
#[derive(Default)]
pub struct ResolverOptions {
    fields: Vec<Field>,
    args: Vec<InputValue>,
    find_options: Option<FindOptionsHook>,
    custom_edge: Option<String>,
    custom_node: Option<Object>,
    custom_edge_name: Option<String>,
}

impl ResolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra field on the generated node type.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Extra argument on the connection field, after the default ones.
    pub fn argument(mut self, arg: InputValue) -> Self {
        self.args.push(arg);
        self
    }

    pub fn find_options<F>(mut self, hook: F) -> Self
    where
        F: Fn(FindOptions, &ConnectionArgs) -> FindOptions + Send + Sync + 'static,
    {
        self.find_options = Some(Arc::new(hook));
        self
    }

    /// Resolve into a connection type registered by the caller.
    pub fn custom_edge(mut self, connection_type: impl Into<String>) -> Self {
        self.custom_edge = Some(connection_type.into());
        self
    }

    /// Use a caller-built node type. Requires [`Self::custom_edge_name`].
    pub fn custom_node(mut self, node: Object) -> Self {
        self.custom_node = Some(node);
        self
    }

    pub fn custom_edge_name(mut self, name: impl Into<String>) -> Self {
        self.custom_edge_name = Some(name.into());
        self
    }
}

/// Create a connection field over `model`, named `name`.
///
/// Generated types are taken from, or added to, `cache`.
pub fn create_resolver(
    name: impl Into<String>,
    model: Arc<dyn Model>,
    options: ResolverOptions,
    cache: &mut TypeCache,
) -> GraphqlResult<Field> {
    let ResolverOptions {
        fields,
        args,
        find_options,
        custom_edge,
        custom_node,
        custom_edge_name,
    } = options;
    let model_name = model.model_name().to_string();

    let connection_type = match (custom_edge, custom_node) {
        (Some(custom_edge), _) => {
            if custom_edge.is_empty() {
                return Err(GraphqlError::NoEdgeType);
            }
            custom_edge
        }
        (None, Some(custom_node)) => {
            let edge_name = custom_edge_name.ok_or(GraphqlError::MissingCustomEdgeName)?;
            match cache.get(&model_name, Some(&edge_name)) {
                Some(types) => types.connection.clone(),
                None => {
                    let (types, objects) = create_edge_node_type(
                        model.as_ref(),
                        vec![],
                        Some(custom_node),
                        Some(&edge_name),
                    );
                    let connection = types.connection.clone();
                    cache.insert(&model_name, Some(edge_name), types, objects)?;
                    connection
                }
            }
        }
        (None, None) => match cache.get(&model_name, None) {
            Some(types) => types.connection.clone(),
            None => {
                let (types, objects) =
                    create_edge_node_type(model.as_ref(), fields, None, None);
                let connection = types.connection.clone();
                cache.insert(&model_name, None, types, objects)?;
                connection
            }
        },
    };

    let mut field = Field::new(name, TypeRef::named(connection_type), move |ctx| {
        let model = model.clone();
        let find_options = find_options.clone();
        FieldFuture::new(async move {
            let args = ConnectionArgs::from_json(ctx.args_json()?)?;
            let context = ctx.data_opt::<ExecutionContext>().cloned();
            let connection =
                resolve_connection(model.as_ref(), &args, context, find_options.as_ref())
                    .await?;
            Ok(Some(FieldValue::owned_any(connection)))
        })
    })
    .connection_arguments();
    for arg in args {
        field = field.argument(arg);
    }
    Ok(field)
}

/// Resolve one page of a connection against the store.
pub async fn resolve_connection(
    model: &dyn Model,
    args: &ConnectionArgs,
    context: Option<ExecutionContext>,
    find_options: Option<&FindOptionsHook>,
) -> GraphqlResult<Connection> {
    let groups = if args.group_by.is_empty() {
        vec!["*".to_string()]
    } else {
        args.group_by.clone()
    };
    let initial = FindOptions {
        context,
        groups,
        raw: true,
        ..Default::default()
    };
    let mut options = match find_options {
        Some(hook) => hook(initial, args),
        None => initial,
    };

    let page_size = args.page_size()?;
    if let Some(PageSize { size, .. }) = page_size {
        options.size = Some(size);
    }
    let cursor = args.cursor().map(decode_cursor).transpose()?;
    if let Some(from) = fetch_offset(cursor.as_ref()) {
        options.from = Some(from);
    }
    if let Some(query) = &args.query {
        options.query = Some(replace_id_deep(query, &model.schema().id_keys())?);
    }

    let count_options = FindOptions {
        size: None,
        from: None,
        ..options.clone()
    };
    let (total, records) =
        tokio::try_join!(model.count(&count_options), model.find_all(&options))?;
    debug!(
        "{}: {} of {total} records from {:?}",
        model.name(),
        records.len(),
        options.from
    );

    let start = start_index(cursor.as_ref());
    let limit = page_size
        .map(|page_size| page_size.size as usize)
        .unwrap_or(usize::MAX);
    let edges = records
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, node)| ConnectionEdge {
            cursor: encode_cursor(model.name(), start.saturating_add(idx as i64)),
            node,
        })
        .collect::<Vec<_>>();

    let PageFlags {
        has_next_page,
        has_previous_page,
    } = page_flags(cursor.as_ref(), page_size, total);

    Ok(Connection {
        page_info: PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        },
        total,
        edges,
    })
}

/// Resolves the generated connection, edge and page info types.
pub struct EsormResolver;

impl ConnectionResolver for EsormResolver {
    fn resolve_page_info(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<Connection>()?;
            Ok(Some(FieldValue::owned_any(connection.page_info.clone())))
        })
    }
    fn resolve_total(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<Connection>()?;
            Ok(Some(FieldValue::value(connection.total)))
        })
    }
    fn resolve_edges(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<Connection>()?;
            let edges = connection
                .edges
                .iter()
                .cloned()
                .map(FieldValue::owned_any)
                .collect::<Vec<_>>();
            Ok(Some(FieldValue::list(edges)))
        })
    }
}

impl ConnectionEdgeResolver for EsormResolver {
    fn resolve_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let edge = ctx.parent::<ConnectionEdge>()?;
            Ok(Some(FieldValue::value(edge.cursor.clone())))
        })
    }
    fn resolve_node(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let edge = ctx.parent::<ConnectionEdge>()?;
            Ok(Some(FieldValue::owned_any(edge.node.clone())))
        })
    }
}

impl PageInfoResolver for EsormResolver {
    fn resolve_has_next_page(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let page_info = ctx.parent::<PageInfo>()?;
            Ok(Some(FieldValue::value(page_info.has_next_page)))
        })
    }
    fn resolve_has_previous_page(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let page_info = ctx.parent::<PageInfo>()?;
            Ok(Some(FieldValue::value(page_info.has_previous_page)))
        })
    }
    fn resolve_start_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let page_info = ctx.parent::<PageInfo>()?;
            Ok(page_info.start_cursor.clone().map(FieldValue::value))
        })
    }
    fn resolve_end_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let page_info = ctx.parent::<PageInfo>()?;
            Ok(page_info.end_cursor.clone().map(FieldValue::value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    async fn seeded(count: usize) -> MemoryModel {
        let model = MemoryModel::new("User", ModelSchema::new().field("name", FieldType::Text));
        let records = (0..count)
            .map(|i| json!({ "name": format!("user-{i}") }))
            .collect();
        model
            .create_bulk(records, &WriteOptions::default())
            .await
            .unwrap();
        model
    }

    fn args(value: JsonValue) -> ConnectionArgs {
        ConnectionArgs::from_json(value.as_object().cloned().unwrap()).unwrap()
    }

    async fn resolve(model: &MemoryModel, value: JsonValue) -> Connection {
        resolve_connection(model, &args(value), None, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_page() {
        let model = seeded(5).await;
        for n in 1..8 {
            let connection = resolve(&model, json!({ "first": n })).await;
            assert_eq!(connection.edges.len(), n.min(5));
            assert_eq!(connection.total, 5);
            assert!(!connection.page_info.has_previous_page);
            assert_eq!(connection.page_info.has_next_page, n + 1 <= 5);
        }
    }

    #[tokio::test]
    async fn cursors_continue_after_the_given_edge() {
        let model = seeded(5).await;
        let first = resolve(&model, json!({ "first": 2 })).await;
        let end_cursor = first.page_info.end_cursor.clone().unwrap();
        assert_eq!(decode_cursor(&end_cursor).unwrap().index, 1);

        let second = resolve(&model, json!({ "first": 2, "after": end_cursor })).await;
        let names = second
            .edges
            .iter()
            .map(|edge| edge.node["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["user-2", "user-3"]);
        assert_eq!(
            decode_cursor(second.page_info.start_cursor.as_deref().unwrap())
                .unwrap()
                .index,
            2
        );
    }

    #[tokio::test]
    async fn final_page() {
        let total = 6;
        let model = seeded(total).await;
        for n in 1..total {
            let after = encode_cursor("user", (total - n - 1) as i64);
            let connection = resolve(&model, json!({ "first": n, "after": after })).await;
            assert!(!connection.page_info.has_next_page, "first {n}");
            assert_eq!(connection.edges.len(), n);
        }
    }

    #[tokio::test]
    async fn last_swaps_flags() {
        let model = seeded(5).await;
        let first = resolve(&model, json!({ "first": 2 })).await;
        let last = resolve(&model, json!({ "last": 2 })).await;
        assert_eq!(first.page_info.has_next_page, last.page_info.has_previous_page);
        assert_eq!(first.page_info.has_previous_page, last.page_info.has_next_page);
        assert!(last.page_info.has_previous_page);
    }

    #[tokio::test]
    async fn empty_result() {
        let model = seeded(0).await;
        for value in [json!({}), json!({ "first": 3 }), json!({ "last": 3 })] {
            let connection = resolve(&model, value).await;
            assert!(connection.edges.is_empty());
            assert_eq!(connection.total, 0);
            assert_eq!(connection.page_info, PageInfo::default());
        }
    }

    #[tokio::test]
    async fn query_ids_are_local() {
        let model = seeded(3).await;
        let query = json!({ "term": { "id": crate::relay::to_global_id("User", "2") } });
        let connection = resolve(&model, json!({ "query": query })).await;
        assert_eq!(connection.total, 1);
        assert_eq!(connection.edges[0].node["name"], json!("user-1"));
    }

    #[tokio::test]
    async fn hook_sees_initial_options() {
        let model = seeded(3).await;
        let seen = Arc::new(Mutex::new(None));
        let hook: FindOptionsHook = {
            let seen = seen.clone();
            Arc::new(move |options: FindOptions, _args: &ConnectionArgs| {
                *seen.lock().unwrap() = Some(options.clone());
                FindOptions {
                    query: Some(json!({ "term": { "name": "user-0" } })),
                    ..options
                }
            })
        };
        let context = ExecutionContext(json!({ "user": "admin" }));
        let connection =
            resolve_connection(&model, &args(json!({})), Some(context.clone()), Some(&hook))
                .await
                .unwrap();
        assert_eq!(connection.total, 1);

        let seen = seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.groups, vec!["*"]);
        assert!(seen.raw);
        assert_eq!(seen.context, Some(context));
    }

    #[tokio::test]
    async fn malformed_cursor() {
        let model = seeded(3).await;
        let result =
            resolve_connection(&model, &args(json!({ "after": "%%%" })), None, None).await;
        assert_matches!(result, Err(GraphqlError::Cursor(_)));
    }

    #[test]
    fn resolver_configuration_errors() {
        let model: Arc<dyn Model> = Arc::new(MemoryModel::new("User", ModelSchema::new()));
        let mut cache = TypeCache::new();

        assert_matches!(
            create_resolver(
                "users",
                model.clone(),
                ResolverOptions::new().custom_node(Object::new("UserSummary")),
                &mut cache,
            ),
            Err(GraphqlError::MissingCustomEdgeName)
        );
        assert_matches!(
            create_resolver(
                "users",
                model.clone(),
                ResolverOptions::new().custom_edge(""),
                &mut cache,
            ),
            Err(GraphqlError::NoEdgeType)
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn resolvers_share_cached_types() {
        let model: Arc<dyn Model> = Arc::new(MemoryModel::new("User", ModelSchema::new()));
        let mut cache = TypeCache::new();

        for name in ["users", "people"] {
            create_resolver(name, model.clone(), ResolverOptions::new(), &mut cache)
                .unwrap();
        }
        for _ in 0..2 {
            create_resolver(
                "summaries",
                model.clone(),
                ResolverOptions::new()
                    .custom_node(Object::new("UserSummary"))
                    .custom_edge_name("UserSummaryEdge"),
                &mut cache,
            )
            .unwrap();
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get("User", None).is_some());
        assert!(cache.get("User", Some("UserSummaryEdge")).is_some());
    }

    #[test]
    fn custom_node_cannot_take_over_default_edge() {
        let model: Arc<dyn Model> = Arc::new(MemoryModel::new("User", ModelSchema::new()));
        let mut cache = TypeCache::new();

        create_resolver("users", model.clone(), ResolverOptions::new(), &mut cache).unwrap();
        assert_matches!(
            create_resolver(
                "summaries",
                model.clone(),
                ResolverOptions::new()
                    .custom_node(Object::new("UserSummary"))
                    .custom_edge_name(""),
                &mut cache,
            ),
            Err(GraphqlError::DuplicateTypeName(name)) if name == "EsORMUserEdge"
        );
        assert_eq!(
            cache.get("User", None).map(|types| types.node.as_str()),
            Some("EsORMUserNode")
        );
    }
}
