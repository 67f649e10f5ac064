use crate::api::{ApiResult, HttpError, EXECUTION_CONTEXT_HEADER};
use async_graphql::{
    dynamic::Schema,
    http::{playground_source, GraphQLPlaygroundConfig},
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, Json},
    http::HeaderMap,
    response::Html,
};
use esorm_graphql::store::ExecutionContext;
use serde_json::{json, Value};
use std::{sync::Arc, time::Instant};

pub(crate) async fn query_graph(
    Extension(schema): Extension<Schema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> ApiResult<GraphQLResponse> {
    let mut req = req.into_inner();
    if let Some(context) = headers.get(EXECUTION_CONTEXT_HEADER) {
        let context: Value = serde_json::from_slice(context.as_bytes()).map_err(|e| {
            HttpError::BadRequest(format!("Invalid {EXECUTION_CONTEXT_HEADER}: {e}"))
        })?;
        req = req.data(ExecutionContext(context));
    }
    Ok(schema.execute(req).await.into())
}

pub(crate) async fn gql_playground() -> Html<String> {
    Html(playground_source(
        GraphQLPlaygroundConfig::new("/api/graph")
            .with_setting("schema.polling.enable", false),
    ))
}

pub(crate) async fn health_check(
    Extension(start_time): Extension<Arc<Instant>>,
) -> Json<Value> {
    let uptime = start_time.elapsed().as_secs().to_string();
    Json(json!({
        "status": "OK",
        "uptime(seconds)": uptime,
    }))
}
