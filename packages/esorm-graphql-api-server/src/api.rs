use crate::uses::{gql_playground, health_check, query_graph};
use async_graphql::dynamic::Schema;
use axum::{
    extract::{DefaultBodyLimit, Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Error as AxumError, Router,
};
use esorm_graphql::{schema::EsormSchemaBuilder, GraphqlError};
use esorm_graphql_lib::{
    config::{EsormConfigError, GraphQLConfig, ServiceConfig},
    models::{load_models, ModelLoadError},
    utils::derive_socket_addr,
};
use hyper::Error as HyperError;
use serde_json::json;
use std::{sync::Arc, time::Instant};
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub type ApiResult<T> = core::result::Result<T, ApiError>;

/// Header carrying the JSON execution context forwarded to the store.
pub const EXECUTION_CONTEXT_HEADER: &str = "x-execution-context";

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Bad request. {0}")]
    BadRequest(String),
    #[error("Error.")]
    InternalServer,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GraphQL error {0:?}")]
    Graphql(#[from] GraphqlError),
    #[error("Serialization error {0:?}")]
    Serde(#[from] serde_json::Error),
    #[error("Http error {0:?}")]
    Http(#[from] HttpError),
    #[error("Config error {0:?}")]
    Config(#[from] EsormConfigError),
    #[error("Model error {0:?}")]
    Models(#[from] ModelLoadError),
    #[error("No model-definition file configured")]
    MissingModels,
    #[error("Axum error: {0:?}")]
    AxumError(#[from] AxumError),
    #[error("Hyper error: {0:?}")]
    HyperError(#[from] HyperError),
    #[error("{0:?}")]
    Other(#[from] anyhow::Error),
}

impl Default for ApiError {
    fn default() -> Self {
        ApiError::Http(HttpError::InternalServer)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let generic_err_msg = "Internal server error.".to_string();
        let (status, err_msg) = match self {
            ApiError::Http(HttpError::BadRequest(e)) => (StatusCode::BAD_REQUEST, e),
            ApiError::Serde(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, generic_err_msg),
        };

        error!("{:?} - {}", status, err_msg);

        (
            status,
            Json(json!({
                "success": "false",
                "details": err_msg,
            })),
        )
            .into_response()
    }
}

/// Build a schema with a query and a create mutation per configured model.
pub async fn build_schema(config: &ServiceConfig) -> ApiResult<Schema> {
    let path = config.models.as_ref().ok_or(ApiError::MissingModels)?;
    let mut builder = EsormSchemaBuilder::new();
    for model in load_models(path).await? {
        builder = builder.model(model)?;
    }
    Ok(builder.finish()?)
}

pub struct GraphQlApi;

impl GraphQlApi {
    pub fn build(schema: Schema, config: &GraphQLConfig) -> Router {
        let start_time = Arc::new(Instant::now());

        let graph_route = Router::new()
            .route("/graph", post(query_graph))
            .layer(Extension(schema));

        let playground_route = Router::new().route("/playground", get(gql_playground));

        let health_route = Router::new()
            .route("/health", get(health_check))
            .layer(Extension(start_time));

        let api_routes = Router::new()
            .merge(graph_route)
            .merge(playground_route)
            .merge(health_route);

        Router::new()
            .nest("/api", api_routes)
            .layer(DefaultBodyLimit::max(config.max_body_size))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn run(config: ServiceConfig, schema: Schema) -> ApiResult<()> {
        let listen_on =
            derive_socket_addr(&config.graphql_api.host, &config.graphql_api.port)?;
        let app = Self::build(schema, &config.graphql_api);

        info!("GraphQL API listening on {}", config.graphql_api.http_url());

        axum::Server::bind(&listen_on)
            .serve(app.into_make_service())
            .await?;

        Ok(())
    }
}
