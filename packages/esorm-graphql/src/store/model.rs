use super::model_schema::*;
use super::self_prelude::*;

/// A stored document. `id` holds the store-local identifier.
pub type Record = JsonValue;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Unsupported query clause: {0:?}")]
    UnsupportedQuery(String),
    #[error("Malformed query clause {0:?}: {1}")]
    MalformedQuery(String, String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Request-scoped data forwarded untouched to the store.
///
/// Attach it to a GraphQL request with `Request::data`; resolvers pick it up
/// from there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionContext(pub JsonValue);

/// Options for a read against the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindOptions {
    pub context: Option<ExecutionContext>,
    pub groups: Vec<String>,
    pub raw: bool,
    pub size: Option<u64>,
    pub from: Option<u64>,
    pub query: Option<JsonValue>,
    /// Store-specific options (e.g. `sort`) set by caller hooks.
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Options for a write against the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteOptions {
    pub context: Option<ExecutionContext>,
}

/// A model backed by a document store.
#[async_trait]
pub trait Model: Send + Sync {
    /// Name of the backing index. Used to scope cursors.
    fn name(&self) -> &str;
    /// Name of the model. Used to name GraphQL types and global IDs.
    fn model_name(&self) -> &str;
    fn schema(&self) -> &ModelSchema;
    /// Counts the records matching `options.query`.
    async fn count(&self, options: &FindOptions) -> StoreResult<u64>;
    /// Returns the window of matching records described by `options`.
    async fn find_all(&self, options: &FindOptions) -> StoreResult<Vec<Record>>;
    /// Stores the given records and returns their IDs.
    async fn create_bulk(
        &self,
        records: Vec<Record>,
        options: &WriteOptions,
    ) -> StoreResult<Vec<String>>;
}
