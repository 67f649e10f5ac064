//! Fixtures shared by tests and demos.

use crate::schema::*;
use crate::self_prelude::*;
use crate::store::*;
use tokio::sync::Mutex;

/// A `TestModel` with a few typed fields. `ownerId` holds global IDs.
pub fn new_test_model() -> MemoryModel {
    MemoryModel::new(
        "TestModel",
        ModelSchema::new()
            .field("name", FieldType::Text)
            .field("age", FieldType::Integer)
            .field("location", FieldType::GeoPoint)
            .field("ownerId", FieldType::Keyword)
            .global_key("ownerId"),
    )
}

/// [`new_test_model`] holding `obiwan`, `yoda` and `old ben`.
pub async fn new_seeded_test_model() -> StoreResult<MemoryModel> {
    let model = new_test_model();
    model
        .create_bulk(
            vec![
                json!({ "name": "obiwan", "age": 57, "location": { "lat": 1.0, "lon": 2.0 } }),
                json!({ "name": "yoda", "age": 900 }),
                json!({ "name": "old ben", "age": 57 }),
            ],
            &WriteOptions::default(),
        )
        .await?;
    Ok(model)
}

/// Delegates to a [`MemoryModel`], keeping the options of every call.
pub struct RecordingModel {
    inner: MemoryModel,
    finds: Mutex<Vec<FindOptions>>,
    writes: Mutex<Vec<WriteOptions>>,
}

impl RecordingModel {
    pub fn new(inner: MemoryModel) -> Self {
        Self {
            inner,
            finds: Mutex::new(vec![]),
            writes: Mutex::new(vec![]),
        }
    }

    /// Options passed to `count` and `find_all`, in call order.
    pub async fn find_options(&self) -> Vec<FindOptions> {
        self.finds.lock().await.clone()
    }

    pub async fn write_options(&self) -> Vec<WriteOptions> {
        self.writes.lock().await.clone()
    }
}

#[async_trait]
impl Model for RecordingModel {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn schema(&self) -> &ModelSchema {
        self.inner.schema()
    }

    async fn count(&self, options: &FindOptions) -> StoreResult<u64> {
        self.finds.lock().await.push(options.clone());
        self.inner.count(options).await
    }

    async fn find_all(&self, options: &FindOptions) -> StoreResult<Vec<Record>> {
        self.finds.lock().await.push(options.clone());
        self.inner.find_all(options).await
    }

    async fn create_bulk(
        &self,
        records: Vec<Record>,
        options: &WriteOptions,
    ) -> StoreResult<Vec<String>> {
        self.writes.lock().await.push(options.clone());
        self.inner.create_bulk(records, options).await
    }
}

/// Schema over a single model with the default query and mutation fields.
pub fn new_test_schema(model: Arc<dyn Model>) -> GraphqlResult<async_graphql::dynamic::Schema> {
    EsormSchemaBuilder::new().model(model)?.finish()
}
