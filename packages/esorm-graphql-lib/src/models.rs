//! Model-definition files used to seed in-memory models.
//!
//! ```yaml
//! - name: users
//!   model_name: User
//!   schema:
//!     mappings:
//!       name: { type: text }
//!       age: { type: integer }
//!   records:
//!     - { name: obiwan, age: 57 }
//! ```

use esorm_graphql::store::{MemoryModel, Model, ModelSchema, StoreError, WriteOptions};
use serde::Deserialize;
use std::{fs::File, path::Path, sync::Arc};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Error reading model file: {0:?}")]
    File(#[from] std::io::Error),
    #[error("Error parsing model file: {0:?}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Error seeding model {0:?}: {1}")]
    Seed(String, StoreError),
}

pub type ModelLoadResult<T> = Result<T, ModelLoadError>;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ModelDefinition {
    /// Store name of the model.
    pub name: String,
    /// GraphQL name of the model. Defaults to `name`.
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub schema: ModelSchema,
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

impl ModelDefinition {
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(&self.name)
    }

    /// Build the in-memory model and store the definition's records in it.
    pub async fn into_model(self) -> ModelLoadResult<MemoryModel> {
        let model = MemoryModel::new(self.model_name(), self.schema.clone())
            .with_name(self.name.clone());
        let count = self.records.len();
        model
            .create_bulk(self.records, &WriteOptions::default())
            .await
            .map_err(|e| ModelLoadError::Seed(self.name.clone(), e))?;
        info!("Loaded model {} with {count} records", model.model_name());
        Ok(model)
    }
}

pub fn parse_model_definitions(content: &str) -> ModelLoadResult<Vec<ModelDefinition>> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load every model of a model-definition file.
pub async fn load_models(path: impl AsRef<Path>) -> ModelLoadResult<Vec<Arc<dyn Model>>> {
    let file = File::open(path)?;
    let definitions: Vec<ModelDefinition> = serde_yaml::from_reader(file)?;
    let mut models: Vec<Arc<dyn Model>> = Vec::with_capacity(definitions.len());
    for definition in definitions {
        models.push(Arc::new(definition.into_model().await?));
    }
    Ok(models)
}
