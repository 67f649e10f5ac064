use super::self_prelude::*;
use std::collections::{HashMap, HashSet};

/// Names of the GraphQL types generated for a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelTypes {
    pub node: String,
    pub edge: String,
    pub connection: String,
}

/// Types generated for models, keyed by model name and custom edge name.
///
/// Generated objects are held until [`TypeCache::register`] hands them to a
/// schema, so every type is registered exactly once however many resolvers
/// share it. Two entries may not generate types with the same name.
#[derive(Default)]
pub struct TypeCache {
    types: HashMap<(String, Option<String>), ModelTypes>,
    type_names: HashSet<String>,
    unregistered: Vec<Object>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, model_name: &str, edge_name: Option<&str>) -> Option<&ModelTypes> {
        self.types
            .get(&(model_name.to_string(), edge_name.map(str::to_string)))
    }

    pub fn insert(
        &mut self,
        model_name: impl Into<String>,
        edge_name: Option<String>,
        types: ModelTypes,
        objects: Vec<Object>,
    ) -> GraphqlResult<()> {
        let names = [&types.node, &types.edge, &types.connection];
        if let Some(name) = names.iter().find(|name| self.type_names.contains(**name)) {
            return Err(GraphqlError::DuplicateTypeName(name.to_string()));
        }
        self.type_names
            .extend(names.iter().map(|name| name.to_string()));
        self.types.insert((model_name.into(), edge_name), types);
        self.unregistered.extend(objects);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn has_unregistered(&self) -> bool {
        !self.unregistered.is_empty()
    }

    /// Register the objects generated since the last call.
    pub fn register(&mut self, mut schema: SchemaBuilder) -> SchemaBuilder {
        for object in self.unregistered.drain(..) {
            schema = schema.register(object);
        }
        schema
    }
}
