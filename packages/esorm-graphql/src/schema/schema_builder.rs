use super::mutation::*;
use super::resolver::*;
use super::self_prelude::*;
use super::type_cache::*;
use tracing::info;

/// Collects model resolvers and mutations into a dynamic schema.
pub struct EsormSchemaBuilder {
    query: Object,
    mutation: Object,
    has_mutations: bool,
    types: Vec<Type>,
    cache: TypeCache,
}

impl Default for EsormSchemaBuilder {
    fn default() -> Self {
        Self {
            query: Object::new(TypeRef::QUERY),
            mutation: Object::new(TypeRef::MUTATION),
            has_mutations: false,
            types: vec![],
            cache: TypeCache::new(),
        }
    }
}

impl EsormSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection query field and a create mutation for `model`, using
    /// the default names and resolver options.
    pub fn model(self, model: Arc<dyn Model>) -> GraphqlResult<Self> {
        let query_name = model.model_name().to_case(Case::Camel);
        let mutation_name = format!("create{}", model.model_name());
        self.query_model(query_name, model.clone(), ResolverOptions::new())
            .map(|builder| builder.mutation_model(mutation_name, model))
    }

    /// Add a connection query field for `model`.
    pub fn query_model(
        mut self,
        name: impl Into<String>,
        model: Arc<dyn Model>,
        options: ResolverOptions,
    ) -> GraphqlResult<Self> {
        let name = name.into();
        info!("Adding query field {name} for model {}", model.model_name());
        let field = create_resolver(name, model, options, &mut self.cache)?;
        self.query = self.query.field(field);
        Ok(self)
    }

    /// Add a bulk-create mutation field for `model`.
    pub fn mutation_model(mut self, name: impl Into<String>, model: Arc<dyn Model>) -> Self {
        let name = name.into();
        info!("Adding mutation field {name} for model {}", model.model_name());
        let (field, input) = create_mutation(name, model);
        self.mutation = self.mutation.field(field);
        self.has_mutations = true;
        self.register(input)
    }

    /// Add a field to the query root.
    pub fn query_field(mut self, field: Field) -> Self {
        self.query = self.query.field(field);
        self
    }

    /// Register a caller-defined type, e.g. a custom node or connection.
    pub fn register(mut self, ty: impl Into<Type>) -> Self {
        self.types.push(ty.into());
        self
    }

    /// The types generated so far.
    pub fn type_cache(&self) -> &TypeCache {
        &self.cache
    }

    /// Build the underlying schema builder, e.g. to attach request data.
    pub fn build(self) -> SchemaBuilder {
        let Self {
            query,
            mutation,
            has_mutations,
            types,
            mut cache,
        } = self;

        let mut schema = if has_mutations {
            Schema::build(TypeRef::QUERY, Some(TypeRef::MUTATION), None)
                .register(query)
                .register(mutation)
        } else {
            Schema::build(TypeRef::QUERY, None, None).register(query)
        };
        schema = schema
            .register_scalar_types()
            .register(Object::new_page_info::<EsormResolver>());
        schema = cache.register(schema);
        for ty in types {
            schema = schema.register(ty);
        }
        schema
    }

    pub fn finish(self) -> GraphqlResult<Schema> {
        Ok(self.build().finish()?)
    }
}
