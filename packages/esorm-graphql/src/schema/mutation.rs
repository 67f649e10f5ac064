use super::query::*;
use super::self_prelude::*;
use crate::field_type::GraphqlFieldType;
use tracing::debug;

#[extension_trait]
pub impl MutationTypeRef for TypeRef {
    /// Input type of a model's create mutation, e.g. `EsORMUserCreateInput`.
    fn create_input(model_name: impl Into<String>) -> String {
        format!("EsORM{}CreateInput", model_name.into())
    }
}

/// Input object accepted by the create mutation, one field per mapping.
pub fn create_input_object(model: &dyn Model) -> InputObject {
    let mut input = InputObject::new(TypeRef::create_input(model.model_name()));
    for (name, mapping) in model.schema().mappings.iter() {
        input = input.field(InputValue::new(
            name,
            GraphqlFieldType::from(mapping.r#type).type_ref(),
        ));
    }
    input
}

/// Create a bulk-create mutation field over `model`, named `name`.
///
/// Returns the field along with its input type, which has to be registered
/// with the schema.
pub fn create_mutation(name: impl Into<String>, model: Arc<dyn Model>) -> (Field, InputObject) {
    let input = create_input_object(model.as_ref());
    let input_type = input.type_name().to_string();

    let field = Field::new(name, TypeRef::named(TypeRef::BOOLEAN), move |ctx| {
        let model = model.clone();
        FieldFuture::new(async move {
            let input = match ctx.args.get("input") {
                Some(input) => input.deserialize::<JsonValue>()?,
                None => JsonValue::Null,
            };
            let keys = model.schema().id_keys();
            let records = match input {
                JsonValue::Array(items) => items
                    .iter()
                    .map(|item| replace_id_keys(item, &keys))
                    .collect::<GraphqlResult<Vec<_>>>()?,
                JsonValue::Null => vec![],
                item => vec![replace_id_keys(&item, &keys)?],
            };
            let options = WriteOptions {
                context: ctx.data_opt::<ExecutionContext>().cloned(),
            };
            let ids = model.create_bulk(records, &options).await?;
            debug!("{}: created {} records", model.name(), ids.len());
            Ok(Some(FieldValue::value(true)))
        })
    })
    .argument(InputValue::new("input", TypeRef::named_list(input_type)));

    (field, input)
}
