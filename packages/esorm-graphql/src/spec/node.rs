//! `async_graphql::dynamic` extensions for handling GraphQL nodes.
//! See: https://graphql.org/learn/global-object-identification/#node-interface

use super::self_prelude::*;
use super::util::*;
use crate::field_type::GraphqlFieldType;
use crate::relay::to_global_id;

#[extension_trait]
pub impl NodeTypeRef for TypeRef {
    /// Node type of a model, e.g. `EsORMUserNode`.
    fn node(model_name: impl Into<String>) -> String {
        format!("EsORM{}Node", model_name.into())
    }
}

/// Node objects resolve against the raw record the store returned.
#[extension_trait]
pub impl NodeObject for Object {
    fn new_node(name: impl Into<String>, global_type_name: impl Into<String>) -> Self {
        Self::new(name).node_id_field(global_type_name)
    }

    /// The `id` field, exposing the record's local ID as a global ID.
    fn node_id_field(self, global_type_name: impl Into<String>) -> Self {
        let global_type_name = global_type_name.into();
        self.field(Field::new(
            "id",
            TypeRef::named(TypeRef::ID),
            move |ctx| {
                let global_type_name = global_type_name.clone();
                FieldFuture::new(async move {
                    let record = ctx.parent::<JsonValue>()?;
                    let id = match record.get("id") {
                        Some(JsonValue::String(id)) => id.clone(),
                        Some(JsonValue::Null) | None => return Ok(None),
                        Some(other) => other.to_string(),
                    };
                    Ok(Some(FieldValue::value(to_global_id(&global_type_name, &id))))
                })
            },
        ))
    }

    /// A field read straight from the record and converted per its store type.
    fn data_field(self, name: impl Into<String>, field_type: GraphqlFieldType) -> Self {
        let name = name.into();
        let key = name.clone();
        self.field(Field::new(name, field_type.type_ref(), move |ctx| {
            let key = key.clone();
            FieldFuture::new(async move {
                let record = ctx.parent::<JsonValue>()?;
                let value = record
                    .get(&key)
                    .and_then(|value| field_type.to_value(value));
                Ok(value.map(FieldValue::value))
            })
        }))
    }
}
