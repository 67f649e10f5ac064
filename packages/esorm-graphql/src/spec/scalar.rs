//! Custom scalars used by generated node and input types.

use super::self_prelude::*;

#[extension_trait]
pub impl ScalarTypeRef for TypeRef {
    const DATE: &'static str = "Date";
    const JSON: &'static str = "JSON";
}

#[extension_trait]
pub impl ScalarSchemaBuilder for SchemaBuilder {
    fn register_scalar_types(self) -> Self {
        self.register(
            Scalar::new(TypeRef::DATE)
                .description("A date as stored by the document store."),
        )
        .register(Scalar::new(TypeRef::JSON).description("Arbitrary JSON value."))
    }
}
